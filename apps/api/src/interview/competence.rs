//! Competence Estimator — folds the evaluation history into one running
//! estimate via a templated gateway call. Total by contract: any parse or
//! gateway failure yields the fixed fallback built from the candidate's
//! self-reported confidence.

use serde::{Deserialize, Serialize};

use crate::interview::evaluator::EvaluationRecord;
use crate::interview::prompts::build_competence_prompt;
use crate::llm_client::{strip_json_fences, TextGenerator, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceAlignment {
    Overconfident,
    Underconfident,
    Aligned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionIntent {
    Easier,
    Similar,
    Deeper,
    Focused,
}

/// Ephemeral competence snapshot — recomputed every round, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetenceRecord {
    pub estimated_competence: u8, // 0 – 10
    pub confidence_alignment: ConfidenceAlignment,
    pub weak_areas: Vec<String>,
    pub next_question_intent: QuestionIntent,
    pub reasoning: String,
}

impl CompetenceRecord {
    fn fallback(confidence: u8) -> Self {
        Self {
            estimated_competence: confidence,
            confidence_alignment: ConfidenceAlignment::Aligned,
            weak_areas: vec![],
            next_question_intent: QuestionIntent::Similar,
            reasoning: "Fallback".to_string(),
        }
    }
}

/// Renders one history line per evaluation record.
fn format_evaluation_history(history: &[EvaluationRecord]) -> String {
    let mut out = String::new();
    for e in history {
        out.push_str(&format!(
            "Score:{} Strengths:{} Weaknesses:{}\n",
            e.score, e.strengths, e.weaknesses
        ));
    }
    out
}

/// Estimates overall competence from the full evaluation history.
///
/// The template mandates JSON-only output, so the whole response is parsed as
/// one object (fences stripped) — no brace scanning here.
pub async fn estimate_competence(
    llm: &dyn TextGenerator,
    topic: &str,
    confidence: u8,
    evaluation_history: &[EvaluationRecord],
) -> CompetenceRecord {
    let prompt = build_competence_prompt(
        topic,
        confidence,
        &format_evaluation_history(evaluation_history),
    );
    let response = llm
        .generate(&prompt, DEFAULT_TEMPERATURE, DEFAULT_MAX_TOKENS)
        .await;

    serde_json::from_str(strip_json_fences(&response))
        .unwrap_or_else(|_| CompetenceRecord::fallback(confidence))
}
