//! Answer Evaluator — scores a single answer, total by contract.
//!
//! Every path out of [`evaluate_answer`] produces a well-formed
//! [`EvaluationRecord`]: skipped answers short-circuit to a fixed low-score
//! record, parse failures fall back to fixed defaults, and missing fields in
//! an otherwise-parsed object are filled per field. The caller never sees an
//! error from this module.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::interview::prompts::build_evaluation_prompt;
use crate::llm_client::{TextGenerator, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

/// Minimum trimmed length (chars) for an answer to count as an attempt.
const MIN_ANSWER_CHARS: usize = 15;

/// Word count above which a low-scored answer earns the soft correction.
const SOFT_CORRECTION_MIN_WORDS: usize = 40;

/// Scores at or below this are eligible for the soft correction.
const SOFT_CORRECTION_THRESHOLD: u8 = 4;

/// The soft correction never raises a score past this cap.
const SOFT_CORRECTION_CAP: u8 = 6;

const DEFAULT_STRENGTHS: &str = "The candidate demonstrated partial understanding.";
const DEFAULT_WEAKNESSES: &str = "Some concepts need clearer explanation.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthAssessment {
    None,
    Surface,
    Moderate,
    Deep,
}

impl DepthAssessment {
    fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "none" => Some(Self::None),
            "surface" => Some(Self::Surface),
            "moderate" => Some(Self::Moderate),
            "deep" => Some(Self::Deep),
            _ => None,
        }
    }
}

/// One scored answer. Parallel to the session's `qa_history` by index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub score: u8, // 0 – 10
    pub strengths: String,
    pub weaknesses: String,
    pub depth_assessment: DepthAssessment,
}

impl EvaluationRecord {
    /// Fixed record for answers the candidate declined to attempt.
    fn skipped() -> Self {
        Self {
            score: 2,
            strengths: "The candidate recognized their uncertainty.".to_string(),
            weaknesses: "Did not attempt to explain the concept.".to_string(),
            depth_assessment: DepthAssessment::None,
        }
    }

    /// Fixed record when the gateway output could not be parsed at all.
    fn fallback() -> Self {
        Self {
            score: 5,
            strengths: "The candidate showed a reasonable attempt and partial understanding."
                .to_string(),
            weaknesses: "Some gaps in explanation or technical depth.".to_string(),
            depth_assessment: DepthAssessment::Surface,
        }
    }
}

/// True when the answer is too short to be an attempt, or contains one of the
/// configured skip phrases (case-insensitive, anywhere in the text).
pub fn is_skipped_answer(answer: &str, skip_phrases: &[String]) -> bool {
    if answer.trim().chars().count() < MIN_ANSWER_CHARS {
        return true;
    }
    let lower = answer.to_lowercase();
    skip_phrases.iter().any(|phrase| lower.contains(phrase))
}

/// Extracts the first balanced `{...}` span from free text.
///
/// The gateway may prepend commentary before the JSON object, and the object
/// itself may contain braces inside string values (the model sometimes quotes
/// example JSON). A bracket-depth scan that honors string literals and
/// escapes handles both; a naive first-`{`-to-last-`}` match does not.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Scores one answer. Total function — always returns a usable record.
pub async fn evaluate_answer(
    llm: &dyn TextGenerator,
    skip_phrases: &[String],
    role: &str,
    topic: &str,
    question: &str,
    answer: &str,
) -> EvaluationRecord {
    if is_skipped_answer(answer, skip_phrases) {
        return EvaluationRecord::skipped();
    }

    let prompt = build_evaluation_prompt(role, topic, question, answer);
    let response = llm
        .generate(&prompt, DEFAULT_TEMPERATURE, DEFAULT_MAX_TOKENS)
        .await;

    let parsed = extract_json_object(&response)
        .and_then(|span| serde_json::from_str::<Value>(span).ok());

    let parsed = match parsed {
        Some(v) => v,
        None => return EvaluationRecord::fallback(),
    };

    let mut score = parsed
        .get("score")
        .and_then(Value::as_u64)
        .map(|s| s.min(10) as u8)
        .unwrap_or(5);

    // Soft score correction: a long answer scored low is more likely model
    // harshness than pure guessing. Named rule — threshold 4, cap 6.
    let word_count = answer.split_whitespace().count();
    if score <= SOFT_CORRECTION_THRESHOLD && word_count > SOFT_CORRECTION_MIN_WORDS {
        score = (score + 1).min(SOFT_CORRECTION_CAP);
    }

    EvaluationRecord {
        score,
        strengths: parsed
            .get("strengths")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_STRENGTHS)
            .to_string(),
        weaknesses: parsed
            .get("weaknesses")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_WEAKNESSES)
            .to_string(),
        depth_assessment: parsed
            .get("depth_assessment")
            .and_then(Value::as_str)
            .and_then(DepthAssessment::parse)
            .unwrap_or(DepthAssessment::Surface),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;

    fn phrases() -> Vec<String> {
        crate::config::DEFAULT_SKIP_PHRASES
            .iter()
            .map(|p| p.to_string())
            .collect()
    }

    #[test]
    fn test_short_answer_is_skipped() {
        assert!(is_skipped_answer("yes", &phrases()));
        assert!(is_skipped_answer("   trimmed    ", &phrases()));
        assert!(!is_skipped_answer("a perfectly long answer", &phrases()));
    }

    #[test]
    fn test_skip_phrase_detected_regardless_of_length() {
        let long = "Honestly I am not sure about this one, indexes confuse me a lot";
        assert!(is_skipped_answer(long, &phrases()));
        assert!(is_skipped_answer("I DON'T KNOW anything about btrees", &phrases()));
    }

    #[tokio::test]
    async fn test_skipped_answer_short_circuits_without_gateway_call() {
        let llm = ScriptedGenerator::new(vec![]);
        let record = evaluate_answer(&llm, &phrases(), "Backend", "SQL", "Q?", "skip").await;
        assert_eq!(record.score, 2);
        assert_eq!(record.depth_assessment, DepthAssessment::None);
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_substantive_answer_parses_llm_json() {
        let llm = ScriptedGenerator::new(vec![
            r#"Here is my evaluation: {"score": 7, "strengths": "solid", "weaknesses": "minor", "depth_assessment": "moderate"}"#,
        ]);
        let record = evaluate_answer(
            &llm,
            &phrases(),
            "Backend",
            "SQL",
            "Q?",
            "an index is a b-tree over columns",
        )
        .await;
        assert_eq!(record.score, 7);
        assert_eq!(record.strengths, "solid");
        assert_eq!(record.depth_assessment, DepthAssessment::Moderate);
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_soft_correction_boosts_long_low_scored_answer() {
        let long_answer = "word ".repeat(45);
        let llm = ScriptedGenerator::new(vec![r#"{"score": 3, "depth_assessment": "surface"}"#]);
        let record =
            evaluate_answer(&llm, &phrases(), "Backend", "SQL", "Q?", &long_answer).await;
        assert_eq!(record.score, 4);
    }

    #[tokio::test]
    async fn test_soft_correction_formula_over_eligible_scores() {
        // corrected = min(parsed + 1, 6) for every score in the ≤4 window
        for parsed in 0..=4u8 {
            let long_answer = "word ".repeat(45);
            let response = format!(r#"{{"score": {parsed}}}"#);
            let llm = ScriptedGenerator::new(vec![response.as_str()]);
            let record =
                evaluate_answer(&llm, &phrases(), "Backend", "SQL", "Q?", &long_answer).await;
            assert_eq!(record.score, (parsed + 1).min(6));
        }
    }

    #[tokio::test]
    async fn test_scores_above_threshold_never_corrected() {
        let long_answer = "word ".repeat(45);
        let llm = ScriptedGenerator::new(vec![r#"{"score": 5}"#]);
        let record =
            evaluate_answer(&llm, &phrases(), "Backend", "SQL", "Q?", &long_answer).await;
        assert_eq!(record.score, 5);
    }

    #[tokio::test]
    async fn test_short_answer_score_passes_through_unmodified() {
        // 5 words — under the 40-word threshold, no correction
        let llm = ScriptedGenerator::new(vec![r#"{"score": 3}"#]);
        let record = evaluate_answer(
            &llm,
            &phrases(),
            "Backend",
            "SQL",
            "Q?",
            "btree index on the column",
        )
        .await;
        assert_eq!(record.score, 3);
    }

    #[tokio::test]
    async fn test_non_json_gateway_output_falls_back() {
        let llm = ScriptedGenerator::new(vec!["LLM Error: rate limited"]);
        let record = evaluate_answer(
            &llm,
            &phrases(),
            "Backend",
            "SQL",
            "Q?",
            "a long enough substantive answer here",
        )
        .await;
        assert_eq!(record.score, 5);
        assert_eq!(record.depth_assessment, DepthAssessment::Surface);
        assert_eq!(
            record.strengths,
            "The candidate showed a reasonable attempt and partial understanding."
        );
    }

    #[tokio::test]
    async fn test_missing_fields_get_per_field_defaults() {
        let llm = ScriptedGenerator::new(vec![r#"{"score": 8}"#]);
        let record = evaluate_answer(
            &llm,
            &phrases(),
            "Backend",
            "SQL",
            "Q?",
            "a long enough substantive answer here",
        )
        .await;
        assert_eq!(record.score, 8);
        assert_eq!(record.strengths, DEFAULT_STRENGTHS);
        assert_eq!(record.weaknesses, DEFAULT_WEAKNESSES);
        assert_eq!(record.depth_assessment, DepthAssessment::Surface);
    }

    #[test]
    fn test_extract_json_skips_leading_commentary() {
        let text = "Sure! Here's the JSON you asked for:\n{\"score\": 6}";
        assert_eq!(extract_json_object(text), Some("{\"score\": 6}"));
    }

    #[test]
    fn test_extract_json_handles_braces_inside_strings() {
        let text = r#"note {"strengths": "knows {\"nested\": true} syntax", "score": 6} trailing"#;
        let span = extract_json_object(text).unwrap();
        let v: Value = serde_json::from_str(span).unwrap();
        assert_eq!(v["score"], 6);
    }

    #[test]
    fn test_extract_json_none_when_unbalanced() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("{\"open\": true"), None);
    }
}
