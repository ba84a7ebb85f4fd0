//! Question Generator — picks a question source, formats its template, calls
//! the gateway, and sanitizes the raw output into exactly one usable question.

use crate::interview::prompts::{build_project_prompt, build_question_prompt, build_resume_prompt};
use crate::interview::session::{InterviewMode, QaPair};
use crate::llm_client::{TextGenerator, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

/// Returned when the gateway produces nothing usable.
pub const FALLBACK_QUESTION: &str = "Can you explain a key technical decision you made?";

/// Everything the generator needs for one round. Borrowed from the session.
pub struct QuestionContext<'a> {
    pub role: &'a str,
    pub topic: &'a str,
    pub confidence: u8,
    pub competence_summary: &'a str,
    pub qa_history: &'a [QaPair],
    pub is_fresher: bool,
    pub mode: InterviewMode,
    pub project_readme: &'a str,
    pub project_name: &'a str,
    pub resume_text: &'a str,
}

/// Difficulty tier injected into the prompt. Steers the model; nothing
/// downstream enforces it.
pub fn phase_for(question_number: usize) -> &'static str {
    match question_number {
        0..=2 => "basic warm-up",
        3..=4 => "intermediate",
        _ => "advanced probing",
    }
}

/// Renders prior rounds as indexed Q/A blocks, or the literal no-history marker.
pub fn format_history(qa_history: &[QaPair]) -> String {
    if qa_history.is_empty() {
        return "No previous questions.".to_string();
    }
    let mut out = String::new();
    for (i, qa) in qa_history.iter().enumerate() {
        out.push_str(&format!(
            "Q{n}: {}\nA{n}: {}\n\n",
            qa.question,
            qa.answer,
            n = i + 1
        ));
    }
    out
}

/// Post-generation cleanup. Guarantees a non-empty, single-question string:
/// - empty output → fixed fallback question
/// - output containing a code fence → passed through byte-for-byte
///   (multi-line code must survive exactly)
/// - otherwise list numbering is stripped per line, lines are joined with
///   spaces, and a trailing `?` is ensured
pub fn sanitize_question(text: &str) -> String {
    if text.trim().is_empty() {
        return FALLBACK_QUESTION.to_string();
    }

    if text.contains("```") {
        return text.to_string();
    }

    let cleaned: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| {
            l.trim_start_matches(|c: char| {
                c.is_ascii_digit() || c == '.' || c == '-' || c == ')' || c == ' '
            })
            .trim()
        })
        .filter(|l| !l.is_empty())
        .collect();

    let mut question = cleaned.join(" ");
    if question.is_empty() {
        return FALLBACK_QUESTION.to_string();
    }
    if !question.ends_with('?') {
        question.push('?');
    }
    question
}

/// Generates the next question for a session.
///
/// Source priority, first match wins:
/// 1. project mode with a non-empty README → project-interview template
/// 2. resume present and round 1 or 3 → resume template
/// 3. otherwise → topic template (role, phase, confidence, competence, history)
pub async fn generate_next_question(llm: &dyn TextGenerator, ctx: QuestionContext<'_>) -> String {
    let question_number = ctx.qa_history.len() + 1;
    let history = format_history(ctx.qa_history);

    let prompt = if ctx.mode == InterviewMode::Project && !ctx.project_readme.is_empty() {
        build_project_prompt(ctx.project_name, ctx.project_readme)
    } else if !ctx.resume_text.is_empty() && (question_number == 1 || question_number == 3) {
        build_resume_prompt(ctx.resume_text, &history)
    } else {
        build_question_prompt(
            ctx.role,
            ctx.topic,
            if ctx.is_fresher { "fresher" } else { "experienced" },
            phase_for(question_number),
            ctx.confidence,
            ctx.competence_summary,
            &history,
        )
    };

    let raw = llm
        .generate(&prompt, DEFAULT_TEMPERATURE, DEFAULT_MAX_TOKENS)
        .await;
    sanitize_question(&raw)
}
