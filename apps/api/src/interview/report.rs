//! Report Generator — renders the full Q/A history into the final-report
//! template and repairs truncated drafts with a single continuation call.

use crate::interview::prompts::{build_continuation_prompt, build_report_prompt};
use crate::interview::session::QaPair;
use crate::llm_client::{TextGenerator, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

/// Section headers whose absence marks the draft as truncated.
/// Must stay in sync with the headings in `prompts::FINAL_REPORT_TEMPLATE`.
const REPORT_MARKERS: &[&str] = &["Final Score", "Actionable Recommendations"];

const CONTINUATION_TEMPERATURE: f32 = 0.4;
const CONTINUATION_MAX_TOKENS: u32 = 1024;

fn format_report_history(qa_history: &[QaPair]) -> String {
    let mut out = String::new();
    for (i, qa) in qa_history.iter().enumerate() {
        out.push_str(&format!(
            "Q{}: {}\nCandidate Answer:\n{}\n\n",
            i + 1,
            qa.question,
            qa.answer
        ));
    }
    out
}

fn looks_truncated(report: &str) -> bool {
    REPORT_MARKERS.iter().any(|marker| !report.contains(marker))
}

/// Produces the final narrative report.
///
/// Every question and full candidate answer goes into the prompt verbatim.
/// If the draft is missing a required section, exactly one continuation call
/// is issued and appended with a blank-line separator; whatever text results
/// is returned as-is — no further repair.
pub async fn generate_final_report(
    llm: &dyn TextGenerator,
    role: &str,
    topic: &str,
    confidence: u8,
    estimated_competence: u8,
    qa_history: &[QaPair],
    candidate_name: &str,
) -> String {
    let date = chrono::Local::now().format("%d %b %Y").to_string();
    let prompt = build_report_prompt(
        candidate_name,
        &date,
        role,
        topic,
        confidence,
        estimated_competence,
        &format_report_history(qa_history),
    );

    let mut report = llm
        .generate(&prompt, DEFAULT_TEMPERATURE, DEFAULT_MAX_TOKENS)
        .await;

    if looks_truncated(&report) {
        let continuation = llm
            .generate(
                &build_continuation_prompt(&report),
                CONTINUATION_TEMPERATURE,
                CONTINUATION_MAX_TOKENS,
            )
            .await;
        report = format!("{}\n\n{}", report.trim_end(), continuation.trim_start());
    }

    report
}
