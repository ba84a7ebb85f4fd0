//! Resume collaborator — extracts text from an uploaded PDF and checks it
//! actually looks like a resume before it is allowed to steer questions.

use tracing::warn;

/// Extracted text shorter than this is rejected outright.
const MIN_RESUME_CHARS: usize = 300;

/// At least two of these must appear for the document to count as a resume.
const RESUME_KEYWORDS: &[&str] = &[
    "education",
    "experience",
    "skills",
    "projects",
    "internship",
    "certification",
];

/// Validates an uploaded resume PDF. Returns the lowercased extracted text,
/// or a human-readable rejection reason.
pub fn validate_resume(bytes: &[u8]) -> Result<String, String> {
    let text = match pdf_extract::extract_text_from_mem(bytes) {
        Ok(text) => text.to_lowercase(),
        Err(e) => {
            warn!("resume PDF extraction failed: {e}");
            return Err("Unable to read resume file.".to_string());
        }
    };
    validate_resume_text(text)
}

/// Keyword/length gate over already-extracted (lowercased) text.
pub fn validate_resume_text(text: String) -> Result<String, String> {
    if text.trim().chars().count() < MIN_RESUME_CHARS {
        return Err("Resume content is too short.".to_string());
    }

    let hits = RESUME_KEYWORDS.iter().filter(|k| text.contains(**k)).count();
    if hits < 2 {
        return Err("Document does not appear to be a valid resume.".to_string());
    }

    Ok(text)
}
