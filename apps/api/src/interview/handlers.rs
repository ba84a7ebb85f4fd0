//! HTTP surface of the interview flow. Handlers stay thin: decode the
//! transport, delegate to the engine, encode the result.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::engine::{AnswerOutcome, StartRequest};
use crate::interview::session::InterviewMode;
use crate::resume::validate_resume;
use crate::state::AppState;

const DEFAULT_CONFIDENCE: u8 = 5;

#[derive(Serialize)]
pub struct StartResponse {
    pub session_id: Uuid,
    pub question: String,
}

#[derive(Deserialize)]
pub struct AnswerRequest {
    pub session_id: Uuid,
    #[serde(default)]
    pub answer: String,
}

#[derive(Serialize)]
pub struct AnswerResponse {
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
}

/// POST /api/interview/start (multipart form)
/// Fields: name, mode, confidence, role, topic, resume (PDF), github_url.
pub async fn handle_start(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<StartResponse>, AppError> {
    let mut name = String::new();
    let mut mode_raw = "normal".to_string();
    let mut confidence = DEFAULT_CONFIDENCE;
    let mut role = None;
    let mut topic = None;
    let mut github_url = None;
    let mut resume_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "resume" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable resume upload: {e}")))?;
                if !bytes.is_empty() {
                    resume_bytes = Some(bytes.to_vec());
                }
            }
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable field: {e}")))?;
                match field_name.as_str() {
                    "name" => name = value,
                    "mode" => mode_raw = value,
                    "confidence" => {
                        confidence = value.trim().parse::<u8>().unwrap_or(DEFAULT_CONFIDENCE).min(10)
                    }
                    "role" => role = Some(value),
                    "topic" => topic = Some(value),
                    "github_url" => github_url = Some(value),
                    _ => {} // unknown fields are ignored
                }
            }
        }
    }

    let mode = InterviewMode::parse(&mode_raw)
        .ok_or_else(|| AppError::Validation("Invalid interview mode".to_string()))?;

    // Resume uploads only steer normal-mode interviews
    let resume_text = match (mode, resume_bytes) {
        (InterviewMode::Normal, Some(bytes)) => {
            validate_resume(&bytes).map_err(AppError::Validation)?
        }
        _ => String::new(),
    };

    let (session_id, question) = state
        .engine
        .start(StartRequest {
            name,
            mode,
            role,
            topic,
            confidence,
            resume_text,
            github_url,
        })
        .await?;

    Ok(Json(StartResponse {
        session_id,
        question,
    }))
}

/// POST /api/interview/answer
/// Returns the next question, or `done: true` with the final report.
pub async fn handle_answer(
    State(state): State<AppState>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    let outcome = state.engine.submit_answer(req.session_id, &req.answer).await?;

    let response = match outcome {
        AnswerOutcome::NextQuestion(next_question) => AnswerResponse {
            done: false,
            next_question: Some(next_question),
            report: None,
        },
        AnswerOutcome::Completed { report } => AnswerResponse {
            done: true,
            next_question: None,
            report: Some(report),
        },
    };

    Ok(Json(response))
}
