//! Interview pipeline: session state machine plus the four components it
//! drives — answer evaluation, competence estimation, question generation,
//! and final-report generation.

pub mod competence;
pub mod engine;
pub mod evaluator;
pub mod handlers;
pub mod prompts;
pub mod question;
pub mod report;
pub mod session;
