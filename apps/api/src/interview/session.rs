//! Session records and the injected session store.
//!
//! One `InterviewSession` per candidate run, keyed by a v4 UUID. The store is
//! the only shared mutable state in the service; the default backend is an
//! in-process map. `get` hands out a clone and `put` overwrites whole records
//! (last-writer-wins per id), which keeps `qa_history` and
//! `evaluation_history` index-aligned as long as answers for one session
//! arrive sequentially — the documented contract.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::interview::evaluator::EvaluationRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewMode {
    Normal,
    Project,
}

impl InterviewMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(Self::Normal),
            "project" => Some(Self::Project),
            _ => None,
        }
    }
}

/// Lifecycle of a session. Strictly forward: Created → InProgress → Completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Created,
    InProgress,
    Completed,
}

/// One interview round: the question asked and the answer given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// One candidate run. Created on start, mutated once per answer, discarded
/// after the final report.
#[derive(Debug, Clone)]
pub struct InterviewSession {
    pub id: Uuid,
    pub state: SessionState,
    pub name: String,
    pub mode: InterviewMode,
    pub role: String,
    pub topic: String,
    /// Self-reported, 0–10. Forced to 0 in project mode.
    pub confidence: u8,
    /// Immutable for the session lifetime; empty when no resume was supplied.
    pub resume_text: String,
    pub project_readme: String,
    pub project_name: String,
    /// Append-only, index-aligned with `evaluation_history`.
    pub qa_history: Vec<QaPair>,
    pub evaluation_history: Vec<EvaluationRecord>,
    /// Incremented once per answered question; termination trigger.
    pub question_count: u32,
    /// The question awaiting an answer. Overwritten each round.
    pub current_question: String,
}

impl InterviewSession {
    pub fn new(
        name: String,
        mode: InterviewMode,
        role: String,
        topic: String,
        confidence: u8,
        resume_text: String,
        project_readme: String,
        project_name: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SessionState::Created,
            name,
            mode,
            role,
            topic,
            confidence,
            resume_text,
            project_readme,
            project_name,
            qa_history: Vec::new(),
            evaluation_history: Vec::new(),
            question_count: 0,
            current_question: String::new(),
        }
    }
}

/// Injected session storage. The state machine never touches a concrete map,
/// so it stays testable without a live process; multi-instance deployments
/// can back this with an external keyed store.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Option<InterviewSession>;
    async fn put(&self, session: InterviewSession);
    async fn delete(&self, id: Uuid);
}

/// Default backend: a process-wide map. No expiry — records live until the
/// report is produced or the process restarts.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<Uuid, InterviewSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: Uuid) -> Option<InterviewSession> {
        self.sessions.lock().unwrap().get(&id).cloned()
    }

    async fn put(&self, session: InterviewSession) {
        self.sessions.lock().unwrap().insert(session.id, session);
    }

    async fn delete(&self, id: Uuid) {
        self.sessions.lock().unwrap().remove(&id);
    }
}
