//! Session State Machine — drives evaluator, competence estimator, question
//! generator and report generator in sequence, and decides termination.
//!
//! All collaborators are trait objects so the whole flow runs in tests with a
//! scripted gateway and an in-memory store.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::github::{extract_repo_name, is_valid_github_url, ReadmeFetcher};
use crate::interview::competence::estimate_competence;
use crate::interview::evaluator::evaluate_answer;
use crate::interview::question::{generate_next_question, QuestionContext};
use crate::interview::report::generate_final_report;
use crate::interview::session::{
    InterviewMode, InterviewSession, SessionState, SessionStore, QaPair,
};
use crate::llm_client::TextGenerator;

/// Substituted when a project repository has no fetchable README.
const NO_README_FALLBACK: &str =
    "README not available. Ask high-level project architecture questions.";

/// Competence summary used for the very first question of a session.
const INITIAL_SUMMARY: &str = "Interview started";

/// Recorded when the candidate submits an empty answer.
const EMPTY_ANSWER: &str = "Don't know";

/// Validated inputs for starting a session. The resume, if any, has already
/// been extracted and validated by the transport layer.
pub struct StartRequest {
    pub name: String,
    pub mode: InterviewMode,
    pub role: Option<String>,
    pub topic: Option<String>,
    pub confidence: u8,
    pub resume_text: String,
    pub github_url: Option<String>,
}

/// Result of one answer submission: the interview either continues with a new
/// question or terminates with the final report.
pub enum AnswerOutcome {
    NextQuestion(String),
    Completed { report: String },
}

#[derive(Clone)]
pub struct InterviewEngine {
    llm: Arc<dyn TextGenerator>,
    store: Arc<dyn SessionStore>,
    fetcher: Arc<dyn ReadmeFetcher>,
    max_questions: u32,
    skip_phrases: Vec<String>,
}

impl InterviewEngine {
    pub fn new(
        llm: Arc<dyn TextGenerator>,
        store: Arc<dyn SessionStore>,
        fetcher: Arc<dyn ReadmeFetcher>,
        max_questions: u32,
        skip_phrases: Vec<String>,
    ) -> Self {
        Self {
            llm,
            store,
            fetcher,
            max_questions,
            skip_phrases,
        }
    }

    /// Creates a session and seeds its first question.
    pub async fn start(&self, req: StartRequest) -> Result<(Uuid, String), AppError> {
        if req.name.trim().is_empty() {
            return Err(AppError::Validation("Name is required".to_string()));
        }

        let (role, topic, confidence, project_readme, project_name) = match req.mode {
            InterviewMode::Normal => {
                let role = req.role.filter(|r| !r.trim().is_empty());
                let topic = req.topic.filter(|t| !t.trim().is_empty());
                match (role, topic) {
                    (Some(role), Some(topic)) => {
                        (role, topic, req.confidence, String::new(), String::new())
                    }
                    _ => {
                        return Err(AppError::Validation(
                            "Role and topic are required".to_string(),
                        ))
                    }
                }
            }
            InterviewMode::Project => {
                let url = req
                    .github_url
                    .filter(|u| is_valid_github_url(u))
                    .ok_or_else(|| {
                        AppError::Validation("Valid GitHub URL is required".to_string())
                    })?;

                let mut readme = self.fetcher.fetch_readme(&url).await;
                if readme.trim().is_empty() {
                    readme = NO_README_FALLBACK.to_string();
                }
                let name = extract_repo_name(&url);

                // Project interviews ignore candidate-supplied role/topic/confidence
                ("Technical".to_string(), "Project".to_string(), 0, readme, name)
            }
        };

        let mut session = InterviewSession::new(
            req.name,
            req.mode,
            role,
            topic,
            confidence,
            req.resume_text,
            project_readme,
            project_name,
        );

        let first_question = generate_next_question(
            self.llm.as_ref(),
            QuestionContext {
                role: &session.role,
                topic: &session.topic,
                confidence: session.confidence,
                competence_summary: INITIAL_SUMMARY,
                qa_history: &session.qa_history,
                is_fresher: true,
                mode: session.mode,
                project_readme: &session.project_readme,
                project_name: &session.project_name,
                resume_text: &session.resume_text,
            },
        )
        .await;

        session.current_question = first_question.clone();
        session.state = SessionState::InProgress;

        let id = session.id;
        info!(session_id = %id, mode = ?session.mode, "interview started");
        self.store.put(session).await;

        Ok((id, first_question))
    }

    /// Records one answer and advances the session: evaluate, re-estimate
    /// competence, then either ask the next question or finish with a report.
    pub async fn submit_answer(
        &self,
        session_id: Uuid,
        answer: &str,
    ) -> Result<AnswerOutcome, AppError> {
        let mut session = self.store.get(session_id).await.ok_or_else(|| {
            AppError::NotFound("Session expired. Please restart interview.".to_string())
        })?;

        let answer = answer.trim();
        let question = session.current_question.clone();

        session.qa_history.push(QaPair {
            question: question.clone(),
            answer: if answer.is_empty() {
                EMPTY_ANSWER.to_string()
            } else {
                answer.to_string()
            },
        });

        let evaluation = evaluate_answer(
            self.llm.as_ref(),
            &self.skip_phrases,
            &session.role,
            &session.topic,
            &question,
            answer,
        )
        .await;
        session.evaluation_history.push(evaluation);
        session.question_count += 1;

        let competence = estimate_competence(
            self.llm.as_ref(),
            &session.topic,
            session.confidence,
            &session.evaluation_history,
        )
        .await;

        if session.question_count >= self.max_questions {
            let report = generate_final_report(
                self.llm.as_ref(),
                &session.role,
                &session.topic,
                session.confidence,
                competence.estimated_competence,
                &session.qa_history,
                &session.name,
            )
            .await;

            session.state = SessionState::Completed;
            info!(session_id = %session_id, rounds = session.question_count, "interview completed");
            self.store.delete(session_id).await;

            return Ok(AnswerOutcome::Completed { report });
        }

        let next_question = generate_next_question(
            self.llm.as_ref(),
            QuestionContext {
                role: &session.role,
                topic: &session.topic,
                confidence: session.confidence,
                competence_summary: &competence.reasoning,
                qa_history: &session.qa_history,
                is_fresher: true,
                mode: session.mode,
                project_readme: &session.project_readme,
                project_name: &session.project_name,
                resume_text: &session.resume_text,
            },
        )
        .await;

        session.current_question = next_question.clone();
        self.store.put(session).await;

        Ok(AnswerOutcome::NextQuestion(next_question))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SKIP_PHRASES;
    use crate::interview::session::InMemorySessionStore;
    use crate::llm_client::testing::ScriptedGenerator;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedFetcher {
        readme: String,
        calls: AtomicUsize,
    }

    impl FixedFetcher {
        fn new(readme: &str) -> Self {
            Self {
                readme: readme.to_string(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ReadmeFetcher for FixedFetcher {
        async fn fetch_readme(&self, _repo_url: &str) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.readme.clone()
        }
    }

    const COMPETENCE_JSON: &str = r#"{"estimated_competence": 5, "confidence_alignment": "aligned", "weak_areas": [], "next_question_intent": "similar", "reasoning": "steady"}"#;
    const COMPLETE_REPORT: &str =
        "1. Final Score & Verdict\n- Final Score: 3/10\n7. Actionable Recommendations\n- Revise basics";

    fn engine(responses: Vec<&str>, fetcher: Arc<FixedFetcher>) -> InterviewEngine {
        InterviewEngine::new(
            Arc::new(ScriptedGenerator::new(responses)),
            Arc::new(InMemorySessionStore::new()),
            fetcher,
            5,
            DEFAULT_SKIP_PHRASES.iter().map(|p| p.to_string()).collect(),
        )
    }

    fn normal_start() -> StartRequest {
        StartRequest {
            name: "Alice".to_string(),
            mode: InterviewMode::Normal,
            role: Some("Backend".to_string()),
            topic: Some("Databases".to_string()),
            confidence: 5,
            resume_text: String::new(),
            github_url: None,
        }
    }

    #[tokio::test]
    async fn test_start_normal_mode_returns_first_question() {
        let eng = engine(vec!["What is a database index"], Arc::new(FixedFetcher::new("")));
        let (_, question) = eng.start(normal_start()).await.unwrap();
        assert!(!question.is_empty());
        assert!(question.ends_with('?') || question.contains("```"));
    }

    #[tokio::test]
    async fn test_start_requires_name() {
        let eng = engine(vec![], Arc::new(FixedFetcher::new("")));
        let mut req = normal_start();
        req.name = "  ".to_string();
        assert!(matches!(
            eng.start(req).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_start_normal_requires_role_and_topic() {
        let eng = engine(vec![], Arc::new(FixedFetcher::new("")));
        let mut req = normal_start();
        req.topic = None;
        assert!(matches!(
            eng.start(req).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_project_mode_rejects_invalid_url_before_any_fetch() {
        let fetcher = Arc::new(FixedFetcher::new("readme"));
        let eng = engine(vec![], fetcher.clone());
        let req = StartRequest {
            name: "Alice".to_string(),
            mode: InterviewMode::Project,
            role: None,
            topic: None,
            confidence: 7,
            resume_text: String::new(),
            github_url: Some("not-a-url".to_string()),
        };
        assert!(matches!(
            eng.start(req).await,
            Err(AppError::Validation(_))
        ));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_project_mode_forces_role_topic_and_uses_readme() {
        let fetcher = Arc::new(FixedFetcher::new("A task queue in Rust"));
        let llm = Arc::new(ScriptedGenerator::new(vec!["Why a queue"]));
        let eng = InterviewEngine::new(
            llm.clone(),
            Arc::new(InMemorySessionStore::new()),
            fetcher,
            5,
            vec![],
        );
        let req = StartRequest {
            name: "Alice".to_string(),
            mode: InterviewMode::Project,
            role: None,
            topic: None,
            confidence: 7,
            resume_text: String::new(),
            github_url: Some("https://github.com/alice/taskq".to_string()),
        };
        eng.start(req).await.unwrap();
        let prompts = llm.prompts.lock().unwrap();
        assert!(prompts[0].contains("Project name: taskq"));
        assert!(prompts[0].contains("A task queue in Rust"));
    }

    #[tokio::test]
    async fn test_project_mode_empty_readme_gets_fallback_marker() {
        let fetcher = Arc::new(FixedFetcher::new(""));
        let llm = Arc::new(ScriptedGenerator::new(vec!["Describe the architecture"]));
        let eng = InterviewEngine::new(
            llm.clone(),
            Arc::new(InMemorySessionStore::new()),
            fetcher,
            5,
            vec![],
        );
        let req = StartRequest {
            name: "Alice".to_string(),
            mode: InterviewMode::Project,
            role: None,
            topic: None,
            confidence: 0,
            resume_text: String::new(),
            github_url: Some("https://github.com/alice/taskq".to_string()),
        };
        eng.start(req).await.unwrap();
        let prompts = llm.prompts.lock().unwrap();
        assert!(prompts[0].contains(NO_README_FALLBACK));
    }

    #[tokio::test]
    async fn test_dont_know_answer_scores_two_and_continues() {
        let eng = engine(
            vec!["What is an index", COMPETENCE_JSON, "What is a join"],
            Arc::new(FixedFetcher::new("")),
        );
        let (id, _) = eng.start(normal_start()).await.unwrap();

        let outcome = eng.submit_answer(id, "I don't know").await.unwrap();
        let next = match outcome {
            AnswerOutcome::NextQuestion(q) => q,
            AnswerOutcome::Completed { .. } => panic!("should not complete after one round"),
        };
        assert_eq!(next, "What is a join?");
    }

    #[tokio::test]
    async fn test_empty_answer_recorded_as_dont_know() {
        let store = Arc::new(InMemorySessionStore::new());
        let llm = Arc::new(ScriptedGenerator::new(vec![
            "What is an index",
            COMPETENCE_JSON,
            "What is a join",
        ]));
        let eng = InterviewEngine::new(
            llm,
            store.clone(),
            Arc::new(FixedFetcher::new("")),
            5,
            DEFAULT_SKIP_PHRASES.iter().map(|p| p.to_string()).collect(),
        );
        let (id, _) = eng.start(normal_start()).await.unwrap();
        eng.submit_answer(id, "   ").await.unwrap();

        let session = store.get(id).await.unwrap();
        assert_eq!(session.qa_history[0].answer, "Don't know");
        assert_eq!(session.evaluation_history[0].score, 2);
        assert_eq!(session.question_count, 1);
        assert_eq!(
            session.qa_history.len(),
            session.evaluation_history.len()
        );
    }

    #[tokio::test]
    async fn test_five_answers_complete_the_interview() {
        // Skipped answers never hit the gateway, so each of the first four
        // rounds consumes competence + next question; the fifth consumes
        // competence + report.
        let mut responses = vec!["Q1 text"];
        for i in 2..=5 {
            responses.push(COMPETENCE_JSON);
            responses.push(match i {
                2 => "Q2 text",
                3 => "Q3 text",
                4 => "Q4 text",
                _ => "Q5 text",
            });
        }
        responses.push(COMPETENCE_JSON);
        responses.push(COMPLETE_REPORT);

        let store = Arc::new(InMemorySessionStore::new());
        let eng = InterviewEngine::new(
            Arc::new(ScriptedGenerator::new(responses)),
            store.clone(),
            Arc::new(FixedFetcher::new("")),
            5,
            DEFAULT_SKIP_PHRASES.iter().map(|p| p.to_string()).collect(),
        );
        let (id, _) = eng.start(normal_start()).await.unwrap();

        for _ in 0..4 {
            let outcome = eng.submit_answer(id, "skip").await.unwrap();
            assert!(matches!(outcome, AnswerOutcome::NextQuestion(_)));
        }

        let outcome = eng.submit_answer(id, "skip").await.unwrap();
        match outcome {
            AnswerOutcome::Completed { report } => {
                assert!(!report.is_empty());
                assert!(report.contains("Actionable Recommendations"));
            }
            AnswerOutcome::NextQuestion(_) => panic!("fifth answer must complete the interview"),
        }

        // completed sessions are discarded
        assert!(store.get(id).await.is_none());
        assert!(matches!(
            eng.submit_answer(id, "anything").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let eng = engine(vec![], Arc::new(FixedFetcher::new("")));
        assert!(matches!(
            eng.submit_answer(Uuid::new_v4(), "hello").await,
            Err(AppError::NotFound(_))
        ));
    }
}
