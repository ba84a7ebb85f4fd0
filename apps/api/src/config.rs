use anyhow::{Context, Result};

/// Default skip phrases — substrings that mark an answer as a skip.
/// Overridable via the SKIP_PHRASES env var (comma-separated).
pub const DEFAULT_SKIP_PHRASES: &[&str] = &[
    "don't know",
    "dont know",
    "do not know",
    "no idea",
    "skip",
    "not sure",
];

/// Default number of rounds before the interview terminates with a report.
pub const DEFAULT_MAX_QUESTIONS: u32 = 5;

/// Application configuration loaded from environment variables.
/// Panics at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Rounds per interview. Default 5.
    pub max_questions: u32,
    /// Substrings that mark an answer as skipped. Lowercase.
    pub skip_phrases: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let skip_phrases = match std::env::var("SKIP_PHRASES") {
            Ok(raw) => raw
                .split(',')
                .map(|p| p.trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
            Err(_) => DEFAULT_SKIP_PHRASES.iter().map(|p| p.to_string()).collect(),
        };

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_questions: std::env::var("MAX_QUESTIONS")
                .unwrap_or_else(|_| DEFAULT_MAX_QUESTIONS.to_string())
                .parse::<u32>()
                .context("MAX_QUESTIONS must be a positive integer")?,
            skip_phrases,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
