//! GitHub collaborator — URL validation, repo-name extraction, and README
//! fetching for project-mode interviews. Fetch failures degrade to an empty
//! string; the engine substitutes its no-README marker.

use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

fn github_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^https://github\.com/[\w\-]+/[\w\-]+").expect("valid regex")
    })
}

/// True for URLs of the form `https://github.com/<owner>/<repo>`.
pub fn is_valid_github_url(url: &str) -> bool {
    github_url_pattern().is_match(url)
}

/// Last path segment of the repository URL.
pub fn extract_repo_name(repo_url: &str) -> String {
    repo_url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// README fetcher seam — swapped for a canned fake in engine tests.
#[async_trait]
pub trait ReadmeFetcher: Send + Sync {
    /// Returns the README body, or an empty string on any failure.
    async fn fetch_readme(&self, repo_url: &str) -> String;
}

/// Production fetcher against the GitHub contents API.
pub struct GithubFetcher {
    client: reqwest::Client,
}

impl GithubFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(15))
                .build()
                .expect("Failed to build HTTP client"),
        }
    }
}

impl Default for GithubFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadmeFetcher for GithubFetcher {
    async fn fetch_readme(&self, repo_url: &str) -> String {
        let api = repo_url.replace("github.com", "api.github.com/repos");
        let url = format!("{api}/readme");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github.v3.raw")
            .header("User-Agent", "ai-mock-interviewer")
            .send()
            .await;

        match response {
            Ok(r) if r.status().is_success() => r.text().await.unwrap_or_default(),
            Ok(r) => {
                warn!("README fetch for {repo_url} returned {}", r.status());
                String::new()
            }
            Err(e) => {
                warn!("README fetch error for {repo_url}: {e}");
                String::new()
            }
        }
    }
}
