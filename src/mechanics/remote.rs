//! Remote commit lookup on the course's GitHub instance

use super::MechanicsError;
use crate::models::RemoteRepo;
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;

/// Environment variable the CLI reads the token from
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Personal access token for the code host.
///
/// Passed explicitly to every remote call; never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    fn authorization(&self) -> String {
        format!("token {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Source of the latest pushed commit of a repository branch
#[async_trait]
pub trait CommitSource: Send + Sync {
    async fn latest_commit_sha(
        &self,
        repo: &RemoteRepo,
        branch: &str,
        credential: &Credential,
    ) -> Result<String, MechanicsError>;
}

/// GitHub (Enterprise) REST client
pub struct GitHubClient {
    api_base: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    sha: String,
}

impl GitHubClient {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn commit_url(&self, repo: &RemoteRepo, branch: &str) -> String {
        format!(
            "{}/repos/{}/{}/commits/{}",
            self.api_base, repo.owner, repo.name, branch
        )
    }
}

#[async_trait]
impl CommitSource for GitHubClient {
    async fn latest_commit_sha(
        &self,
        repo: &RemoteRepo,
        branch: &str,
        credential: &Credential,
    ) -> Result<String, MechanicsError> {
        let url = self.commit_url(repo, branch);
        tracing::debug!(%url, "fetching latest remote commit");

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, credential.authorization())
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header(reqwest::header::USER_AGENT, concat!("labzen/", env!("CARGO_PKG_VERSION")))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MechanicsError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let commit: CommitResponse = response.json().await?;
        Ok(commit.sha)
    }
}

/// True when the local HEAD is the commit the remote branch points at
pub fn check_latest_version(local_sha: &str, remote_sha: &str) -> bool {
    let local = local_sha.trim();
    !local.is_empty() && local.eq_ignore_ascii_case(remote_sha.trim())
}
