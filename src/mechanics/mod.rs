//! Mechanics checks
//!
//! Three independent checks on a student's lab repository: the document links
//! the lab repository, the latest local commit has been pushed, and the student
//! authored enough commits. A check that cannot be carried out is reported as
//! errored without affecting the other two.

pub mod commits;
pub mod local;
pub mod remote;
pub mod repo_link;

pub use commits::{check_commits, count_authored, DEFAULT_COMMIT_THRESHOLD};
pub use local::{parse_remote_url, LocalRepo};
pub use remote::{check_latest_version, CommitSource, Credential, GitHubClient, TOKEN_ENV};
pub use repo_link::{check_repo_link, find_repo_link, RepoLinkPattern};

use crate::models::{CheckOutcome, Line, MechanicsConfig, MechanicsReport};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum MechanicsError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} failed with status {status}")]
    Status { status: u16, url: String },

    #[error("Remote '{0}' is not configured")]
    MissingRemote(String),

    #[error("Cannot determine repository from remote URL '{0}'")]
    UnparsableRemote(String),
}

/// Runs the mechanics checks for one lab
pub struct MechanicsChecker<'a, S: CommitSource> {
    config: &'a MechanicsConfig,
    source: &'a S,
}

impl<'a, S: CommitSource> MechanicsChecker<'a, S> {
    pub fn new(config: &'a MechanicsConfig, source: &'a S) -> Self {
        Self { config, source }
    }

    /// Check the lab whose flattened lines are `lines` and which lives in `lab_dir`
    pub async fn run(
        &self,
        lines: &[Line],
        lab_dir: &Path,
        credential: Option<&Credential>,
    ) -> MechanicsReport {
        let repo_link = self.check_link(lines);

        let (latest_version, commits) = match LocalRepo::discover(lab_dir) {
            Ok(repo) => (
                self.check_version(&repo, credential).await,
                self.check_history(&repo),
            ),
            Err(e) => {
                tracing::warn!(dir = %lab_dir.display(), error = %e, "no git repository for lab");
                let outcome = CheckOutcome::Errored(format!("No git repository found: {}", e));
                (outcome.clone(), outcome)
            }
        };

        MechanicsReport {
            repo_link,
            latest_version,
            commits,
        }
    }

    fn check_link(&self, lines: &[Line]) -> CheckOutcome {
        let pattern = match RepoLinkPattern::from_config(self.config) {
            Ok(p) => p,
            Err(e) => return CheckOutcome::Errored(format!("Invalid repository link pattern: {}", e)),
        };

        match find_repo_link(lines, &pattern) {
            Some(link) => CheckOutcome::Passed(format!("Found {}", link)),
            None => CheckOutcome::Failed("No link to your lab repository in the document".to_string()),
        }
    }

    async fn check_version(&self, repo: &LocalRepo, credential: Option<&Credential>) -> CheckOutcome {
        let Some(credential) = credential else {
            return CheckOutcome::Errored(format!(
                "No access token; pass --token or set {}",
                TOKEN_ENV
            ));
        };

        let local_sha = match repo.head_sha() {
            Ok(sha) => sha,
            Err(e) => return CheckOutcome::Errored(e.to_string()),
        };
        let remote = match repo.origin() {
            Ok(remote) => remote,
            Err(e) => return CheckOutcome::Errored(e.to_string()),
        };
        let branch = self
            .config
            .branch
            .clone()
            .or_else(|| repo.current_branch())
            .unwrap_or_else(|| "main".to_string());

        match self.source.latest_commit_sha(&remote, &branch, credential).await {
            Ok(remote_sha) if check_latest_version(&local_sha, &remote_sha) => {
                CheckOutcome::Passed(format!("{} is at {}", branch, short_sha(&local_sha)))
            }
            Ok(remote_sha) => CheckOutcome::Failed(format!(
                "Local {} is at {} but {} has {}; push your work",
                branch,
                short_sha(&local_sha),
                remote.slug(),
                short_sha(&remote_sha)
            )),
            Err(e) => CheckOutcome::Errored(e.to_string()),
        }
    }

    fn check_history(&self, repo: &LocalRepo) -> CheckOutcome {
        let Some(author) = repo.author_name() else {
            return CheckOutcome::Errored("git user.name is not set".to_string());
        };
        let commits = match repo.commits() {
            Ok(commits) => commits,
            Err(e) => return CheckOutcome::Errored(e.to_string()),
        };

        let threshold = self.config.commit_threshold;
        let authored = count_authored(&author, &commits);
        let detail = format!("{} of {} commits authored by {}", authored, commits.len(), author);
        if check_commits(&author, &commits, threshold) {
            CheckOutcome::Passed(detail)
        } else {
            CheckOutcome::Failed(format!("{} (need {})", detail, threshold))
        }
    }
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
