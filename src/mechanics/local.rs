//! Local git repository inspection

use super::MechanicsError;
use crate::models::{CommitInfo, RemoteRepo};
use chrono::{TimeZone, Utc};
use git2::{ErrorCode, Repository, Sort};
use std::path::Path;

/// The git repository a lab lives in
pub struct LocalRepo {
    repo: Repository,
}

impl LocalRepo {
    /// Find the repository containing `path`, searching parent directories
    pub fn discover(path: &Path) -> Result<Self, MechanicsError> {
        let repo = Repository::discover(path)?;
        tracing::debug!(workdir = ?repo.workdir(), "discovered git repository");
        Ok(Self { repo })
    }

    pub fn head_sha(&self) -> Result<String, MechanicsError> {
        let head = self.repo.head()?.peel_to_commit()?;
        Ok(head.id().to_string())
    }

    /// Short name of the checked-out branch, `None` when HEAD is detached
    pub fn current_branch(&self) -> Option<String> {
        let head = self.repo.head().ok()?;
        if head.is_branch() {
            head.shorthand().map(str::to_string)
        } else {
            None
        }
    }

    /// Every commit reachable from HEAD, newest first; empty before the first commit
    pub fn commits(&self) -> Result<Vec<CommitInfo>, MechanicsError> {
        if let Err(e) = self.repo.head() {
            if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) {
                return Ok(Vec::new());
            }
            return Err(e.into());
        }

        let mut walk = self.repo.revwalk()?;
        walk.push_head()?;
        walk.set_sorting(Sort::TIME)?;

        let mut commits = Vec::new();
        for oid in walk {
            let commit = self.repo.find_commit(oid?)?;
            let author = commit.author();
            commits.push(CommitInfo {
                sha: commit.id().to_string(),
                author: author.name().unwrap_or_default().to_string(),
                summary: commit.summary().unwrap_or_default().to_string(),
                time: Utc
                    .timestamp_opt(commit.time().seconds(), 0)
                    .single()
                    .unwrap_or_default(),
            });
        }
        Ok(commits)
    }

    /// `user.name` from the git config, the identity commits are counted for
    pub fn author_name(&self) -> Option<String> {
        self.repo.config().ok()?.get_string("user.name").ok()
    }

    /// Hosted repository behind the `origin` remote
    pub fn origin(&self) -> Result<RemoteRepo, MechanicsError> {
        let remote = self
            .repo
            .find_remote("origin")
            .map_err(|_| MechanicsError::MissingRemote("origin".to_string()))?;
        let url = remote
            .url()
            .ok_or_else(|| MechanicsError::MissingRemote("origin".to_string()))?;
        parse_remote_url(url).ok_or_else(|| MechanicsError::UnparsableRemote(url.to_string()))
    }
}

/// Split a remote URL into owner and repository name.
///
/// Handles `https://host/owner/repo(.git)`, `git@host:owner/repo(.git)` and
/// `ssh://git@host/owner/repo(.git)`.
pub fn parse_remote_url(url: &str) -> Option<RemoteRepo> {
    let trimmed = url.trim().trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);

    let mut parts = trimmed.rsplit(['/', ':']);
    let name = parts.next().filter(|s| !s.is_empty())?;
    let owner = parts.next().filter(|s| !s.is_empty())?;
    // The owner must be preceded by a host
    parts.next().filter(|s| !s.is_empty())?;

    Some(RemoteRepo {
        owner: owner.to_string(),
        name: name.to_string(),
    })
}
