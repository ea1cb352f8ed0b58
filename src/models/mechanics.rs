use chrono::{DateTime, Utc};
use serde::Serialize;

/// A commit as seen in the local history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitInfo {
    pub sha: String,
    pub author: String,
    pub summary: String,
    pub time: DateTime<Utc>,
}

/// `owner/name` pair of a hosted repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteRepo {
    pub owner: String,
    pub name: String,
}

impl RemoteRepo {
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Result of one mechanics check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum CheckOutcome {
    Passed(String),
    Failed(String),
    /// The check could not be carried out (missing remote, network failure, ...)
    Errored(String),
}

impl CheckOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, CheckOutcome::Passed(_))
    }

    pub fn detail(&self) -> &str {
        match self {
            CheckOutcome::Passed(d) | CheckOutcome::Failed(d) | CheckOutcome::Errored(d) => d,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CheckOutcome::Passed(_) => "✅",
            CheckOutcome::Failed(_) => "❌",
            CheckOutcome::Errored(_) => "⚠️",
        }
    }
}

/// Outcome of the three mechanics checks for one lab
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MechanicsReport {
    pub repo_link: CheckOutcome,
    pub latest_version: CheckOutcome,
    pub commits: CheckOutcome,
}

impl MechanicsReport {
    pub fn all_passed(&self) -> bool {
        self.repo_link.is_passed() && self.latest_version.is_passed() && self.commits.is_passed()
    }

    /// Checks paired with their display names, in report order
    pub fn checks(&self) -> [(&'static str, &CheckOutcome); 3] {
        [
            ("Repository link", &self.repo_link),
            ("Latest version pushed", &self.latest_version),
            ("At least three commits", &self.commits),
        ]
    }
}
