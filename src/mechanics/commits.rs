use crate::models::CommitInfo;

pub const DEFAULT_COMMIT_THRESHOLD: usize = 3;

/// Number of commits whose author name matches `author`
pub fn count_authored(author: &str, commits: &[CommitInfo]) -> usize {
    commits.iter().filter(|c| c.author == author).count()
}

/// True when `author` wrote at least `threshold` of the commits
pub fn check_commits(author: &str, commits: &[CommitInfo], threshold: usize) -> bool {
    count_authored(author, commits) >= threshold
}
