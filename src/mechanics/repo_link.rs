use crate::models::{Line, MechanicsConfig};
use regex::Regex;

/// Matches links of the form `github.<host>/<ORG>/<COURSE>_lab<N>_<user>`
#[derive(Debug, Clone)]
pub struct RepoLinkPattern {
    regex: Regex,
}

impl RepoLinkPattern {
    /// Build a pattern from a literal host and regex fragments for the
    /// organization and course parts
    pub fn new(host: &str, org_pattern: &str, course_pattern: &str) -> Result<Self, regex::Error> {
        let pattern = format!(
            r"github\.{}/{}/{}_lab[0-9]+_[A-Za-z0-9_.-]+",
            regex::escape(host),
            org_pattern,
            course_pattern
        );
        Ok(Self {
            regex: Regex::new(&pattern)?,
        })
    }

    pub fn from_config(config: &MechanicsConfig) -> Result<Self, regex::Error> {
        Self::new(&config.host, &config.org_pattern, &config.course_pattern)
    }

    pub fn find<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.regex.find(text).map(|m| m.as_str())
    }
}

/// First repository link found in the document
pub fn find_repo_link<'a>(lines: &'a [Line], pattern: &RepoLinkPattern) -> Option<&'a str> {
    lines.iter().find_map(|line| pattern.find(&line.text))
}

/// True when any line of the document links the student's lab repository
pub fn check_repo_link(lines: &[Line], pattern: &RepoLinkPattern) -> bool {
    find_repo_link(lines, pattern).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_pattern() -> RepoLinkPattern {
        RepoLinkPattern::from_config(&MechanicsConfig::default()).unwrap()
    }

    #[test]
    fn test_find_repo_link_in_markdown_link() {
        let lines = vec![
            Line::new(1, "# Lab 1"),
            Line::new(
                1,
                "Repo: [link](https://github.ubc.ca/MDS-2020-21/DSCI_531_lab1_jdoe)",
            ),
        ];
        assert_eq!(
            find_repo_link(&lines, &default_pattern()),
            Some("github.ubc.ca/MDS-2020-21/DSCI_531_lab1_jdoe")
        );
    }

    #[test]
    fn test_check_repo_link_rejects_other_repos() {
        let pattern = default_pattern();
        let lines = vec![
            Line::new(1, "https://github.com/MDS-2020-21/DSCI_531_lab1_jdoe"),
            Line::new(1, "https://github.ubc.ca/UBC-MDS/DSCI_531_lab1_jdoe"),
            Line::new(2, "https://github.ubc.ca/MDS-2020-21/DSCI_531_labX_jdoe"),
        ];
        assert!(!check_repo_link(&lines, &pattern));
    }

    #[test]
    fn test_custom_host_is_escaped() {
        let pattern = RepoLinkPattern::new("example.edu", "CS-[0-9]+", "CPSC_[0-9]{3}").unwrap();
        assert!(pattern.find("github.example.edu/CS-2024/CPSC_110_lab3_amy").is_some());
        assert!(pattern.find("github.exampleXedu/CS-2024/CPSC_110_lab3_amy").is_none());
    }

    #[test]
    fn test_invalid_fragment_is_error() {
        assert!(RepoLinkPattern::new("ubc.ca", "MDS-(", "DSCI").is_err());
    }
}
