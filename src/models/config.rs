use serde::{Deserialize, Serialize};
use std::path::Path;

// =============================================================================
// Mechanics Configuration
// =============================================================================

/// Where the course repositories live and what a lab repository link looks like
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MechanicsConfig {
    /// Enterprise host suffix, links look like `github.<host>/...`
    pub host: String,

    /// Regex fragment matching the organization name
    pub org_pattern: String,

    /// Regex fragment matching the course code
    pub course_pattern: String,

    /// Minimum number of commits the student must author
    pub commit_threshold: usize,

    /// REST API root of the code host
    pub api_base: String,

    /// Branch compared against the remote; defaults to the checked-out branch
    pub branch: Option<String>,

    /// Page where students create personal access tokens
    pub token_url: String,
}

impl Default for MechanicsConfig {
    fn default() -> Self {
        Self {
            host: "ubc.ca".to_string(),
            org_pattern: "MDS-[0-9]{4}-[0-9]{2}".to_string(),
            course_pattern: "DSCI_[0-9]{3}".to_string(),
            commit_threshold: 3,
            api_base: "https://github.ubc.ca/api/v3".to_string(),
            branch: None,
            token_url: "https://github.ubc.ca/settings/tokens".to_string(),
        }
    }
}

// =============================================================================
// Tally Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TallyConfig {
    /// Append the `All` margin row to the summary table
    pub margins: bool,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self { margins: true }
    }
}

// =============================================================================
// Labzen Configuration
// =============================================================================

/// Labzen configuration, read from `labzen.toml` in the project root
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LabzenConfig {
    pub mechanics: MechanicsConfig,
    pub tally: TallyConfig,
}

impl LabzenConfig {
    pub const FILE_NAME: &'static str = "labzen.toml";

    /// Load config from labzen.toml, falling back to defaults when absent
    pub fn load(project_root: &Path) -> anyhow::Result<Self> {
        let config_path = project_root.join(Self::FILE_NAME);
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: LabzenConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
