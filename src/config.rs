use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::common::CurrentUser;

pub const DEFAULT_PLACEHOLDER: &str = "Type your reply here.";
pub const DEFAULT_NO_COMMENTS: &str = "No comments here. Be the first one to comment!";

fn default_true() -> bool {
    true
}

/// Per-mount options of a comment section.
///
/// Everything is optional. A YAML file may set any subset:
///
/// ```yaml
/// current_user:
///   currentUserId: u1
///   currentUserImg: https://example.com/ada.png
///   currentUserFullName: Ada Lovelace
/// comments_count: 120
/// show_timestamp: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionConfig {
    /// Signed-in user; `None` means signed out
    #[serde(default)]
    pub current_user: Option<CurrentUser>,

    /// Overrides the computed total in the section header
    #[serde(default)]
    pub comments_count: Option<usize>,

    #[serde(default = "default_true")]
    pub show_timestamp: bool,

    /// Render an entry's text above its author line
    #[serde(default)]
    pub reply_top: bool,

    #[serde(default)]
    pub placeholder: Option<String>,

    #[serde(default)]
    pub no_comments_message: Option<String>,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            current_user: None,
            comments_count: None,
            show_timestamp: true,
            reply_top: false,
            placeholder: None,
            no_comments_message: None,
        }
    }
}

impl SectionConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| anyhow::anyhow!("Failed to parse YAML: {}", e))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_yaml(&yaml)
    }

    pub fn with_user(mut self, user: Option<CurrentUser>) -> Self {
        self.current_user = user;
        self
    }

    pub fn placeholder(&self) -> &str {
        self.placeholder.as_deref().unwrap_or(DEFAULT_PLACEHOLDER)
    }

    pub fn no_comments_message(&self) -> &str {
        self.no_comments_message
            .as_deref()
            .unwrap_or(DEFAULT_NO_COMMENTS)
    }
}
