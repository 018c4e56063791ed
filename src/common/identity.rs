use serde::{Deserialize, Serialize};

/// The signed-in user, as handed over by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurrentUser {
    #[serde(rename = "currentUserId")]
    pub id: String,
    #[serde(rename = "currentUserImg")]
    pub img: String,
    #[serde(
        rename = "currentUserProfile",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub profile: Option<String>,
    #[serde(rename = "currentUserFullName")]
    pub full_name: String,
}

impl CurrentUser {
    pub fn new(id: impl Into<String>, full_name: impl Into<String>, img: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            img: img.into(),
            profile: None,
            full_name: full_name.into(),
        }
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }
}

impl core::fmt::Display for CurrentUser {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.full_name, self.id)
    }
}
