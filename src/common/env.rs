//! Trait for accessing environment variables in a testable way
//!
//! The terminal host reads the signed-in user from the environment. Routing
//! that through a trait lets tests supply a fake environment instead of
//! mutating process-wide state.

#[cfg(test)]
use std::collections::HashMap;

use crate::common::CurrentUser;

pub const USER_ID_VAR: &str = "COMMENT_USER_ID";
pub const USER_NAME_VAR: &str = "COMMENT_USER_NAME";
pub const USER_IMG_VAR: &str = "COMMENT_USER_IMG";
pub const USER_PROFILE_VAR: &str = "COMMENT_USER_PROFILE";

pub trait EnvProvider {
    /// Get the value of an environment variable
    fn get_var(&self, key: &str) -> Option<String>;

    /// Build the signed-in user from `COMMENT_USER_*` variables.
    ///
    /// Returns `None` when no user id is set, which the section treats as
    /// signed out. The display name falls back to `USER`, then to the id.
    fn current_user(&self) -> Option<CurrentUser> {
        let id = self.get_var(USER_ID_VAR).filter(|id| !id.is_empty())?;
        let full_name = self
            .get_var(USER_NAME_VAR)
            .or_else(|| self.get_var("USER"))
            .unwrap_or_else(|| id.clone());
        let img = self.get_var(USER_IMG_VAR).unwrap_or_default();

        let user = CurrentUser::new(id, full_name, img);
        Some(match self.get_var(USER_PROFILE_VAR) {
            Some(profile) => user.with_profile(profile),
            None => user,
        })
    }
}

/// Production implementation that uses the system environment
pub struct SystemEnvProvider;

impl EnvProvider for SystemEnvProvider {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Test-only mock implementation for environment variables
#[cfg(test)]
#[derive(Default)]
pub struct MockEnvProvider {
    vars: HashMap<String, String>,
}

#[cfg(test)]
impl MockEnvProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_var(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Mock with the id and name of a signed-in user set
    pub fn with_user(id: impl Into<String>, name: impl Into<String>) -> Self {
        let mut mock = Self::new();
        mock.set_var(USER_ID_VAR, id);
        mock.set_var(USER_NAME_VAR, name);
        mock
    }
}

#[cfg(test)]
impl EnvProvider for MockEnvProvider {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
