// ABOUTME: Registry repository name validation.
// ABOUTME: Ensures names follow registry repository naming requirements.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryNameError {
    #[error("repository name cannot be empty")]
    Empty,

    #[error("repository name exceeds maximum length of 256 characters")]
    TooLong,

    #[error("repository name must be lowercase")]
    NotLowercase,

    #[error("repository name cannot start with a separator")]
    StartsWithSeparator,

    #[error("repository name cannot end with a separator")]
    EndsWithSeparator,

    #[error("invalid character in repository name: '{0}'")]
    InvalidChar(char),
}

/// A validated registry repository name, e.g. `my-app` or `team/my-app`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub fn new(value: &str) -> Result<Self, RepositoryNameError> {
        if value.is_empty() {
            return Err(RepositoryNameError::Empty);
        }

        if value.len() > 256 {
            return Err(RepositoryNameError::TooLong);
        }

        let is_separator = |c: char| c == '.' || c == '_' || c == '-' || c == '/';

        if value.starts_with(is_separator) {
            return Err(RepositoryNameError::StartsWithSeparator);
        }

        if value.ends_with(is_separator) {
            return Err(RepositoryNameError::EndsWithSeparator);
        }

        for c in value.chars() {
            if c.is_ascii_uppercase() {
                return Err(RepositoryNameError::NotLowercase);
            }
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() && !is_separator(c) {
                return Err(RepositoryNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact-match comparison against an unvalidated repository string.
    pub fn matches(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
