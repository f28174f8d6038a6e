//! Path identifier validation
//!
//! Entity ids arrive as path segments and are forwarded to backends
//! verbatim, so they are checked before any normalization or dispatch.
//! Fields are private to force validation through [`ResourceId::new`].

use std::fmt;

pub const MAX_ID_LEN: usize = 64;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum IdentifierError {
    #[error("Invalid length for id: expected 1-{max}, got {actual}")]
    InvalidLength { max: usize, actual: usize },

    #[error("Invalid format for id: '{value}' (expected: letters, digits, '_' or '-')")]
    InvalidFormat { value: String },
}

/// Validated entity identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId(String);

impl ResourceId {
    /// # Validation Rules
    /// - Length: 1-64 characters
    /// - Regex: ^[A-Za-z0-9_-]{1,64}$
    ///
    /// # Examples
    /// ```
    /// use erp_gateway::gateway::validation::ResourceId;
    ///
    /// let id = ResourceId::new("acc-1000").unwrap();
    /// assert_eq!(id.as_str(), "acc-1000");
    ///
    /// assert!(ResourceId::new("../etc").is_err());
    /// ```
    pub fn new(raw: &str) -> Result<Self, IdentifierError> {
        if raw.is_empty() || raw.len() > MAX_ID_LEN {
            return Err(IdentifierError::InvalidLength {
                max: MAX_ID_LEN,
                actual: raw.len(),
            });
        }

        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(IdentifierError::InvalidFormat {
                value: raw.to_string(),
            });
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
