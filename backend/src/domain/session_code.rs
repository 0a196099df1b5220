//! Short human-enterable session codes.
//!
//! A code is the constant prefix `S-` followed by six uppercase hex digits
//! drawn from a freshly generated UUIDv4. Generation is pure; uniqueness is
//! enforced by the storage layer's constraint on `session_code`, and the
//! lifecycle service retries generation when that constraint fires.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the randomised suffix after the `S-` prefix.
const SUFFIX_LEN: usize = 6;

/// Constant prefix marking attendance session codes.
const PREFIX: &str = "S-";

/// A validated, uppercase-normalised session code such as `S-7F3A2B`.
///
/// # Examples
/// ```
/// use backend::domain::SessionCode;
///
/// let code = SessionCode::generate();
/// assert!(code.as_str().starts_with("S-"));
/// assert_eq!(code.as_str().len(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionCode(String);

/// Rejections produced by [`SessionCode::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionCodeError {
    /// The code does not start with the `S-` prefix.
    #[error("session code must start with `S-`")]
    MissingPrefix,
    /// The suffix has the wrong length or non-alphanumeric characters.
    #[error("session code suffix must be {SUFFIX_LEN} alphanumeric characters")]
    MalformedSuffix,
}

impl SessionCode {
    /// Generate a fresh code from a UUIDv4.
    ///
    /// Collision probability over the six-hex-digit space is negligible for
    /// one school term but not zero; persistence treats the code column as
    /// unique and callers regenerate on conflict.
    pub fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        let suffix: String = hex.chars().take(SUFFIX_LEN).collect();
        Self(format!("{PREFIX}{}", suffix.to_uppercase()))
    }

    /// Parse and uppercase-normalise student input.
    ///
    /// Lookups are case-insensitive so codes survive manual entry on phones
    /// that autocapitalise inconsistently.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::SessionCode;
    ///
    /// let code = SessionCode::parse("s-7f3a2b")?;
    /// assert_eq!(code.as_str(), "S-7F3A2B");
    /// # Ok::<(), backend::domain::SessionCodeError>(())
    /// ```
    pub fn parse(raw: &str) -> Result<Self, SessionCodeError> {
        let normalised = raw.trim().to_uppercase();
        let suffix = normalised
            .strip_prefix(PREFIX)
            .ok_or(SessionCodeError::MissingPrefix)?;
        if suffix.len() != SUFFIX_LEN || !suffix.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(SessionCodeError::MalformedSuffix);
        }
        Ok(Self(normalised))
    }

    /// Borrow the canonical string form.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for SessionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SessionCode> for String {
    fn from(code: SessionCode) -> Self {
        code.0
    }
}

impl TryFrom<String> for SessionCode {
    type Error = SessionCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}
