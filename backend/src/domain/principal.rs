//! Authenticated principal consumed from the credential collaborator.
//!
//! Registration, login, and password verification happen outside this core.
//! By the time a request reaches a handler the identity layer has already
//! verified the caller and stored a [`Principal`] in the session cookie.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Error;

/// Role separation within a school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Redeems session codes to mark presence.
    Student,
    /// Opens and closes sessions and manages class records.
    Lecturer,
    /// Institution-level tooling; read access to historical sessions.
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Student => write!(f, "student"),
            Self::Lecturer => write!(f, "lecturer"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Verified caller identity carried on every request.
///
/// `display_name` feeds the mark-time snapshot on attendance records, so it
/// reflects the name the identity layer knew at the instant of the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Identity of the student, lecturer, or admin.
    pub id: Uuid,
    /// Role the credential store assigned to this identity.
    pub role: Role,
    /// Tenant (school) the identity belongs to.
    pub school_id: Uuid,
    /// Human-readable name at request time.
    pub display_name: String,
}

impl Principal {
    /// Require the caller to be a student.
    pub fn require_student(&self) -> Result<&Self, Error> {
        if self.role == Role::Student {
            Ok(self)
        } else {
            Err(Error::forbidden("this action is limited to students"))
        }
    }

    /// Require the caller to be a lecturer.
    pub fn require_lecturer(&self) -> Result<&Self, Error> {
        if self.role == Role::Lecturer {
            Ok(self)
        } else {
            Err(Error::forbidden("this action is limited to lecturers"))
        }
    }
}
