//! Reviewer role types and well-known role name constants.
//!
//! The constants must match the seed data in
//! `db/migrations/20260801000001_create_review_schema.sql`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_CREATOR: &str = "creator";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CLIENT: &str = "client";

/// All valid role name strings.
pub const VALID_ROLES: &[&str] = &[ROLE_CREATOR, ROLE_ADMIN, ROLE_CLIENT];

/// A party acting on a submission.
///
/// The transition table in [`crate::workflow`] is keyed per role; the
/// external permission gate answers the coarser "may this role act at all"
/// question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewerRole {
    Creator,
    Admin,
    Client,
}

impl ReviewerRole {
    /// Return the role as its canonical lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Creator => ROLE_CREATOR,
            Self::Admin => ROLE_ADMIN,
            Self::Client => ROLE_CLIENT,
        }
    }

    /// Parse a role from its string name.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            ROLE_CREATOR => Ok(Self::Creator),
            ROLE_ADMIN => Ok(Self::Admin),
            ROLE_CLIENT => Ok(Self::Client),
            _ => Err(CoreError::Validation(format!(
                "Invalid role '{s}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for ReviewerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trip() {
        for role in [ReviewerRole::Creator, ReviewerRole::Admin, ReviewerRole::Client] {
            assert_eq!(ReviewerRole::parse(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn invalid_role_rejected() {
        let err = ReviewerRole::parse("owner").unwrap_err();
        assert!(err.to_string().contains("Invalid role"));
    }

    #[test]
    fn empty_role_rejected() {
        assert!(ReviewerRole::parse("").is_err());
    }
}
