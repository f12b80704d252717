//! User model.
//!
//! Exports contain two user shapes. Workspace members carry an id starting with
//! [`MEMBER_ID_PREFIX`], a real name and a profile; everything else (bots,
//! integrations) only carries a plain name. Both are normalized into [`User`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;

/// Identifier prefix reserved for workspace member records.
pub const MEMBER_ID_PREFIX: &str = "U";

/// Nested profile of a member record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MemberProfile {
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MemberRecord {
    id: String,
    real_name: String,
    #[serde(default)]
    profile: Option<MemberProfile>,
}

#[derive(Debug, Deserialize)]
struct OtherRecord {
    id: String,
    name: String,
}

/// A user record as exported, classified by its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawUser {
    Member {
        id: String,
        real_name: String,
        profile: MemberProfile,
    },
    Other {
        id: String,
        name: String,
    },
}

impl RawUser {
    /// Classify and parse a raw user record.
    pub fn from_value(value: Value) -> Result<Self, AppError> {
        let id = value
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::MalformedRecord("User record has no string id".to_string()))?
            .to_string();

        if id.starts_with(MEMBER_ID_PREFIX) {
            let record: MemberRecord = serde_json::from_value(value).map_err(|e| {
                AppError::MalformedRecord(format!("Member record {} is invalid: {}", id, e))
            })?;
            Ok(RawUser::Member {
                id: record.id,
                real_name: record.real_name,
                profile: record.profile.unwrap_or_default(),
            })
        } else {
            let record: OtherRecord = serde_json::from_value(value).map_err(|e| {
                AppError::MalformedRecord(format!("User record {} is invalid: {}", id, e))
            })?;
            Ok(RawUser::Other {
                id: record.id,
                name: record.name,
            })
        }
    }
}

/// Canonical user consumed by the views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub real_name: String,
    pub display_name: String,
}

impl User {
    /// Parse and normalize a raw user record.
    pub fn normalize(value: Value) -> Result<Self, AppError> {
        RawUser::from_value(value).map(User::from)
    }
}

impl From<RawUser> for User {
    fn from(raw: RawUser) -> Self {
        match raw {
            RawUser::Member {
                id,
                real_name,
                profile,
            } => {
                let display_name = profile
                    .display_name
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| real_name.clone());
                User {
                    id,
                    real_name,
                    display_name,
                }
            }
            RawUser::Other { id, name } => User {
                id,
                real_name: name.clone(),
                display_name: name,
            },
        }
    }
}
