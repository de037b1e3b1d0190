use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Keys with a typed home on [`User`]; they never land in `extra`.
pub const RESERVED_FIELDS: [&str; 7] = [
    "id",
    "email",
    "first_name",
    "last_name",
    "avatar",
    "created_at",
    "updated_at",
];

pub fn is_reserved(key: &str) -> bool {
    RESERVED_FIELDS.contains(&key)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Caller-supplied fields without a typed counterpart, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// Fields for a record that has not been assigned an id yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    pub extra: Map<String, JsonValue>,
}

/// A shallow merge: `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// `Some(None)` clears the avatar.
    pub avatar: Option<Option<String>>,
    pub extra: Map<String, JsonValue>,
}

impl User {
    pub fn from_new(id: u64, new_user: NewUser, now: DateTime<Utc>) -> Self {
        let NewUser {
            email,
            first_name,
            last_name,
            avatar,
            mut extra,
        } = new_user;
        extra.retain(|key, _| !is_reserved(key));

        Self {
            id,
            email,
            first_name,
            last_name,
            created_at: now,
            updated_at: now,
            avatar,
            extra,
        }
    }

    pub fn apply(&mut self, changes: UserChanges, now: DateTime<Utc>) {
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(first_name) = changes.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            self.last_name = last_name;
        }
        if let Some(avatar) = changes.avatar {
            self.avatar = avatar;
        }
        for (key, value) in changes.extra {
            if !is_reserved(&key) {
                self.extra.insert(key, value);
            }
        }
        self.updated_at = now.max(self.updated_at);
    }
}
