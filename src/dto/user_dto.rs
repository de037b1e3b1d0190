use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::user::{NewUser, User, UserChanges};
use crate::utils::pagination::Page;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserPayload {
    #[validate(required)]
    pub email: Option<String>,
    #[validate(required)]
    pub first_name: Option<String>,
    #[validate(required)]
    pub last_name: Option<String>,
    pub avatar: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserPayload {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub avatar: Option<Option<String>>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// Tells an explicit `null` apart from a missing key.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UserListQuery {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListResponse {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
    pub data: Vec<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl TryFrom<CreateUserPayload> for NewUser {
    type Error = Error;

    fn try_from(value: CreateUserPayload) -> Result<Self> {
        let (Some(email), Some(first_name), Some(last_name)) =
            (value.email, value.first_name, value.last_name)
        else {
            return Err(Error::invalid_user_data());
        };

        Ok(Self {
            email,
            first_name,
            last_name,
            avatar: value.avatar,
            extra: value.extra,
        })
    }
}

impl From<UpdateUserPayload> for UserChanges {
    fn from(value: UpdateUserPayload) -> Self {
        Self {
            email: value.email,
            first_name: value.first_name,
            last_name: value.last_name,
            avatar: value.avatar,
            extra: value.extra,
        }
    }
}

impl From<Page<User>> for UserListResponse {
    fn from(value: Page<User>) -> Self {
        Self {
            page: value.page,
            per_page: value.per_page,
            total: value.total,
            total_pages: value.total_pages,
            data: value.items,
        }
    }
}
