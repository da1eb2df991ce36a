use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

/// User record held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime, // set by the store, never mutated
}

/// Request body for create and update.
///
/// Every field is optional on the wire: missing or `null` strings decode as
/// `""` and a missing or `null` `id` as `0`. Unknown fields are ignored.
/// `id` is signed so a negative value is still a well-formed request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<OffsetDateTime>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl UserPayload {
    /// Copies the non-empty name and email fields onto `user`.
    pub fn apply_to(&self, user: &mut User) {
        if !self.first_name.is_empty() {
            user.first_name = self.first_name.clone();
        }
        if !self.last_name.is_empty() {
            user.last_name = self.last_name.clone();
        }
        if !self.email.is_empty() {
            user.email = self.email.clone();
        }
    }
}
