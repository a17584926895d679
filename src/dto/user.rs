use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::user::{User, UserRole};

/// Public view of a user; never carries credentials.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
    pub mobile: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id.get(),
            first_name: user.first_name.into_inner(),
            last_name: user.last_name.into_inner(),
            email: user.email.into_inner(),
            role: user.role,
            mobile: user.mobile,
            created_at: user.created_at,
        }
    }
}
