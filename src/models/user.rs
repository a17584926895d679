use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{PersonName, TypeConstraintError, UserEmail, UserId};
use crate::domain::user::{NewUser as DomainNewUser, User as DomainUser, UserRole};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::users)]
/// Diesel model for [`crate::domain::user::User`].
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub mobile: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
/// Insertable form of [`User`].
pub struct NewUser<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub role: String,
    pub mobile: Option<&'a str>,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::try_from(user.id)?,
            first_name: PersonName::new(user.first_name)?,
            last_name: PersonName::new(user.last_name)?,
            email: UserEmail::new(user.email)?,
            role: user.role.parse::<UserRole>()?,
            mobile: user.mobile,
            created_at: user.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            first_name: user.first_name.as_str(),
            last_name: user.last_name.as_str(),
            email: user.email.as_str(),
            role: user.role.to_string(),
            mobile: user.mobile.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn user_into_domain() {
        let db = User {
            id: 1,
            first_name: "Test".into(),
            last_name: "User".into(),
            email: "test@example.com".into(),
            role: "admin".into(),
            mobile: None,
            created_at: Utc::now().naive_utc(),
        };
        let domain = DomainUser::try_from(db).expect("valid user");
        assert_eq!(domain.id.get(), 1);
        assert_eq!(domain.email.as_str(), "test@example.com");
        assert!(domain.is_admin());
    }

    #[test]
    fn unknown_role_is_rejected() {
        let db = User {
            id: 1,
            first_name: "Test".into(),
            last_name: "User".into(),
            email: "test@example.com".into(),
            role: "superuser".into(),
            mobile: None,
            created_at: Utc::now().naive_utc(),
        };
        assert!(DomainUser::try_from(db).is_err());
    }
}
