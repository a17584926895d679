//! User lookup and bearer-token authentication.

use crate::auth::TokenDecoder;
use crate::domain::types::UserId;
use crate::domain::user::User;
use crate::dto::user::UserProfile;
use crate::repository::UserReader;
use crate::services::{ServiceError, ServiceResult, log_internal};

pub fn find_user_by_id<R>(repo: &R, id: i32) -> ServiceResult<UserProfile>
where
    R: UserReader + ?Sized,
{
    let not_found = || ServiceError::NotFound(format!("user not found with id {id}"));
    let user_id = UserId::new(id).map_err(|_| not_found())?;

    repo.get_user_by_id(user_id)
        .map_err(|err| log_internal("Failed to load user", err.into()))?
        .map(UserProfile::from)
        .ok_or_else(not_found)
}

/// Resolves the user a token was issued to.
///
/// An undecodable token yields [`ServiceError::Unauthorized`]; a valid token
/// for an unknown email yields [`ServiceError::NotFound`].
pub fn find_user_by_jwt<R, D>(repo: &R, decoder: &D, jwt: &str) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
    D: TokenDecoder + ?Sized,
{
    let email = decoder.email_from_token(jwt).map_err(|err| {
        log::warn!("Rejected bearer token: {err}");
        ServiceError::Unauthorized
    })?;

    repo.get_user_by_email(&email)
        .map_err(|err| log_internal("Failed to load user", err.into()))?
        .ok_or_else(|| ServiceError::NotFound(format!("user not exist with email {email}")))
}

pub fn find_user_profile_by_jwt<R, D>(repo: &R, decoder: &D, jwt: &str) -> ServiceResult<UserProfile>
where
    R: UserReader + ?Sized,
    D: TokenDecoder + ?Sized,
{
    find_user_by_jwt(repo, decoder, jwt).map(UserProfile::from)
}

/// Like [`find_user_by_jwt`], but a token for an unknown user is unauthorized.
pub fn authenticate<R, D>(repo: &R, decoder: &D, jwt: &str) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
    D: TokenDecoder + ?Sized,
{
    find_user_by_jwt(repo, decoder, jwt).map_err(|err| match err {
        ServiceError::NotFound(_) => ServiceError::Unauthorized,
        other => other,
    })
}
