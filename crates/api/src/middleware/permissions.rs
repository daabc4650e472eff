//! Permission extractors and checks built on `snippets_core::permissions`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::Method;
use snippets_core::error::CoreError;
use snippets_core::permissions::{
    is_authenticated_or_read_only, is_owner_or_read_only, is_safe_method,
};
use snippets_core::types::DbId;
use snippets_db::repositories::UserRepo;

use super::auth::MaybeAuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// View-level gate. Rejects unsafe methods from anonymous callers with 403
/// before the request body is read.
///
/// For unsafe methods the token's user must still exist (401 otherwise)
/// and be active (403 otherwise).
#[derive(Debug, Clone)]
pub struct ReadOrAuthenticated(pub MaybeAuthUser);

impl ReadOrAuthenticated {
    /// The requester's id, if authenticated.
    pub fn user_id(&self) -> Option<DbId> {
        self.0.user_id()
    }

    /// The requester's id for an unsafe method, where the gate has already
    /// guaranteed one exists.
    pub fn require_user_id(&self) -> Result<DbId, AppError> {
        self.user_id().ok_or_else(not_authenticated)
    }
}

impl FromRequestParts<AppState> for ReadOrAuthenticated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = MaybeAuthUser::from_request_parts(parts, state).await?;
        if !is_authenticated_or_read_only(parts.method.as_str(), user.user_id()) {
            return Err(not_authenticated());
        }
        if let (false, Some(user_id)) = (is_safe_method(parts.method.as_str()), user.user_id()) {
            ensure_active(state, user_id).await?;
        }
        Ok(ReadOrAuthenticated(user))
    }
}

/// Reject tokens whose user was deleted or deactivated after issue.
async fn ensure_active(state: &AppState, user_id: DbId) -> Result<(), AppError> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }
    Ok(())
}

/// Object-level gate: unsafe methods are limited to the object's owner.
pub fn check_owner(method: &Method, requester: Option<DbId>, owner: DbId) -> Result<(), AppError> {
    if is_owner_or_read_only(method.as_str(), requester, owner) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "You do not have permission to perform this action".into(),
        )))
    }
}

fn not_authenticated() -> AppError {
    AppError::Core(CoreError::Forbidden(
        "Authentication credentials were not provided".into(),
    ))
}
