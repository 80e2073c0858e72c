use anyhow::anyhow;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use tower_sessions::Session;

use crate::{
    model::Role,
    session::{ROLE, USER_ID},
    AppError, AppResult,
};

/// The account stored in the request's session. Rejects with 401 when nobody
/// is logged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub role: Role,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(current) = parts.extensions.get::<CurrentUser>() {
            return Ok(current.clone());
        }

        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(anyhow!(msg)))?;

        let Some(id) = session.get::<String>(USER_ID).await? else {
            return Err(AppError::Unauthorized);
        };
        let Some(role) = session.get::<Role>(ROLE).await? else {
            return Err(AppError::Unauthorized);
        };

        Ok(CurrentUser { id, role })
    }
}

/// Route layer letting only `allowed` through:
/// `route_layer(middleware::from_fn_with_state(Role::Admin, require_role))`.
pub async fn require_role(
    State(allowed): State<Role>,
    current: CurrentUser,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    if current.role != allowed {
        tracing::debug!(user_id = %current.id, role = current.role.as_str(), "role rejected");
        return Err(AppError::Forbidden);
    }

    request.extensions_mut().insert(current);
    Ok(next.run(request).await)
}
