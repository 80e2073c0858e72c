use axum::{debug_handler, extract::{Path, State}, Json};
use tower_sessions::Session;

use crate::{
    model::{Role, User},
    session::{ROLE, USER_ID},
    store::SharedStore,
    AppError, AppResult,
};

use super::CurrentUser;

/// Signs in as the demo account for `role`.
#[debug_handler(state = crate::AppState)]
pub(crate) async fn login(
    Path(role): Path<Role>,
    State(store): State<SharedStore>,
    session: Session,
) -> AppResult<Json<User>> {
    let user = store.read().await
        .demo_user(role)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("demo {} account", role.as_str())))?;

    session.cycle_id().await?;
    session.insert(USER_ID, &user.id).await?;
    session.insert(ROLE, role).await?;

    tracing::info!(user_id = %user.id, role = role.as_str(), "demo login");
    Ok(Json(user))
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn me(
    current: CurrentUser,
    State(store): State<SharedStore>,
) -> AppResult<Json<User>> {
    store.read().await
        .user(&current.id)
        .cloned()
        .map(Json)
        .ok_or(AppError::Unauthorized)
}
