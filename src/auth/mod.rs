mod current;
mod login;
mod logout;

use axum::{routing::{get, post}, Router};

use crate::AppState;

pub use current::{require_role, CurrentUser};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login/{role}", post(login::login))
        .route("/logout", post(logout::logout))
        .route("/me", get(login::me))
}
