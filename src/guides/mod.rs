mod list;
mod page;
pub mod search;

use axum::{routing::get, Router};

use crate::AppState;

pub use search::{search_guides, GuideCriteria, SortKey};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list))
        .route("/{id}", get(list::guide))
        .route("/{id}/availability", get(list::availability))
        .route("/{id}/reviews", get(list::reviews))
}

pub fn pages() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(page::profile))
}
