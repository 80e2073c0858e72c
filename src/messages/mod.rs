mod msg;
mod thread;

use axum::{routing::{get, post}, Router};

use crate::AppState;

pub use msg::send_message;
pub use thread::{conversations_for, ConversationView};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(thread::conversations))
        .route("/{other_id}", get(thread::thread).post(msg::send))
        .route("/{other_id}/read", post(thread::mark_read))
}
