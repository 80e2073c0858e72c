pub mod appresult;
pub mod auth;
pub mod bookings;
pub mod config;
pub mod dashboard;
pub mod filter;
pub mod guides;
pub mod index;
pub mod messages;
pub mod model;
pub mod res;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

use std::ops::Deref;

use axum::{extract::FromRef, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};

pub use appresult::{AppError, AppResult};
pub use config::Config;
pub use store::{SharedStore, Store};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub store: SharedStore,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self { store: store.shared() }
    }
}

/// The whole service, sessions included.
pub fn app(state: AppState, config: &Config) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(config.session_minutes)));

    Router::new()
        .route("/", get(index::index))
        .route("/health", get(|| async { "ok" }))
        .route("/style.css", get(res::stylesheet))

        .merge(auth::router())
        .nest("/guides", guides::router())
        .nest("/g", guides::pages())
        .nest("/bookings", bookings::router())
        .nest("/messages", messages::router())
        .nest("/dashboard", dashboard::router())

        .with_state(state)
        .layer(session_layer)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub struct Markdown<T>(pub T);

impl<T> Markdown<T>
where
    T: Deref<Target = str>
{
    pub fn to_html(&self) -> String {
        use pulldown_cmark::{Options, Parser};

        let parser = Parser::new_ext(&self.0, Options::ENABLE_STRIKETHROUGH);
        let mut html_output = String::new();
        pulldown_cmark::html::push_html(&mut html_output, parser);
        html_output
    }
}
