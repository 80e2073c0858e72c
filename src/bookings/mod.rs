mod new;
mod rules;

use axum::{middleware, routing::post, Router};

use crate::{auth::require_role, model::Role, AppState};

pub use rules::{booking_total, check_request, BookingError, BookingRequest};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(new::new_booking))
        .route_layer(middleware::from_fn_with_state(Role::Traveler, require_role))
        .route("/quote", post(new::quote))
}
