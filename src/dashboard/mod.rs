mod admin;
mod guide;
mod traveler;

use axum::{middleware, routing::{get, post}, Router};

use crate::{auth::require_role, model::Role, AppState};

pub use admin::{admin_stats, set_status, AdminStats, SettingsUpdate};
pub use guide::{guide_earnings, GuideEarnings};
pub use traveler::{traveler_summary, TravelerSummary};

fn gated(role: Role, router: Router<AppState>) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(role, require_role))
}

pub fn router() -> Router<AppState> {
    let traveler = gated(Role::Traveler, Router::new()
        .route("/traveler", get(traveler::dashboard)));

    let guide = gated(Role::Guide, Router::new()
        .route("/guide", get(guide::dashboard)));

    let admin = gated(Role::Admin, Router::new()
        .route("/admin", get(admin::dashboard))
        .route("/admin/guides/{id}/approve", post(admin::approve))
        .route("/admin/guides/{id}/reject", post(admin::reject))
        .route("/admin/settings", get(admin::settings).put(admin::update_settings)));

    Router::new()
        .merge(traveler)
        .merge(guide)
        .merge(admin)
}
