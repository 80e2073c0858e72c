use axum::{debug_handler, extract::{Path, State}, Json};
use serde::{Deserialize, Serialize};

use crate::{
    filter::parse_banned_words,
    model::{AppSettings, ApprovalStatus, BookingStatus, Guide},
    store::{SharedStore, Store},
    AppError, AppResult,
};

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_users: usize,
    pub total_guides: usize,
    pub total_bookings: usize,
    pub total_revenue: u64,
    pub pending_guides: usize,
    pub active_bookings: usize,
}

pub fn admin_stats(store: &Store) -> AdminStats {
    let count = |status: ApprovalStatus| store.guides.iter().filter(|g| g.status == status).count();

    AdminStats {
        total_users: store.travelers.len() + store.guides.len(),
        total_guides: count(ApprovalStatus::Approved),
        total_bookings: store.bookings.len(),
        total_revenue: store.bookings.iter()
            .filter(|b| b.status == BookingStatus::Completed)
            .map(|b| b.total_price)
            .sum(),
        pending_guides: count(ApprovalStatus::Pending),
        active_bookings: store.bookings.iter()
            .filter(|b| matches!(b.status, BookingStatus::Pending | BookingStatus::Confirmed))
            .count(),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AdminDashboard {
    stats: AdminStats,
    pending_guides: Vec<Guide>,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn dashboard(State(store): State<SharedStore>) -> Json<AdminDashboard> {
    let store = store.read().await;
    Json(AdminDashboard {
        stats: admin_stats(&store),
        pending_guides: store.guides_with_status(ApprovalStatus::Pending),
    })
}

/// Moves a pending guide to `status`.
pub fn set_status(store: &mut Store, guide_id: &str, status: ApprovalStatus) -> AppResult<Guide> {
    let guide = store.guide_mut(guide_id)
        .ok_or_else(|| AppError::not_found(format!("guide {guide_id}")))?;

    if guide.status != ApprovalStatus::Pending {
        return Err(AppError::bad_request(format!("guide {guide_id} is not pending review")));
    }

    guide.status = status;
    guide.verified = status == ApprovalStatus::Approved;
    tracing::info!(guide_id, ?status, "guide reviewed");
    Ok(guide.clone())
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn approve(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> AppResult<Json<Guide>> {
    set_status(&mut *store.write().await, &id, ApprovalStatus::Approved).map(Json)
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn reject(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> AppResult<Json<Guide>> {
    set_status(&mut *store.write().await, &id, ApprovalStatus::Rejected).map(Json)
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn settings(State(store): State<SharedStore>) -> Json<AppSettings> {
    Json(store.read().await.settings().clone())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub filter_enabled: Option<bool>,
    /// Comma separated, as typed into the admin form.
    pub banned_words: Option<String>,
    pub commission_rate: Option<u8>,
}

impl SettingsUpdate {
    pub fn apply(self, mut settings: AppSettings) -> AppResult<AppSettings> {
        if let Some(enabled) = self.filter_enabled {
            settings.word_filter.enabled = enabled;
        }
        if let Some(list) = self.banned_words {
            settings.word_filter.set_banned_words(parse_banned_words(&list))?;
        }
        if let Some(rate) = self.commission_rate {
            if rate > 100 {
                return Err(AppError::bad_request(format!("commission rate {rate}% is over 100%")));
            }
            settings.commission.rate = rate;
        }
        Ok(settings)
    }
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn update_settings(
    State(store): State<SharedStore>,
    Json(update): Json<SettingsUpdate>,
) -> AppResult<Json<AppSettings>> {
    let mut store = store.write().await;
    let settings = update.apply(store.settings().clone())?;
    store.replace_settings(settings)?;

    let settings = store.settings();
    tracing::info!(
        filter_enabled = settings.word_filter.enabled,
        banned_words = settings.word_filter.banned_words.len(),
        commission = settings.commission.rate,
        "settings updated"
    );
    Ok(Json(settings.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_from_seed() {
        let store = Store::seed().unwrap();
        let stats = admin_stats(&store);
        assert_eq!(stats.total_users, 12);
        assert_eq!(stats.total_guides, 6);
        assert_eq!(stats.pending_guides, 1);
        assert_eq!(stats.total_bookings, 7);
        assert_eq!(stats.total_revenue, 18000 + 60000);
        assert_eq!(stats.active_bookings, 4);
    }

    #[test]
    fn approving_publishes_guide() {
        let mut store = Store::seed().unwrap();
        let guide = set_status(&mut store, "guide-7", ApprovalStatus::Approved).unwrap();
        assert!(guide.verified);
        assert!(store.approved_guide("guide-7").is_some());
    }

    #[test]
    fn only_pending_guides_are_reviewed() {
        let mut store = Store::seed().unwrap();
        assert!(matches!(set_status(&mut store, "guide-1", ApprovalStatus::Rejected), Err(AppError::BadRequest(_))));
        assert!(matches!(set_status(&mut store, "guide-99", ApprovalStatus::Approved), Err(AppError::NotFound(_))));
    }

    #[test]
    fn settings_update_normalizes_words() {
        let store = Store::seed().unwrap();
        let update = SettingsUpdate {
            banned_words: Some("price, cash, price, ".into()),
            commission_rate: Some(20),
            ..Default::default()
        };
        let settings = update.apply(store.settings().clone()).unwrap();
        assert_eq!(settings.word_filter.banned_words, vec!["price", "cash"]);
        assert_eq!(settings.commission.rate, 20);
        assert!(settings.word_filter.enabled);
    }

    #[test]
    fn settings_update_rejects_bad_values() {
        let store = Store::seed().unwrap();
        let over = SettingsUpdate { commission_rate: Some(101), ..Default::default() };
        assert!(over.apply(store.settings().clone()).is_err());
        let mask = SettingsUpdate { banned_words: Some("***".into()), ..Default::default() };
        assert!(mask.apply(store.settings().clone()).is_err());
    }
}
