use axum::{debug_handler, extract::State, Json};
use serde::Serialize;
use time::Date;

use crate::{
    auth::CurrentUser,
    model::{Booking, BookingStatus, Guide},
    store::{SharedStore, Store},
    AppError, AppResult,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelerSummary {
    pub upcoming_bookings: Vec<Booking>,
    pub past_bookings: Vec<Booking>,
    pub favorite_guides: Vec<Guide>,
    pub unread_messages: usize,
}

pub fn traveler_summary(store: &Store, traveler_id: &str, today: Date) -> Option<TravelerSummary> {
    let traveler = store.traveler(traveler_id)?;
    let bookings = store.bookings.iter().filter(|b| b.traveler_id == traveler_id);

    let upcoming_bookings = bookings.clone()
        .filter(|b| b.status == BookingStatus::Confirmed && b.date > today)
        .cloned()
        .collect();
    let past_bookings = bookings
        .filter(|b| b.status == BookingStatus::Completed)
        .cloned()
        .collect();
    let favorite_guides = store.guides.iter()
        .filter(|g| traveler.favorites.contains(&g.user.id))
        .cloned()
        .collect();

    Some(TravelerSummary {
        upcoming_bookings,
        past_bookings,
        favorite_guides,
        unread_messages: store.unread_for(traveler_id),
    })
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn dashboard(
    State(store): State<SharedStore>,
    current: CurrentUser,
) -> AppResult<Json<TravelerSummary>> {
    let today = time::OffsetDateTime::now_utc().date();
    traveler_summary(&*store.read().await, &current.id, today)
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("traveler {}", current.id)))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn splits_upcoming_and_past() {
        let store = Store::seed().unwrap();
        let summary = traveler_summary(&store, "traveler-1", date!(2026 - 02 - 10)).unwrap();

        let upcoming: Vec<_> = summary.upcoming_bookings.iter().map(|b| b.id.as_str()).collect();
        let past: Vec<_> = summary.past_bookings.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(upcoming, vec!["booking-1"]);
        assert_eq!(past, vec!["booking-3"]);
        assert_eq!(summary.favorite_guides.len(), 2);
    }

    #[test]
    fn confirmed_bookings_drop_off_after_their_date() {
        let store = Store::seed().unwrap();
        let summary = traveler_summary(&store, "traveler-1", date!(2026 - 02 - 20)).unwrap();
        assert!(summary.upcoming_bookings.is_empty());
    }

    #[test]
    fn unknown_traveler() {
        let store = Store::seed().unwrap();
        assert!(traveler_summary(&store, "guide-1", date!(2026 - 02 - 10)).is_none());
    }
}
