use axum::{debug_handler, extract::State, Json};
use serde::Serialize;
use time::Date;

use crate::{
    auth::CurrentUser,
    model::{Booking, BookingStatus},
    store::{SharedStore, Store},
    AppError, AppResult,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideEarnings {
    pub this_month: u64,
    pub total: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideSummary {
    pub bookings: Vec<Booking>,
    pub confirmed_bookings: Vec<Booking>,
    pub today_bookings: Vec<Booking>,
    pub earnings: GuideEarnings,
    pub rating: f32,
    pub review_count: u32,
    pub unread_messages: usize,
}

/// Earnings from completed bookings; "this month" goes by when the booking
/// was made.
pub fn guide_earnings<'a>(bookings: impl IntoIterator<Item = &'a Booking>, today: Date) -> GuideEarnings {
    let mut earnings = GuideEarnings { this_month: 0, total: 0 };
    for booking in bookings {
        if booking.status != BookingStatus::Completed {
            continue;
        }
        earnings.total += booking.total_price;
        let created = booking.created_at.date();
        if created.year() == today.year() && created.month() == today.month() {
            earnings.this_month += booking.total_price;
        }
    }
    earnings
}

pub fn guide_summary(store: &Store, guide_id: &str, today: Date) -> Option<GuideSummary> {
    let guide = store.guide(guide_id)?;
    let bookings: Vec<Booking> = store.bookings.iter()
        .filter(|b| b.guide_id == guide_id)
        .cloned()
        .collect();
    let confirmed_bookings: Vec<Booking> = bookings.iter()
        .filter(|b| b.status == BookingStatus::Confirmed)
        .cloned()
        .collect();
    let today_bookings = confirmed_bookings.iter()
        .filter(|b| b.date == today)
        .cloned()
        .collect();

    Some(GuideSummary {
        earnings: guide_earnings(&bookings, today),
        bookings,
        confirmed_bookings,
        today_bookings,
        rating: guide.rating,
        review_count: guide.review_count,
        unread_messages: store.unread_for(guide_id),
    })
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn dashboard(
    State(store): State<SharedStore>,
    current: CurrentUser,
) -> AppResult<Json<GuideSummary>> {
    let today = time::OffsetDateTime::now_utc().date();
    guide_summary(&*store.read().await, &current.id, today)
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("guide {}", current.id)))
}
