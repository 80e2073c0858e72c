use axum::{debug_handler, extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    auth::CurrentUser,
    model::{Booking, BookingStatus},
    store::SharedStore,
    AppError, AppResult,
};

use super::rules::{booking_total, check_request, BookingError, BookingRequest};

#[debug_handler(state = crate::AppState)]
pub(crate) async fn new_booking(
    State(store): State<SharedStore>,
    current: CurrentUser,
    Json(request): Json<BookingRequest>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    let mut store = store.write().await;
    let guide = store.approved_guide(&request.guide_id)
        .ok_or_else(|| AppError::not_found(format!("guide {}", request.guide_id)))?;

    let now = OffsetDateTime::now_utc();
    let (plan, date) = check_request(guide, &request, now.date())?;

    let booking = Booking {
        id: format!("booking-{}", Uuid::now_v7().simple()),
        guide_id: guide.user.id.clone(),
        traveler_id: current.id,
        tour_plan_id: plan.id.clone(),
        date,
        number_of_people: request.number_of_people,
        total_price: booking_total(plan.price, request.number_of_people),
        status: BookingStatus::Pending,
        special_requests: request.special_requests.filter(|r| !r.trim().is_empty()),
        created_at: now,
        reviewed: false,
    };

    tracing::info!(
        booking_id = %booking.id,
        guide_id = %booking.guide_id,
        traveler_id = %booking.traveler_id,
        total = booking.total_price,
        "booking requested"
    );
    store.bookings.push(booking.clone());

    Ok((StatusCode::CREATED, Json(booking)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuoteRequest {
    guide_id: String,
    tour_plan_id: String,
    #[serde(default)]
    number_of_people: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Quote {
    price: u32,
    number_of_people: u32,
    total: u64,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn quote(
    State(store): State<SharedStore>,
    Json(QuoteRequest { guide_id, tour_plan_id, number_of_people }): Json<QuoteRequest>,
) -> AppResult<Json<Quote>> {
    let store = store.read().await;
    let guide = store.approved_guide(&guide_id)
        .ok_or_else(|| AppError::not_found(format!("guide {guide_id}")))?;
    let plan = guide.tour_plan(&tour_plan_id)
        .ok_or(BookingError::UnknownTourPlan(tour_plan_id))?;

    let number_of_people = number_of_people.unwrap_or(1);
    Ok(Json(Quote {
        price: plan.price,
        number_of_people,
        total: booking_total(plan.price, number_of_people),
    }))
}
