use serde::Deserialize;
use thiserror::Error;
use time::{macros::format_description, Date};

use crate::model::{Guide, TourPlan};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("guide has no tour plan {0}")]
    UnknownTourPlan(String),
    #[error("{0:?} is not a YYYY-MM-DD date")]
    InvalidDate(String),
    #[error("{0} is too soon, the earliest bookable day is tomorrow")]
    DateTooSoon(Date),
    #[error("guide is not available on {0}")]
    DateUnavailable(Date),
    #[error("party of {requested} doesn't fit this plan (1 to {max} people)")]
    PartySize { requested: u32, max: u32 },
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub guide_id: String,
    pub tour_plan_id: String,
    pub date: String,
    #[serde(default = "one")]
    pub number_of_people: u32,
    #[serde(default)]
    pub special_requests: Option<String>,
}

/// Plan price times party size.
pub fn booking_total(price: u32, party_size: u32) -> u64 {
    u64::from(price) * u64::from(party_size)
}

pub fn parse_date(date: &str) -> Result<Date, BookingError> {
    Date::parse(date, format_description!("[year]-[month]-[day]"))
        .map_err(|_| BookingError::InvalidDate(date.to_owned()))
}

/// Checks `request` against `guide`, returning the chosen plan and date.
pub fn check_request<'g>(
    guide: &'g Guide,
    request: &BookingRequest,
    today: Date,
) -> Result<(&'g TourPlan, Date), BookingError> {
    let plan = guide.tour_plan(&request.tour_plan_id)
        .ok_or_else(|| BookingError::UnknownTourPlan(request.tour_plan_id.clone()))?;

    let date = parse_date(&request.date)?;
    if date <= today {
        return Err(BookingError::DateTooSoon(date));
    }
    if !guide.is_available(date) {
        return Err(BookingError::DateUnavailable(date));
    }

    if request.number_of_people == 0 || request.number_of_people > plan.max_people {
        return Err(BookingError::PartySize {
            requested: request.number_of_people,
            max: plan.max_people,
        });
    }

    Ok((plan, date))
}
