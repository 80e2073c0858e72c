use axum::{debug_handler, extract::{Path, Query, State}, Json};
use serde::{Deserialize, Deserializer, Serialize};
use time::{Date, Duration, OffsetDateTime};

use crate::{
    model::{Guide, Review},
    store::SharedStore,
    AppError, AppResult,
};

use super::search::{search_guides, GuideCriteria, SortKey};

/// How far ahead the availability view looks.
pub(crate) const AVAILABILITY_DAYS: i64 = 14;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GuideQuery {
    #[serde(default)]
    q: String,
    sort: Option<String>,
    area: Option<String>,
    language: Option<String>,
    specialty: Option<String>,
    #[serde(default, deserialize_with = "lenient_int")]
    min_price: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    max_price: Option<i64>,
    #[serde(default, deserialize_with = "lenient_float")]
    min_rating: Option<f32>,
}

/// Reads a bound the way the filter form sends it: blank or non-numeric input
/// is unset and trailing junk after the number is ignored (`"12abc"` is 12).
fn leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (negative, rest) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let n = rest[..end].parse::<i64>().ok()?;
    Some(if negative { -n } else { n })
}

fn lenient_int<'de, D: Deserializer<'de>>(de: D) -> Result<Option<i64>, D::Error> {
    Ok(Option::<String>::deserialize(de)?.as_deref().and_then(leading_int))
}

fn lenient_float<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f32>, D::Error> {
    Ok(Option::<String>::deserialize(de)?
        .and_then(|raw| raw.trim().parse::<f32>().ok())
        .filter(|r| r.is_finite()))
}

impl GuideQuery {
    fn into_parts(self) -> (String, GuideCriteria, SortKey) {
        let sort = self.sort.as_deref().unwrap_or_default().parse().unwrap_or_default();
        let criteria = GuideCriteria {
            area: self.area,
            language: self.language,
            specialty: self.specialty,
            min_price: self.min_price,
            max_price: self.max_price,
            min_rating: self.min_rating,
        };
        (self.q, criteria, sort)
    }
}

#[derive(Serialize)]
pub(crate) struct GuideList {
    count: usize,
    guides: Vec<Guide>,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn list(
    State(store): State<SharedStore>,
    Query(query): Query<GuideQuery>,
) -> Json<GuideList> {
    let (q, criteria, sort) = query.into_parts();
    let approved = store.read().await.approved_guides();

    let guides: Vec<Guide> = search_guides(&approved, &q, &criteria, sort)
        .into_iter()
        .cloned()
        .collect();

    tracing::debug!(query = %q, ?criteria, ?sort, found = guides.len(), "guide search");
    Json(GuideList { count: guides.len(), guides })
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn guide(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> AppResult<Json<Guide>> {
    store.read().await
        .approved_guide(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("guide {id}")))
}

/// Dates from `today` through the next [`AVAILABILITY_DAYS`] days that the
/// guide has marked available.
pub(crate) fn upcoming_availability(guide: &Guide, today: Date) -> Vec<Date> {
    (0..AVAILABILITY_DAYS)
        .filter_map(|offset| today.checked_add(Duration::days(offset)))
        .filter(|date| guide.is_available(*date))
        .collect()
}

#[derive(Serialize)]
pub(crate) struct Availability {
    dates: Vec<String>,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn availability(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> AppResult<Json<Availability>> {
    let store = store.read().await;
    let guide = store.approved_guide(&id).ok_or_else(|| AppError::not_found(format!("guide {id}")))?;

    let today = OffsetDateTime::now_utc().date();
    let dates = upcoming_availability(guide, today)
        .into_iter()
        .map(|date| date.to_string())
        .collect();

    Ok(Json(Availability { dates }))
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn reviews(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Review>>> {
    let store = store.read().await;
    if store.approved_guide(&id).is_none() {
        return Err(AppError::not_found(format!("guide {id}")));
    }

    Ok(Json(store.reviews_for(&id).into_iter().cloned().collect()))
}
