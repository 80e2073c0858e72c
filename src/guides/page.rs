use axum::{debug_handler, extract::{Path, State}, response::Html};
use time::OffsetDateTime;

use crate::{include_res, model::Guide, res::escape_html, store::SharedStore, AppError, AppResult, Markdown};

use super::list::upcoming_availability;

fn list_items(items: &[String]) -> String {
    items.iter().map(|item| format!("<li>{}</li>", escape_html(item))).collect()
}

pub(crate) fn render_profile(guide: &Guide, today: time::Date) -> String {
    let rating = if guide.rating > 0.0 {
        format!("{:.1} ({})", guide.rating, guide.review_count)
    } else {
        "新規".to_owned()
    };

    let plans: String = guide.tour_plans.iter()
        .map(|plan| format!(
            "<li><b>{}</b> ¥{} / {}時間 (最大{}名)</li>",
            escape_html(&plan.title), plan.price, plan.duration, plan.max_people,
        ))
        .collect();

    let dates: Vec<String> = upcoming_availability(guide, today)
        .into_iter()
        .map(|date| date.to_string())
        .collect();
    let dates = if dates.is_empty() { "<li>空きがありません</li>".to_owned() } else { list_items(&dates) };

    include_res!(str, "/pages/guide.html")
        .replace("{name}", &escape_html(&guide.user.name))
        .replace("{area}", &escape_html(&guide.area))
        .replace("{rating}", &rating)
        .replace("{price}", &guide.price_per_hour.to_string())
        .replace("{languages}", &list_items(&guide.languages))
        .replace("{specialties}", &list_items(&guide.specialties))
        .replace("{tour_plans}", &plans)
        .replace("{availability}", &dates)
        .replace("{bio}", &Markdown(guide.bio.as_str()).to_html())
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn profile(
    Path(id): Path<String>,
    State(store): State<SharedStore>,
) -> AppResult<Html<String>> {
    let store = store.read().await;
    let guide = store.approved_guide(&id).ok_or_else(|| AppError::not_found(format!("guide {id}")))?;

    Ok(Html(render_profile(guide, OffsetDateTime::now_utc().date())))
}
