use axum::{debug_handler, extract::State, response::Html};
use tower_sessions::Session;

use crate::{include_res, res::escape_html, session::USER_ID, store::SharedStore, AppResult};

/// Landing page: featured guides and the demo login buttons.
#[debug_handler(state = crate::AppState)]
pub async fn index(
    State(store): State<SharedStore>,
    session: Session,
) -> AppResult<Html<String>> {
    let store = store.read().await;

    let greeting = match session.get::<String>(USER_ID).await? {
        Some(user_id) => match store.user(&user_id) {
            Some(user) => format!("ようこそ、{}さん", escape_html(&user.name)),
            None => String::new(),
        },
        None => "デモアカウントでログイン".to_owned(),
    };

    let featured: String = store.approved_guides()
        .iter()
        .take(6)
        .map(|guide| format!(
            r#"<li><a href="/g/{}">{}</a> {} ¥{}/時間</li>"#,
            escape_html(&guide.user.id),
            escape_html(&guide.user.name),
            escape_html(&guide.area),
            guide.price_per_hour,
        ))
        .collect();

    Ok(Html(
        include_res!(str, "/pages/index.html")
            .replace("{greeting}", &greeting)
            .replace("{featured}", &featured)
    ))
}
