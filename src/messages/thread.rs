use axum::{debug_handler, extract::{Path, State}, Json};
use serde::Serialize;

use crate::{
    auth::CurrentUser,
    model::{Message, Role},
    store::{SharedStore, Store},
    AppError, AppResult,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationView {
    pub id: String,
    pub other: Participant,
    pub last_message: Option<Message>,
    pub unread_count: usize,
}

/// `user_id`'s conversations, most recently active first.
pub fn conversations_for(store: &Store, user_id: &str) -> Vec<ConversationView> {
    let mut views: Vec<ConversationView> = store.conversations
        .iter()
        .filter(|c| c.includes(user_id))
        .filter_map(|c| {
            let other = store.user(c.other(user_id)?)?;
            let thread = store.thread(user_id, &other.id);
            let unread_count = thread.iter()
                .filter(|m| m.receiver_id == user_id && !m.read)
                .count();

            Some(ConversationView {
                id: c.id.clone(),
                other: Participant {
                    id: other.id.clone(),
                    name: other.name.clone(),
                    email: other.email.clone(),
                    role: other.role,
                },
                last_message: thread.last().map(|m| (*m).clone()),
                unread_count,
            })
        })
        .collect();

    views.sort_by(|a, b| {
        let a = a.last_message.as_ref().map(|m| m.timestamp);
        let b = b.last_message.as_ref().map(|m| m.timestamp);
        b.cmp(&a)
    });
    views
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn conversations(
    State(store): State<SharedStore>,
    current: CurrentUser,
) -> Json<Vec<ConversationView>> {
    Json(conversations_for(&*store.read().await, &current.id))
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn thread(
    State(store): State<SharedStore>,
    current: CurrentUser,
    Path(other_id): Path<String>,
) -> AppResult<Json<Vec<Message>>> {
    let store = store.read().await;
    if store.user(&other_id).is_none() {
        return Err(AppError::not_found(format!("user {other_id}")));
    }

    Ok(Json(store.thread(&current.id, &other_id).into_iter().cloned().collect()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MarkedRead {
    marked: usize,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn mark_read(
    State(store): State<SharedStore>,
    current: CurrentUser,
    Path(other_id): Path<String>,
) -> AppResult<Json<MarkedRead>> {
    let mut store = store.write().await;
    if store.user(&other_id).is_none() {
        return Err(AppError::not_found(format!("user {other_id}")));
    }

    let mut marked = 0;
    for message in store.messages.iter_mut() {
        if message.sender_id == other_id && message.receiver_id == current.id && !message.read {
            message.read = true;
            marked += 1;
        }
    }

    tracing::debug!(user_id = %current.id, %other_id, marked, "messages read");
    Ok(Json(MarkedRead { marked }))
}
