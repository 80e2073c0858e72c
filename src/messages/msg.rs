use axum::{debug_handler, extract::{Path, State}, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    auth::CurrentUser,
    model::{Conversation, Message},
    store::{SharedStore, Store},
    AppError, AppResult,
};

#[derive(Debug, Deserialize)]
pub(crate) struct SendMessageQuery {
    content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Sent {
    message: Message,
    is_filtered: bool,
}

/// Filters `content` with the store's current word filter and records it as
/// a message from `sender_id` to `receiver_id`.
pub fn send_message(
    store: &mut Store,
    sender_id: &str,
    receiver_id: &str,
    content: &str,
    now: OffsetDateTime,
) -> AppResult<Message> {
    if content.trim().is_empty() {
        return Err(AppError::bad_request("message is empty"));
    }
    if sender_id == receiver_id {
        return Err(AppError::bad_request("can't message yourself"));
    }
    if store.user(receiver_id).is_none() {
        return Err(AppError::not_found(format!("user {receiver_id}")));
    }

    let redacted = store.message_filter().filter(content);
    let message = Message {
        id: format!("msg-{}", Uuid::now_v7().simple()),
        sender_id: sender_id.to_owned(),
        receiver_id: receiver_id.to_owned(),
        content: redacted.filtered,
        filtered: redacted.is_filtered,
        timestamp: now,
        read: false,
    };

    if store.conversation_between(sender_id, receiver_id).is_none() {
        let conversation = Conversation {
            id: format!("conv-{}", Uuid::now_v7().simple()),
            participants: [sender_id.to_owned(), receiver_id.to_owned()],
        };
        tracing::debug!(conversation_id = %conversation.id, "conversation started");
        store.conversations.push(conversation);
    }

    if message.filtered {
        tracing::info!(message_id = %message.id, sender_id, "message content filtered");
    }
    store.messages.push(message.clone());

    Ok(message)
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn send(
    State(store): State<SharedStore>,
    current: CurrentUser,
    Path(other_id): Path<String>,
    Json(SendMessageQuery { content }): Json<SendMessageQuery>,
) -> AppResult<(StatusCode, Json<Sent>)> {
    let mut store = store.write().await;
    let message = send_message(&mut store, &current.id, &other_id, &content, OffsetDateTime::now_utc())?;

    let is_filtered = message.filtered;
    Ok((StatusCode::CREATED, Json(Sent { message, is_filtered })))
}
