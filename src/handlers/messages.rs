use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use tracing::instrument;

use super::api::{ApiError, ApiResult, ApiState};
use crate::models::{
    Conversation, ConversationThread, Message, Recipient, SendMessageRequest,
    StartConversationRequest,
};

#[derive(Debug, Deserialize)]
pub struct ListConversationsQuery {
    #[serde(alias = "query")]
    pub q: Option<String>,
}

#[instrument(name = "list_conversations", skip(state))]
pub async fn list_conversations(
    State(state): State<ApiState>,
    Query(query): Query<ListConversationsQuery>,
) -> ApiResult<Vec<Conversation>> {
    state
        .traced(
            "list_conversations",
            state.message_service.list_conversations(query.q.as_deref()),
        )
        .await
}

/// Messages of one conversation, oldest first; opening it clears the unread count
#[instrument(name = "open_conversation", skip(state), fields(conversation_id = %conversation_id))]
pub async fn open_conversation(
    State(state): State<ApiState>,
    Path(conversation_id): Path<String>,
) -> ApiResult<ConversationThread> {
    state
        .traced(
            "open_conversation",
            state.message_service.open_conversation(&conversation_id),
        )
        .await
}

#[instrument(name = "send_message", skip(state, request), fields(conversation_id = %conversation_id))]
pub async fn send_message(
    State(state): State<ApiState>,
    Path(conversation_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    state
        .traced(
            "send_message",
            state
                .message_service
                .send_message(&conversation_id, &request.text),
        )
        .await
        .map(|message| (StatusCode::CREATED, message))
}

#[instrument(name = "start_conversation", skip(state, request), fields(recipient_id = %request.recipient_id))]
pub async fn start_conversation(
    State(state): State<ApiState>,
    Json(request): Json<StartConversationRequest>,
) -> Result<(StatusCode, Json<ConversationThread>), ApiError> {
    state
        .traced(
            "start_conversation",
            state
                .message_service
                .start_conversation(&request.recipient_id, &request.text),
        )
        .await
        .map(|thread| (StatusCode::CREATED, thread))
}

#[instrument(name = "get_recipient", skip(state), fields(recipient_id = %recipient_id))]
pub async fn get_recipient(
    State(state): State<ApiState>,
    Path(recipient_id): Path<String>,
) -> ApiResult<Recipient> {
    state
        .traced(
            "get_recipient",
            state.message_service.get_recipient(&recipient_id),
        )
        .await
}
