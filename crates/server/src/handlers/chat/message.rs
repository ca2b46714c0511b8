use std::sync::Arc;

use axum::{http::StatusCode, Extension, Json};
use common::{
    assistant::{AssistantClient, AssistantError, ChatMessage, PromptContext, UserType},
    config::Config,
};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use validator::Validate;

use super::ChatReply;
use crate::{
    error::{error_response, ResponseError},
    validation::ValidatedJson,
};

#[derive(Debug, Display, From, Error)]
pub(super) enum ChatError {
    /// Generative API request error.
    AssistantError(AssistantError),

    /// Message is blank.
    #[display(fmt = "Please enter a message")]
    EmptyMessage,
}

impl ResponseError for ChatError {
    fn status(&self) -> StatusCode {
        match self {
            ChatError::EmptyMessage => StatusCode::BAD_REQUEST,
            ChatError::AssistantError(AssistantError::NotConfigured) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ChatError::AssistantError(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            ChatError::AssistantError(AssistantError::NotConfigured) => {
                "Chat assistant is currently unavailable"
            }
            _ => "Failed to get response. Please try again.",
        }
    }
}

error_response!(ChatError);

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(super) struct ChatRequest {
    #[serde(default)]
    #[validate(length(max = 2000, message = "Message is too long"))]
    message: String,

    /// Previous conversation messages, oldest first.
    #[serde(default)]
    history: Vec<ChatMessage>,

    #[serde(default)]
    user_type: UserType,

    #[serde(default)]
    language: Option<String>,

    #[serde(default)]
    region: Option<String>,
}

/// Ask the assistant a question.
pub(super) async fn message(
    Extension(config): Extension<Arc<Config>>,
    ValidatedJson(request): ValidatedJson<ChatRequest>,
) -> Result<Json<ChatReply>, ChatError> {
    let message = request.message.trim();

    if message.is_empty() {
        return Err(ChatError::EmptyMessage);
    }

    let mut context = PromptContext {
        user_type: request.user_type,
        region: request.region.filter(|region| !region.trim().is_empty()),
        ..Default::default()
    };

    if let Some(language) = request.language.filter(|language| !language.trim().is_empty()) {
        context.language = language;
    }

    let reply = AssistantClient::new(&config.assistant)?
        .reply(&context, &request.history, message)
        .await?;

    Ok(Json(ChatReply::new(reply)))
}
