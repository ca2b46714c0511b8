/// Chat message route.
mod message;

/// Chat welcome message route.
mod welcome;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use db::DatabaseConnection;
use serde::Serialize;

pub(crate) fn routes() -> Router<Arc<DatabaseConnection>> {
    Router::new()
        .route("/", post(message::message))
        .route("/welcome", get(welcome::welcome))
}

/// Assistant reply formatted as an HTML fragment.
#[derive(Serialize)]
pub(super) struct ChatReply {
    status: &'static str,
    reply: String,
}

impl ChatReply {
    fn new(reply: impl Into<String>) -> Self {
        Self {
            status: "success",
            reply: reply.into(),
        }
    }
}
