use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use db::{token, DatabaseConnection, DbErr, EntityTrait};
use derive_more::{Display, Error, From};
use serde_json::json;

use super::expired_token_cookie;
use crate::{
    auth::AuthenticationTokenId,
    error::{error_response, ResponseError},
};

#[derive(Debug, Display, From, Error)]
pub(super) enum LogoutError {
    DatabaseError(DbErr),
}

impl ResponseError for LogoutError {}

error_response!(LogoutError);

/// Revoke the authentication token used by the current request.
pub(super) async fn logout(
    Extension(current_token): Extension<AuthenticationTokenId>,
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, LogoutError> {
    token::Entity::delete_by_id(current_token.id())
        .exec(&*db)
        .await?;

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, expired_token_cookie())],
        Json(json!({ "status": "success" })),
    ))
}
