use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::IntoResponse,
    Json,
};
use db::{token, user, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use tokio::task::JoinError;
use validator::Validate;

use super::{token_cookie, AuthenticationResponse};
use crate::{
    error::{error_response, ResponseError},
    validation::ValidatedJson,
};

#[derive(Debug, Display, From, Error)]
pub(super) enum UserAuthenticationError {
    DatabaseError(DbErr),

    HashingError(bcrypt::BcryptError),

    TaskError(JoinError),

    #[display(fmt = "Incorrect email or password")]
    InvalidCredentials,
}

impl ResponseError for UserAuthenticationError {
    fn status(&self) -> StatusCode {
        match self {
            UserAuthenticationError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

error_response!(UserAuthenticationError);

#[derive(Deserialize, Validate)]
pub(super) struct UserAuthenticationRequest {
    #[validate(length(min = 1, message = "Please provide email and password"))]
    email: String,

    #[validate(length(min = 1, message = "Please provide email and password"))]
    password: String,
}

pub(super) async fn login(
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<UserAuthenticationRequest>,
) -> Result<impl IntoResponse, UserAuthenticationError> {
    let user = user::Entity::find()
        .filter(user::Column::Email.eq(request.email.trim().to_lowercase()))
        .one(&*db)
        .await?
        .ok_or(UserAuthenticationError::InvalidCredentials)?;

    let password = request.password;
    let password_hash = user.password_hash.clone();
    let valid =
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash)).await??;

    if !valid {
        return Err(UserAuthenticationError::InvalidCredentials);
    }

    let (model, token) = token::generate_token(user.id);

    token::Entity::insert(model)
        .exec_without_returning(&*db)
        .await?;

    Ok((
        [(SET_COOKIE, token_cookie(&token))],
        Json(AuthenticationResponse::new(token, user)),
    ))
}
