use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use common::config::Config;
use db::{
    token, user, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QuerySelect, SelectExt, TransactionErrorExt, TransactionTrait,
};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use tokio::task::JoinError;
use validator::Validate;

use super::{token_cookie, AuthenticationResponse};
use crate::{
    error::{error_response, ResponseError},
    validation::ValidatedJson,
};

/// Errors that may occur during the user registration process.
#[derive(Debug, Display, From, Error)]
pub(super) enum UserRegistrationError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// Password hashing error.
    HashingError(bcrypt::BcryptError),

    /// Password hashing task failed to complete.
    TaskError(JoinError),

    /// Provided email address belongs to another user.
    #[display(fmt = "Email is already registered")]
    EmailTaken,
}

impl ResponseError for UserRegistrationError {
    fn status(&self) -> StatusCode {
        match self {
            UserRegistrationError::EmailTaken => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

error_response!(UserRegistrationError);

/// JSON request body.
#[derive(Deserialize, Validate)]
pub(super) struct UserRegistrationRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    name: String,

    #[validate(email(message = "Please provide a valid email"))]
    email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    password: String,

    #[serde(default)]
    role: user::Role,
}

/// User registration handler.
///
/// Registered users are logged in immediately, receiving an authentication token
/// both in the response body and in a cookie.
pub(super) async fn register(
    Extension(config): Extension<Arc<Config>>,
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<UserRegistrationRequest>,
) -> Result<impl IntoResponse, UserRegistrationError> {
    let email = request.email.trim().to_lowercase();

    if email_taken(&db, &email).await? {
        return Err(UserRegistrationError::EmailTaken);
    }

    let cost = config.auth.bcrypt_cost;
    let password = request.password;
    let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;

    let user_email = email.clone();

    let result = db
        .transaction::<_, _, UserRegistrationError>(|txn| {
            Box::pin(async move {
                let user = user::Entity::insert(user::ActiveModel {
                    name: ActiveValue::Set(request.name.trim().to_string()),
                    email: ActiveValue::Set(user_email),
                    password_hash: ActiveValue::Set(password_hash),
                    role: ActiveValue::Set(request.role),
                    created_at: ActiveValue::Set(db::now()),
                    ..Default::default()
                })
                .exec_with_returning(txn)
                .await?;

                let (model, token) = token::generate_token(user.id);

                token::Entity::insert(model)
                    .exec_without_returning(txn)
                    .await?;

                Ok((user, token))
            })
        })
        .await
        .into_raw_result();

    let (user, token) = match result {
        // Concurrent registration with the same email violates the unique key.
        Err(UserRegistrationError::DatabaseError(err)) => {
            return Err(if email_taken(&db, &email).await? {
                UserRegistrationError::EmailTaken
            } else {
                err.into()
            });
        }
        result => result?,
    };

    Ok((
        StatusCode::CREATED,
        [(SET_COOKIE, token_cookie(&token))],
        Json(AuthenticationResponse::new(token, user)),
    ))
}

async fn email_taken(db: &DatabaseConnection, email: &str) -> Result<bool, DbErr> {
    user::Entity::find()
        .select_only()
        .filter(user::Column::Email.eq(email))
        .exists(db)
        .await
}
