use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use db::{user, DatabaseConnection, DbErr, EntityTrait};
use derive_more::{Display, Error, From};
use serde::Serialize;

use super::UserData;
use crate::{
    auth::AuthenticatedUserId,
    error::{error_response, ResponseError},
};

#[derive(Debug, Display, From, Error)]
pub(super) enum CurrentUserError {
    DatabaseError(DbErr),

    #[display(fmt = "The user belonging to this token no longer exists")]
    UserNotFound,
}

impl ResponseError for CurrentUserError {
    fn status(&self) -> StatusCode {
        match self {
            CurrentUserError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CurrentUserError::UserNotFound => StatusCode::UNAUTHORIZED,
        }
    }
}

error_response!(CurrentUserError);

#[derive(Serialize)]
pub(super) struct CurrentUserResponse {
    status: &'static str,
    user: UserData,
}

/// Get the current authenticated user's details.
pub(super) async fn me(
    Extension(current_user): Extension<AuthenticatedUserId>,
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<CurrentUserResponse>, CurrentUserError> {
    let user = user::Entity::find_by_id(current_user.id())
        .one(&*db)
        .await?
        .ok_or(CurrentUserError::UserNotFound)?;

    Ok(Json(CurrentUserResponse {
        status: "success",
        user: user.into(),
    }))
}
