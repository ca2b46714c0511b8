use std::sync::Arc;

use axum::{
    extract::State,
    headers::{authorization::Bearer, Authorization, Cookie},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
    TypedHeader,
};
use db::{token, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use derive_more::{Display, Error, From};
use tracing::debug;

use crate::error::{error_response, ResponseError};

/// Name of the cookie that carries an authentication token.
pub(crate) const TOKEN_COOKIE: &str = "token";

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AuthenticatedUserId(i64);

impl AuthenticatedUserId {
    /// Get raw user identifier value.
    pub fn id(&self) -> i64 {
        self.0
    }
}

/// Identifier of the authentication token used by the current request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AuthenticationTokenId(i64);

impl AuthenticationTokenId {
    pub fn id(&self) -> i64 {
        self.0
    }
}

#[derive(Debug, Display, From, Error)]
pub(super) enum AuthenticationError {
    DatabaseError(DbErr),

    #[display(fmt = "You are not logged in! Please log in to get access.")]
    MissingAuthenticationToken,

    #[display(fmt = "invalid authentication token was provided")]
    InvalidAuthenticationToken,

    #[display(fmt = "authentication token has expired, please log in again")]
    ExpiredAuthenticationToken,
}

impl ResponseError for AuthenticationError {
    fn status(&self) -> StatusCode {
        match self {
            AuthenticationError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

error_response!(AuthenticationError);

/// Require a valid authentication token, passed either as a bearer token
/// or inside of the [`TOKEN_COOKIE`] cookie.
pub(super) async fn require_authentication<B>(
    State(db): State<Arc<DatabaseConnection>>,
    authorization: Option<TypedHeader<Authorization<Bearer>>>,
    cookie: Option<TypedHeader<Cookie>>,
    mut req: Request<B>,
    next: Next<B>,
) -> Result<Response, AuthenticationError> {
    let value = match (&authorization, &cookie) {
        (Some(TypedHeader(authorization)), _) => authorization.token(),
        (None, Some(TypedHeader(cookie))) => cookie
            .get(TOKEN_COOKIE)
            .ok_or(AuthenticationError::MissingAuthenticationToken)?,
        (None, None) => return Err(AuthenticationError::MissingAuthenticationToken),
    };

    let model = token::Entity::find()
        .filter(token::Column::Token.eq(value))
        .one(&*db)
        .await?
        .ok_or(AuthenticationError::InvalidAuthenticationToken)?;

    if model.is_expired() {
        debug!(user_id = model.user_id, "removing expired authentication token");

        token::Entity::delete_by_id(model.id).exec(&*db).await?;

        return Err(AuthenticationError::ExpiredAuthenticationToken);
    }

    req.extensions_mut().insert(AuthenticatedUserId(model.user_id));
    req.extensions_mut().insert(AuthenticationTokenId(model.id));

    Ok(next.run(req).await)
}
