/// User authentication route.
mod login;

/// Authentication token revocation route.
mod logout;

/// Current user details route.
mod me;

/// User registration route.
mod register;

use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use db::{token::TOKEN_LIFESPAN, user, DatabaseConnection};
use serde::Serialize;

use crate::auth::{self, TOKEN_COOKIE};

/// Create a router that provides an API server with authentication routes.
pub(crate) fn routes(database: Arc<DatabaseConnection>) -> Router<Arc<DatabaseConnection>> {
    Router::new()
        .route("/logout", post(logout::logout))
        .route("/me", get(me::me))
        .route_layer(from_fn_with_state(database, auth::require_authentication))
        .route("/login", post(login::login))
        .route("/register", post(register::register))
}

/// Public user information.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserData {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: user::Role,
    pub created_at: i64,
}

impl From<user::Model> for UserData {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            role: model.role,
            created_at: model.created_at.assume_utc().unix_timestamp(),
        }
    }
}

/// Authentication token issued after a registration or a login.
#[derive(Serialize)]
pub(super) struct AuthenticationResponse {
    status: &'static str,
    token: String,
    user: UserData,
}

impl AuthenticationResponse {
    fn new(token: String, user: user::Model) -> Self {
        Self {
            status: "success",
            token,
            user: user.into(),
        }
    }
}

/// `Set-Cookie` header value that stores an authentication token in the browser.
fn token_cookie(token: &str) -> String {
    format!(
        "{TOKEN_COOKIE}={token}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        TOKEN_LIFESPAN.whole_seconds()
    )
}

/// `Set-Cookie` header value that removes an authentication token cookie.
fn expired_token_cookie() -> String {
    format!("{TOKEN_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}
