/// Mock wallet connection route.
mod wallet;

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, routing::post, Router};
use db::DatabaseConnection;

use crate::auth;

pub(crate) fn routes(database: Arc<DatabaseConnection>) -> Router<Arc<DatabaseConnection>> {
    Router::new()
        .route("/wallet", post(wallet::connect))
        .route_layer(from_fn_with_state(database, auth::require_authentication))
}
