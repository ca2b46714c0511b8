use axum::{Extension, Json};
use common::chain;
use serde::Serialize;
use tracing::debug;

use crate::auth::AuthenticatedUserId;

#[derive(Serialize)]
pub(super) struct WalletConnectionResponse {
    status: &'static str,
    address: String,
}

/// Simulate a wallet connection.
///
/// No wallet provider is contacted; the returned address is random.
pub(super) async fn connect(
    Extension(current_user): Extension<AuthenticatedUserId>,
) -> Json<WalletConnectionResponse> {
    let address = chain::mock_wallet_address();

    debug!(user_id = current_user.id(), %address, "connected mock wallet");

    Json(WalletConnectionResponse {
        status: "success",
        address,
    })
}

#[cfg(test)]
mod tests {
    use crate::testing::{authorized, create_app, create_database, create_user, ResponseBodyExt};

    use assert_json::{assert_json, validators};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use common::config::Config;
    use db::user;
    use tower::ServiceExt;

    #[tokio::test]
    async fn connect() {
        let db = create_database().await;
        let (_, token) = create_user(&db, "buyer@example.com", user::Role::Buyer).await;

        let (app, _uploads) = create_app(db, Config::for_tests());

        let response = app
            .oneshot(
                authorized(&token)
                    .method("POST")
                    .uri("/api/v1/blockchain/wallet")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        assert_json!(response.json().await, {
            "status": "success",
            "address": validators::string(|val| {
                (val.len() == 42 && val.starts_with("0x"))
                    .then_some(())
                    .ok_or(String::from("invalid address"))
            }),
        });
    }

    #[tokio::test]
    async fn unauthenticated() {
        let db = create_database().await;
        let (app, _uploads) = create_app(db, Config::for_tests());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/blockchain/wallet")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
