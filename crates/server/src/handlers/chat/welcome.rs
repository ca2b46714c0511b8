use axum::{extract::Query, Json};
use common::assistant::{self, UserType};
use serde::Deserialize;

use super::ChatReply;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WelcomeQuery {
    #[serde(default)]
    user_type: UserType,
}

/// Get a greeting tailored to the user type.
pub(super) async fn welcome(Query(query): Query<WelcomeQuery>) -> Json<ChatReply> {
    Json(ChatReply::new(assistant::welcome_message(query.user_type)))
}

#[cfg(test)]
mod tests {
    use crate::testing::{create_app, create_database, ResponseBodyExt};

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use common::{
        assistant::{welcome_message, UserType},
        config::Config,
    };
    use tower::{Service, ServiceExt};

    #[tokio::test]
    async fn welcome() {
        let db = create_database().await;
        let (mut app, _uploads) = create_app(db, Config::for_tests());

        let response = app
            .call(
                Request::builder()
                    .uri("/api/v1/chat/welcome?userType=farmer")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.json().await["reply"],
            welcome_message(UserType::Farmer)
        );

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/chat/welcome")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.json().await["reply"],
            welcome_message(UserType::Buyer)
        );
    }
}
