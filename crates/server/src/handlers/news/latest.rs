use std::sync::Arc;

use axum::{Extension, Json};
use common::config::Config;

use super::{fetch_articles, NewsRequestError, NewsResponse};

/// Fetch the latest agricultural news.
pub(super) async fn latest(
    Extension(config): Extension<Arc<Config>>,
) -> Result<Json<NewsResponse>, NewsRequestError> {
    let articles = fetch_articles(&config, None, "Failed to fetch news").await?;

    Ok(Json(NewsResponse::new(articles)))
}

#[cfg(test)]
mod tests {
    use crate::{
        handlers::news::tests::{config, feed_server},
        testing::{create_app, create_database, ResponseBodyExt},
    };

    use assert_json::{assert_json, validators};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn latest() {
        let address = feed_server().await;

        let db = create_database().await;
        let (app, _uploads) = create_app(db, config(address, "/rss/search"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/news")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        assert_json!(response.json().await, {
            "success": true,
            "count": 1,
            "articles": [
                {
                    "id": 0,
                    "title": "agriculture india",
                    "link": "https://example.com/article",
                    "published": "Mon, 01 Jul 2024 10:00:00 GMT",
                    "summary": "Summary",
                    "source": "Krishi Jagran",
                }
            ]
        });
    }

    #[tokio::test]
    async fn upstream_failure() {
        let address = feed_server().await;

        let db = create_database().await;
        let (app, _uploads) = create_app(db, config(address, "/broken/search"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/news")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        assert_json!(response.json().await, {
            "success": false,
            "message": "Failed to fetch news",
            "error": validators::string(|_| Ok(())),
        });
    }
}
