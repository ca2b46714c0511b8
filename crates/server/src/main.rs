mod auth;
mod error;
mod handlers;
mod pagination;
mod validation;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    Extension, Router, Server,
};
use common::{
    config::{self, Config},
    logging,
    storage::FileStorage,
};
use db::{Database, DatabaseConnection};
use tokio::signal;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::new(None)?;

    logging::init(&config);

    let Some(server_config) = config.server.as_ref() else {
        return Err(anyhow::Error::msg("unable to load server config"));
    };

    let address = server_config.address;

    info!("connecting to database");
    let database = Arc::new(Database::connect(&config.database.url).await?);
    let storage = FileStorage::new(&config.storage).await?;
    let config = Arc::new(config);

    info!(%address, "starting server");

    Server::bind(&address)
        .serve(app_router(database, config, storage).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");

    Ok(())
}

fn app_router(
    database: Arc<DatabaseConnection>,
    config: Arc<Config>,
    storage: FileStorage,
) -> Router {
    let api_routes = Router::new()
        .nest("/auth", handlers::auth::routes(database.clone()))
        .nest("/contracts", handlers::contracts::routes(database.clone()))
        .nest("/blockchain", handlers::blockchain::routes(database.clone()))
        .nest("/news", handlers::news::routes())
        .nest("/chat", handlers::chat::routes());

    let mut router = Router::new().nest("/api/v1", api_routes);

    if let FileStorage::Local { root } = &storage {
        router = router.nest_service("/uploads", ServeDir::new(root));
    }

    router
        .fallback(error::not_found)
        .layer(DefaultBodyLimit::max(config.limits.request_size))
        .layer(Extension(storage))
        .layer(Extension(config.clone()))
        .layer(cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http())
        .with_state(database)
}

/// Allow credentialed requests from the web application origin.
fn cors_layer(config: &config::Cors) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true);

    match HeaderValue::from_str(&config.allowed_origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            warn!(origin = %config.allowed_origin, "invalid CORS origin, cross-origin requests are disabled");
            layer
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(%err, "unable to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(%err, "unable to listen for terminate signal");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutting down");
}
