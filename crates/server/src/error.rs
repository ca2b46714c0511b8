//! JSON error responses.
//!
//! Handler error enums implement [`ResponseError`] to pick a status code and are
//! turned into responses with the [`error_response!`] macro. Client errors expose
//! their message, while server errors are logged and answered with a generic one.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

/// Message returned for server-side failures.
pub(crate) const GENERIC_ERROR_MESSAGE: &str = "Something went wrong!";

pub(crate) trait ResponseError: std::error::Error {
    /// HTTP status code of an error.
    fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Message exposed to a client for server errors.
    fn public_message(&self) -> &'static str {
        GENERIC_ERROR_MESSAGE
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    status: &'static str,
    message: &'a str,
}

/// Convert a [`ResponseError`] into an HTTP response.
pub(crate) fn into_response<E: ResponseError>(err: E) -> Response {
    let status = err.status();

    if status.is_server_error() {
        error!(%err, status = status.as_u16(), "request failed");

        let body = ErrorBody {
            status: "error",
            message: err.public_message(),
        };

        (status, Json(body)).into_response()
    } else {
        let message = err.to_string();

        let body = ErrorBody {
            status: "fail",
            message: &message,
        };

        (status, Json(body)).into_response()
    }
}

/// Implement [`IntoResponse`] for error types that implement [`ResponseError`].
macro_rules! error_response {
    ($($error:ty),+ $(,)?) => {
        $(
            impl axum::response::IntoResponse for $error {
                fn into_response(self) -> axum::response::Response {
                    $crate::error::into_response(self)
                }
            }
        )+
    };
}

pub(crate) use error_response;

/// Fallback handler for unknown routes.
pub(crate) async fn not_found() -> Response {
    let body = ErrorBody {
        status: "fail",
        message: "Route not found",
    };

    (StatusCode::NOT_FOUND, Json(body)).into_response()
}
