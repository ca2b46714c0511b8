use std::fmt;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest},
    http::{Request, StatusCode},
    Json,
};
use derive_more::Error;
use validator::{Validate, ValidationErrors};

use crate::error::{error_response, ResponseError};

/// Errors related to JSON validation.
#[derive(Debug, Error)]
pub enum ValidatedJsonRejection {
    /// Unable to parse a JSON value.
    JsonParsingError(JsonRejection),

    /// Unable to validate a JSON value.
    ValidationError(ValidationErrors),
}

impl fmt::Display for ValidatedJsonRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidatedJsonRejection::JsonParsingError(rejection) => {
                f.write_str(&rejection.body_text())
            }
            ValidatedJsonRejection::ValidationError(errors) => {
                f.write_str(&validation_message(errors))
            }
        }
    }
}

impl ResponseError for ValidatedJsonRejection {
    fn status(&self) -> StatusCode {
        match self {
            ValidatedJsonRejection::JsonParsingError(rejection) => match rejection.status() {
                StatusCode::UNPROCESSABLE_ENTITY => StatusCode::BAD_REQUEST,
                status => status,
            },
            ValidatedJsonRejection::ValidationError(_) => StatusCode::BAD_REQUEST,
        }
    }
}

error_response!(ValidatedJsonRejection);

/// Join field validation messages into a single human-readable message.
fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("Invalid value for {field}"),
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Wrapper for [`axum`] JSON value validation.
///
/// Equivalent to the [`axum`]'s [`Json`] struct
/// with [`validator`] crate support.
///
/// [`JSON`]: axum::extract::Json
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S, B> FromRequest<S, B> for ValidatedJson<T>
where
    T: Validate,
    B: Send + 'static,
    S: Sync,
    Json<T>: FromRequest<S, B, Rejection = JsonRejection>,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonParsingError)?;

        match value.validate() {
            Ok(_) => Ok(ValidatedJson(value)),
            Err(err) => Err(ValidatedJsonRejection::ValidationError(err)),
        }
    }
}
