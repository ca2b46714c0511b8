use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use db::{DatabaseConnection, DbErr};
use derive_more::{Display, Error, From};

use super::{load_contract, ContractResponse};
use crate::{
    auth::AuthenticatedUserId,
    error::{error_response, ResponseError},
};

/// Errors that may occur during the listing details request handling.
#[derive(Debug, Display, From, Error)]
pub(super) enum ContractDetailsError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[display(fmt = "Contract not found")]
    ContractNotFound,

    /// Listing is hidden from anyone except its owner.
    #[display(fmt = "Not authorized to view this contract")]
    Forbidden,
}

impl ResponseError for ContractDetailsError {
    fn status(&self) -> StatusCode {
        match self {
            ContractDetailsError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ContractDetailsError::ContractNotFound => StatusCode::NOT_FOUND,
            ContractDetailsError::Forbidden => StatusCode::FORBIDDEN,
        }
    }
}

error_response!(ContractDetailsError);

/// Get details of a single listing.
pub(super) async fn details(
    Path(id): Path<i64>,
    Extension(current_user): Extension<AuthenticatedUserId>,
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<ContractResponse>, ContractDetailsError> {
    let contract = load_contract(&*db, id)
        .await?
        .ok_or(ContractDetailsError::ContractNotFound)?;

    if !contract.is_visible_to(current_user.id()) {
        return Err(ContractDetailsError::Forbidden);
    }

    Ok(Json(ContractResponse::new(contract)))
}
