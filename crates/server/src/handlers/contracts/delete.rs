use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension,
};
use common::storage::FileStorage;
use db::{
    agreement, contract, contract_image, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, TransactionErrorExt, TransactionTrait,
};
use derive_more::{Display, Error, From};
use tracing::info;

use super::load_image_paths;
use crate::{
    auth::AuthenticatedUserId,
    error::{error_response, ResponseError},
};

#[derive(Debug, Display, From, Error)]
pub(super) enum ContractDeleteError {
    DatabaseError(DbErr),

    #[display(fmt = "Contract not found")]
    ContractNotFound,

    #[display(fmt = "Not authorized to delete this contract")]
    Forbidden,
}

impl ResponseError for ContractDeleteError {
    fn status(&self) -> StatusCode {
        match self {
            ContractDeleteError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ContractDeleteError::ContractNotFound => StatusCode::NOT_FOUND,
            ContractDeleteError::Forbidden => StatusCode::FORBIDDEN,
        }
    }
}

error_response!(ContractDeleteError);

/// Delete a listing owned by the current user.
///
/// Listing images and documents are removed in background after the listing itself is deleted.
pub(super) async fn delete(
    Path(id): Path<i64>,
    Extension(current_user): Extension<AuthenticatedUserId>,
    Extension(storage): Extension<FileStorage>,
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<StatusCode, ContractDeleteError> {
    let existing = contract::Entity::find_by_id(id)
        .one(&*db)
        .await?
        .ok_or(ContractDeleteError::ContractNotFound)?;

    if existing.user_id != current_user.id() {
        return Err(ContractDeleteError::Forbidden);
    }

    let images = load_image_paths(&*db, id).await?;

    db.transaction::<_, _, ContractDeleteError>(|txn| {
        Box::pin(async move {
            contract_image::Entity::delete_many()
                .filter(contract_image::Column::ContractId.eq(id))
                .exec(txn)
                .await?;

            agreement::Entity::delete_many()
                .filter(agreement::Column::ContractId.eq(id))
                .exec(txn)
                .await?;

            contract::Entity::delete_by_id(id).exec(txn).await?;

            Ok(())
        })
    })
    .await
    .into_raw_result()?;

    storage.spawn_cleanup(images.into_iter().chain(existing.documents().cloned()));

    info!(
        user_id = current_user.id(),
        contract_id = id,
        "deleted contract listing"
    );

    Ok(StatusCode::NO_CONTENT)
}
