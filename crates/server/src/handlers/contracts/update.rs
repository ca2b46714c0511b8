use std::{collections::HashSet, sync::Arc};

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};
use common::{config::Config, storage::FileStorage};
use db::{
    contract, ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait,
    TransactionErrorExt, TransactionTrait,
};
use derive_more::{Display, Error, From};
use tracing::info;

use super::{
    draft::{ContractDraft, ContractValidationError},
    form::{ContractForm, UploadError},
    load_contract, load_image_paths, replace_images, ContractData, ContractResponse,
};
use crate::{
    auth::AuthenticatedUserId,
    error::{error_response, ResponseError},
};

/// Errors that may occur during the listing update process.
#[derive(Debug, Display, From, Error)]
pub(super) enum ContractUpdateError {
    /// Database-related error.
    DatabaseError(DbErr),

    UploadError(UploadError),

    ValidationError(ContractValidationError),

    #[display(fmt = "Contract not found")]
    ContractNotFound,

    #[display(fmt = "Not authorized to update this contract")]
    Forbidden,
}

impl ResponseError for ContractUpdateError {
    fn status(&self) -> StatusCode {
        match self {
            ContractUpdateError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ContractUpdateError::UploadError(err) => err.status(),
            ContractUpdateError::ValidationError(err) => err.status(),
            ContractUpdateError::ContractNotFound => StatusCode::NOT_FOUND,
            ContractUpdateError::Forbidden => StatusCode::FORBIDDEN,
        }
    }
}

error_response!(ContractUpdateError);

/// Listing update handler.
///
/// Only submitted fields are changed, but the resulting listing is validated as a whole.
/// Images are replaced when either kept or new images are submitted.
pub(super) async fn update(
    Path(id): Path<i64>,
    Extension(current_user): Extension<AuthenticatedUserId>,
    Extension(config): Extension<Arc<Config>>,
    Extension(storage): Extension<FileStorage>,
    State(db): State<Arc<DatabaseConnection>>,
    mut multipart: Multipart,
) -> Result<Json<ContractResponse>, ContractUpdateError> {
    let existing = contract::Entity::find_by_id(id)
        .one(&*db)
        .await?
        .ok_or(ContractUpdateError::ContractNotFound)?;

    if existing.user_id != current_user.id() {
        return Err(ContractUpdateError::Forbidden);
    }

    let form = ContractForm::read(&mut multipart, &storage, &config.limits).await?;
    let stored = form.stored.clone();

    match update_contract(&db, existing, form).await {
        Ok((contract, unreferenced)) => {
            storage.spawn_cleanup(unreferenced);

            info!(
                user_id = current_user.id(),
                contract_id = contract.id,
                "updated contract listing"
            );

            Ok(Json(ContractResponse::new(contract)))
        }
        Err(err) => {
            storage.spawn_cleanup(stored);
            Err(err)
        }
    }
}

/// Update a listing, returning it alongside of files that are no longer referenced.
async fn update_contract(
    db: &DatabaseConnection,
    existing: contract::Model,
    form: ContractForm,
) -> Result<(ContractData, Vec<String>), ContractUpdateError> {
    let current_images = load_image_paths(db, existing.id).await?;
    let mut draft = ContractDraft::from_model(&existing, current_images.clone());

    draft.apply(&form.fields)?;

    if !form.existing_images.is_empty() || !form.images.is_empty() {
        // Kept paths must either belong to this listing or come from this request.
        draft.images = form
            .existing_images
            .into_iter()
            .filter(|path| current_images.contains(path) || form.stored.contains(path))
            .chain(form.images)
            .collect();
    }

    if let Some(path) = form.id_proof {
        draft.id_proof_document = Some(path);
    }

    if let Some(path) = form.land_proof {
        draft.land_proof_document = Some(path);
    }

    let referenced: HashSet<String> = draft.files().cloned().collect();

    let (mut model, images) = draft.build()?;
    model.id = ActiveValue::Unchanged(existing.id);

    let id = existing.id;

    db.transaction::<_, _, ContractUpdateError>(|txn| {
        Box::pin(async move {
            model.update(txn).await?;
            replace_images(txn, id, &images).await?;

            Ok(())
        })
    })
    .await
    .into_raw_result()?;

    let contract = load_contract(db, id)
        .await?
        .ok_or(ContractUpdateError::ContractNotFound)?;

    let mut unreferenced: Vec<String> = current_images
        .iter()
        .chain(existing.documents())
        .chain(&form.stored)
        .filter(|path| !referenced.contains(*path))
        .cloned()
        .collect();

    unreferenced.sort();
    unreferenced.dedup();

    Ok((contract, unreferenced))
}
