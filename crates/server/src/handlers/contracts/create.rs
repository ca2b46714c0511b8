use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Extension, Json,
};
use common::{config::Config, storage::FileStorage};
use db::{
    contract, ActiveValue, DatabaseConnection, DbErr, EntityTrait, TransactionErrorExt,
    TransactionTrait,
};
use derive_more::{Display, Error, From};
use tracing::info;

use super::{
    draft::{ContractDraft, ContractValidationError},
    form::{ContractForm, UploadError},
    load_contract, replace_images, ContractResponse,
};
use crate::{
    auth::AuthenticatedUserId,
    error::{error_response, ResponseError},
};

/// Errors that may occur during the listing creation process.
#[derive(Debug, Display, From, Error)]
pub(super) enum ContractCreateError {
    /// Database-related error.
    DatabaseError(DbErr),

    UploadError(UploadError),

    ValidationError(ContractValidationError),

    /// Created listing could not be loaded back.
    #[display(fmt = "created contract is missing")]
    MissingContract,
}

impl ResponseError for ContractCreateError {
    fn status(&self) -> StatusCode {
        match self {
            ContractCreateError::UploadError(err) => err.status(),
            ContractCreateError::ValidationError(err) => err.status(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

error_response!(ContractCreateError);

/// Listing creation handler.
///
/// The current user becomes the listing owner, and the listing always starts as active.
pub(super) async fn create(
    Extension(current_user): Extension<AuthenticatedUserId>,
    Extension(config): Extension<Arc<Config>>,
    Extension(storage): Extension<FileStorage>,
    State(db): State<Arc<DatabaseConnection>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ContractResponse>), ContractCreateError> {
    let form = ContractForm::read(&mut multipart, &storage, &config.limits).await?;

    let mut draft = ContractDraft::default();
    let stored = form.stored.clone();

    let result = create_contract(&db, current_user.id(), form, &mut draft).await;

    let referenced: Vec<&String> = draft.files().collect();
    let unreferenced: Vec<String> = match &result {
        Ok(_) => stored
            .into_iter()
            .filter(|path| !referenced.contains(&path))
            .collect(),
        Err(_) => stored,
    };

    storage.spawn_cleanup(unreferenced);

    let contract = result?;

    info!(
        user_id = current_user.id(),
        contract_id = contract.id,
        "created contract listing"
    );

    Ok((StatusCode::CREATED, Json(ContractResponse::new(contract))))
}

async fn create_contract(
    db: &DatabaseConnection,
    user_id: i64,
    form: ContractForm,
    draft: &mut ContractDraft,
) -> Result<super::ContractData, ContractCreateError> {
    draft.apply(&form.fields)?;
    draft.images = form.images;
    draft.id_proof_document = form.id_proof;
    draft.land_proof_document = form.land_proof;
    draft.status = contract::Status::Active;

    let (mut model, images) = draft.clone().build()?;
    model.user_id = ActiveValue::Set(user_id);
    model.created_at = ActiveValue::Set(db::now());

    let id = db
        .transaction::<_, _, ContractCreateError>(|txn| {
            Box::pin(async move {
                let id = contract::Entity::insert(model)
                    .exec(txn)
                    .await?
                    .last_insert_id;

                replace_images(txn, id, &images).await?;

                Ok(id)
            })
        })
        .await
        .into_raw_result()?;

    load_contract(db, id)
        .await?
        .ok_or(ContractCreateError::MissingContract)
}
