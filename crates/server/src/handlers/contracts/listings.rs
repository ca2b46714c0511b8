use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use db::{
    contract::{self, Status},
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};
use derive_more::{Display, Error, From};
use serde::Serialize;

use super::{list::ContractListResponse, load_contracts, ContractData};
use crate::{
    auth::AuthenticatedUserId,
    error::{error_response, ResponseError},
};

#[derive(Debug, Display, From, Error)]
pub(super) enum OwnerListingsError {
    DatabaseError(DbErr),
}

impl ResponseError for OwnerListingsError {}

error_response!(OwnerListingsError);

#[derive(Serialize)]
pub(super) struct MyListingsResponse {
    status: &'static str,
    results: usize,
    listings: Vec<ContractData>,
}

/// List current user's listings that are still in progress.
pub(super) async fn my_listings(
    Extension(current_user): Extension<AuthenticatedUserId>,
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<MyListingsResponse>, OwnerListingsError> {
    let listings = load_contracts(
        &*db,
        contract::Entity::find()
            .filter(contract::Column::UserId.eq(current_user.id()))
            .filter(contract::Column::Status.is_in([Status::Active, Status::Pending])),
    )
    .await?;

    Ok(Json(MyListingsResponse {
        status: "success",
        results: listings.len(),
        listings,
    }))
}

/// List current user's active listings.
pub(super) async fn active(
    Extension(current_user): Extension<AuthenticatedUserId>,
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<ContractListResponse>, OwnerListingsError> {
    let contracts = load_contracts(
        &*db,
        contract::Entity::find()
            .filter(contract::Column::UserId.eq(current_user.id()))
            .filter(contract::Column::Status.eq(Status::Active)),
    )
    .await?;

    Ok(Json(ContractListResponse::new(contracts)))
}
