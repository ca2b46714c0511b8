use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use db::{
    contract::{self, Status},
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};
use derive_more::{Display, Error, From};
use serde::Serialize;

use super::{load_contracts, ContractData};
use crate::{
    auth::AuthenticatedUserId,
    error::{error_response, ResponseError},
    pagination::Pagination,
};

#[derive(Debug, Display, From, Error)]
pub(super) enum ContractListError {
    DatabaseError(DbErr),
}

impl ResponseError for ContractListError {}

error_response!(ContractListError);

#[derive(Serialize)]
pub(super) struct ContractListResponse {
    status: &'static str,
    results: usize,
    contracts: Vec<ContractData>,
}

impl ContractListResponse {
    pub(super) fn new(contracts: Vec<ContractData>) -> Self {
        Self {
            status: "success",
            results: contracts.len(),
            contracts,
        }
    }
}

/// List marketplace listings.
///
/// Visible active listings are shown to everyone, while owners also see all of their own listings.
pub(super) async fn list(
    Extension(current_user): Extension<AuthenticatedUserId>,
    State(db): State<Arc<DatabaseConnection>>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ContractListResponse>, ContractListError> {
    let query = contract::Entity::find().filter(
        Condition::any()
            .add(
                Condition::all()
                    .add(contract::Column::AllowVisibility.eq(true))
                    .add(contract::Column::Status.eq(Status::Active)),
            )
            .add(contract::Column::UserId.eq(current_user.id())),
    );

    let contracts = load_contracts(&*db, pagination.paginate(query)).await?;

    Ok(Json(ContractListResponse::new(contracts)))
}
