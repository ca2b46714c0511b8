/// Buyer agreement routes.
mod agreements;

/// Contract listing creation route.
mod create;

/// Contract listing deletion route.
mod delete;

/// Contract listing details route.
mod details;

/// Listing form validation.
mod draft;

/// Multipart listing form parsing.
mod form;

/// Marketplace listing route.
mod list;

/// Owner listing routes.
mod listings;

/// Contract listing update route.
mod update;

use std::{collections::HashMap, sync::Arc};

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use db::{
    contract, contract_image, user, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection,
    Date, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use serde::Serialize;

use crate::auth;

/// Create a router that provides an API server with contract listing routes.
pub(crate) fn routes(database: Arc<DatabaseConnection>) -> Router<Arc<DatabaseConnection>> {
    Router::new()
        .route("/", get(list::list).post(create::create))
        .route("/my-listings", get(listings::my_listings))
        .route("/active", get(listings::active))
        .route(
            "/:id",
            get(details::details)
                .put(update::update)
                .delete(delete::delete),
        )
        .route("/:id/create-agreement", post(agreements::create))
        .route("/:id/agreements", get(agreements::list))
        .route_layer(from_fn_with_state(database, auth::require_authentication))
}

/// Public information about a listing owner.
#[derive(Serialize)]
pub(crate) struct OwnerData {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<user::Model> for OwnerData {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
        }
    }
}

/// A single contract listing data.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContractData {
    pub id: i64,

    #[serde(skip)]
    pub user_id: i64,

    pub created_by: Option<OwnerData>,

    pub crop_name: String,
    pub crop_variety: Option<String>,
    pub crop_category: String,
    pub quantity: f64,
    pub quantity_unit: String,
    pub expected_yield_date: String,
    pub sowing_date: Option<String>,

    pub address: String,
    pub state: String,
    pub district: String,
    pub village: String,
    pub pin_code: String,
    pub farm_area: f64,
    pub area_unit: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,

    pub expected_price: f64,
    pub min_price: f64,
    pub requires_advance: bool,
    pub advance_amount: Option<f64>,
    pub payment_mode: String,
    pub preferred_buyer_type: String,

    pub contract_duration: String,
    pub delivery_responsibility: String,
    pub delivery_location: String,
    pub penalty_clauses: Option<String>,

    pub bank_name: String,
    pub account_number: String,
    pub account_holder_name: String,
    pub ifsc_code: String,
    pub upi_id: Option<String>,

    pub use_smart_contract: bool,
    pub wallet_address: Option<String>,
    pub preferred_blockchain: Option<contract::Blockchain>,
    pub escrow_required: bool,
    pub escrow_percentage: Option<contract::EscrowPercentage>,
    pub automatic_payout: bool,

    pub images: Vec<String>,
    pub id_proof_document: String,
    pub land_proof_document: Option<String>,

    pub status: contract::Status,
    pub allow_visibility: bool,

    pub created_at: i64,
    pub updated_at: i64,
}

impl ContractData {
    fn new(model: contract::Model, owner: Option<user::Model>, images: Vec<String>) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            created_by: owner.map(OwnerData::from),
            crop_name: model.crop_name,
            crop_variety: model.crop_variety,
            crop_category: model.crop_category,
            quantity: model.quantity,
            quantity_unit: model.quantity_unit,
            expected_yield_date: format_date(model.expected_yield_date),
            sowing_date: model.sowing_date.map(format_date),
            address: model.address,
            state: model.state,
            district: model.district,
            village: model.village,
            pin_code: model.pin_code,
            farm_area: model.farm_area,
            area_unit: model.area_unit,
            latitude: model.latitude,
            longitude: model.longitude,
            expected_price: model.expected_price,
            min_price: model.min_price,
            requires_advance: model.requires_advance,
            advance_amount: model.advance_amount,
            payment_mode: model.payment_mode,
            preferred_buyer_type: model.preferred_buyer_type,
            contract_duration: model.contract_duration,
            delivery_responsibility: model.delivery_responsibility,
            delivery_location: model.delivery_location,
            penalty_clauses: model.penalty_clauses,
            bank_name: model.bank_name,
            account_number: model.account_number,
            account_holder_name: model.account_holder_name,
            ifsc_code: model.ifsc_code,
            upi_id: model.upi_id,
            use_smart_contract: model.use_smart_contract,
            wallet_address: model.wallet_address,
            preferred_blockchain: model.preferred_blockchain,
            escrow_required: model.escrow_required,
            escrow_percentage: model.escrow_percentage,
            automatic_payout: model.automatic_payout,
            images,
            id_proof_document: model.id_proof_document,
            land_proof_document: model.land_proof_document,
            status: model.status,
            allow_visibility: model.allow_visibility,
            created_at: model.created_at.assume_utc().unix_timestamp(),
            updated_at: model.updated_at.assume_utc().unix_timestamp(),
        }
    }

    /// Check whether the provided user may see this listing.
    pub fn is_visible_to(&self, user_id: i64) -> bool {
        self.allow_visibility || self.user_id == user_id
    }
}

/// Single contract listing response.
#[derive(Serialize)]
pub(crate) struct ContractResponse {
    status: &'static str,
    contract: ContractData,
}

impl ContractResponse {
    fn new(contract: ContractData) -> Self {
        Self {
            status: "success",
            contract,
        }
    }
}

/// Format a calendar date as `YYYY-MM-DD`.
pub(crate) fn format_date(date: Date) -> String {
    date.to_string()
}

/// Load contract listings matching the provided query, newest first.
///
/// Listing owners and images are loaded with one additional query each.
pub(crate) async fn load_contracts<C: ConnectionTrait>(
    db: &C,
    query: Select<contract::Entity>,
) -> Result<Vec<ContractData>, DbErr> {
    let contracts = query
        .order_by_desc(contract::Column::CreatedAt)
        .order_by_desc(contract::Column::Id)
        .find_also_related(user::Entity)
        .all(db)
        .await?;

    let ids: Vec<i64> = contracts.iter().map(|(contract, _)| contract.id).collect();
    let mut images = load_images(db, ids).await?;

    Ok(contracts
        .into_iter()
        .map(|(contract, owner)| {
            let images = images.remove(&contract.id).unwrap_or_default();
            ContractData::new(contract, owner, images)
        })
        .collect())
}

/// Load a single contract listing by its identifier.
pub(crate) async fn load_contract<C: ConnectionTrait>(
    db: &C,
    id: i64,
) -> Result<Option<ContractData>, DbErr> {
    Ok(load_contracts(db, contract::Entity::find_by_id(id))
        .await?
        .pop())
}

/// Load image paths of the provided contracts, grouped by contract identifier.
async fn load_images<C: ConnectionTrait>(
    db: &C,
    ids: Vec<i64>,
) -> Result<HashMap<i64, Vec<String>>, DbErr> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = contract_image::Entity::find()
        .select_only()
        .columns([
            contract_image::Column::ContractId,
            contract_image::Column::Path,
        ])
        .filter(contract_image::Column::ContractId.is_in(ids))
        .order_by_asc(contract_image::Column::Position)
        .into_tuple::<(i64, String)>()
        .all(db)
        .await?;

    let mut images: HashMap<i64, Vec<String>> = HashMap::new();

    for (contract_id, path) in rows {
        images.entry(contract_id).or_default().push(path);
    }

    Ok(images)
}

/// Load image paths of a single contract, in display order.
pub(crate) async fn load_image_paths<C: ConnectionTrait>(
    db: &C,
    contract_id: i64,
) -> Result<Vec<String>, DbErr> {
    Ok(load_images(db, vec![contract_id])
        .await?
        .remove(&contract_id)
        .unwrap_or_default())
}

/// Replace images of a contract with the provided list of paths.
pub(crate) async fn replace_images<C: ConnectionTrait>(
    db: &C,
    contract_id: i64,
    images: &[String],
) -> Result<(), DbErr> {
    contract_image::Entity::delete_many()
        .filter(contract_image::Column::ContractId.eq(contract_id))
        .exec(db)
        .await?;

    if images.is_empty() {
        return Ok(());
    }

    let models = images
        .iter()
        .zip(0..)
        .map(|(path, position)| contract_image::ActiveModel {
            contract_id: ActiveValue::Set(contract_id),
            path: ActiveValue::Set(path.clone()),
            position: ActiveValue::Set(position),
            ..Default::default()
        });

    contract_image::Entity::insert_many(models)
        .exec_without_returning(db)
        .await?;

    Ok(())
}
