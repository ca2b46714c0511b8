//! Crop contract listing.
//!
//! A contract is a farmer's offer to sell a future harvest under stated
//! commercial and delivery terms. Listing images live in a separate
//! [`contract_image`](super::contract_image) table, ordered by their position.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contract listing model.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    /// Unique contract identifier.
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Owner user identifier.
    pub user_id: i64,

    pub crop_name: String,
    pub crop_variety: Option<String>,
    pub crop_category: String,
    pub quantity: f64,
    pub quantity_unit: String,
    pub expected_yield_date: TimeDate,
    pub sowing_date: Option<TimeDate>,

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
    pub preferred_blockchain: Option<Blockchain>,
    pub escrow_required: bool,
    pub escrow_percentage: Option<EscrowPercentage>,
    pub automatic_payout: bool,

    /// Public path of the owner's ID proof document.
    pub id_proof_document: String,

    /// Public path of the land ownership proof document.
    pub land_proof_document: Option<String>,

    pub status: Status,
    pub allow_visibility: bool,

    pub created_at: TimeDateTime,
    pub updated_at: TimeDateTime,
}

/// Contract listing status.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
pub enum Status {
    #[default]
    #[sea_orm(string_value = "Active")]
    Active,
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Completed")]
    Completed,
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
}

/// Chain a smart contract settlement is simulated on.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
pub enum Blockchain {
    #[default]
    #[sea_orm(string_value = "Polygon")]
    Polygon,
    #[sea_orm(string_value = "Ethereum")]
    Ethereum,
    #[serde(rename = "Binance Smart Chain")]
    #[sea_orm(string_value = "Binance Smart Chain")]
    BinanceSmartChain,
    #[sea_orm(string_value = "Solana")]
    Solana,
}

/// Share of the contract value held in escrow.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(2))")]
pub enum EscrowPercentage {
    #[default]
    #[serde(rename = "10")]
    #[sea_orm(string_value = "10")]
    Ten,
    #[serde(rename = "15")]
    #[sea_orm(string_value = "15")]
    Fifteen,
    #[serde(rename = "20")]
    #[sea_orm(string_value = "20")]
    Twenty,
    #[serde(rename = "25")]
    #[sea_orm(string_value = "25")]
    TwentyFive,
}

/// Contract listing model relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,

    #[sea_orm(has_many = "super::contract_image::Entity")]
    Images,

    #[sea_orm(has_many = "super::agreement::Entity")]
    Agreements,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::contract_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl Related<super::agreement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Agreements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Public paths of the contract documents.
    pub fn documents(&self) -> impl Iterator<Item = &String> {
        std::iter::once(&self.id_proof_document).chain(self.land_proof_document.as_ref())
    }
}
