//! Buyer agreement on a contract listing.
//!
//! Agreements on smart contract listings carry a simulated transaction hash;
//! no chain is ever contacted.

use sea_orm::entity::prelude::*;

use crate::contract::Blockchain;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "agreements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub contract_id: i64,
    pub buyer_id: i64,
    pub quantity: f64,
    pub agreed_price: f64,
    pub buyer_wallet_address: Option<String>,
    pub farmer_wallet_address: Option<String>,
    pub blockchain: Option<Blockchain>,
    pub transaction_hash: Option<String>,
    pub delivery_date: Option<TimeDate>,
    pub notes: Option<String>,
    pub created_at: TimeDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::contract::Entity",
        from = "Column::ContractId",
        to = "super::contract::Column::Id"
    )]
    Contract,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::BuyerId",
        to = "super::user::Column::Id"
    )]
    Buyer,
}

impl Related<super::contract::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contract.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Buyer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
