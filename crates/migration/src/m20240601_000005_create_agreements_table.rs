use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Agreements::Table)
                    .col(
                        ColumnDef::new(Agreements::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Agreements::ContractId).big_integer().not_null())
                    .col(ColumnDef::new(Agreements::BuyerId).big_integer().not_null())
                    .col(ColumnDef::new(Agreements::Quantity).double().not_null())
                    .col(ColumnDef::new(Agreements::AgreedPrice).double().not_null())
                    .col(ColumnDef::new(Agreements::BuyerWalletAddress).string())
                    .col(ColumnDef::new(Agreements::FarmerWalletAddress).string())
                    .col(ColumnDef::new(Agreements::Blockchain).string_len(32))
                    .col(ColumnDef::new(Agreements::TransactionHash).string_len(66))
                    .col(ColumnDef::new(Agreements::DeliveryDate).date())
                    .col(ColumnDef::new(Agreements::Notes).text())
                    .col(ColumnDef::new(Agreements::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Agreements::Table, Agreements::ContractId)
                            .to(crate::Contracts::Table, crate::Contracts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Agreements::Table, Agreements::BuyerId)
                            .to(crate::Users::Table, crate::Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Agreements::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
enum Agreements {
    Table,
    Id,
    ContractId,
    BuyerId,
    Quantity,
    AgreedPrice,
    BuyerWalletAddress,
    FarmerWalletAddress,
    Blockchain,
    TransactionHash,
    DeliveryDate,
    Notes,
    CreatedAt,
}
