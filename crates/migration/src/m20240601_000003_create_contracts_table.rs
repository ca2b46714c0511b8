use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contracts::Table)
                    .col(
                        ColumnDef::new(Contracts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contracts::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Contracts::CropName).string().not_null())
                    .col(ColumnDef::new(Contracts::CropVariety).string())
                    .col(ColumnDef::new(Contracts::CropCategory).string().not_null())
                    .col(ColumnDef::new(Contracts::Quantity).double().not_null())
                    .col(ColumnDef::new(Contracts::QuantityUnit).string().not_null())
                    .col(ColumnDef::new(Contracts::ExpectedYieldDate).date().not_null())
                    .col(ColumnDef::new(Contracts::SowingDate).date())
                    .col(ColumnDef::new(Contracts::Address).text().not_null())
                    .col(ColumnDef::new(Contracts::State).string().not_null())
                    .col(ColumnDef::new(Contracts::District).string().not_null())
                    .col(ColumnDef::new(Contracts::Village).string().not_null())
                    .col(ColumnDef::new(Contracts::PinCode).string_len(6).not_null())
                    .col(ColumnDef::new(Contracts::FarmArea).double().not_null())
                    .col(ColumnDef::new(Contracts::AreaUnit).string().not_null())
                    .col(ColumnDef::new(Contracts::Latitude).string())
                    .col(ColumnDef::new(Contracts::Longitude).string())
                    .col(ColumnDef::new(Contracts::ExpectedPrice).double().not_null())
                    .col(ColumnDef::new(Contracts::MinPrice).double().not_null())
                    .col(
                        ColumnDef::new(Contracts::RequiresAdvance)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Contracts::AdvanceAmount).double())
                    .col(ColumnDef::new(Contracts::PaymentMode).string().not_null())
                    .col(
                        ColumnDef::new(Contracts::PreferredBuyerType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Contracts::ContractDuration).string().not_null())
                    .col(
                        ColumnDef::new(Contracts::DeliveryResponsibility)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Contracts::DeliveryLocation).text().not_null())
                    .col(ColumnDef::new(Contracts::PenaltyClauses).text())
                    .col(ColumnDef::new(Contracts::BankName).string().not_null())
                    .col(ColumnDef::new(Contracts::AccountNumber).string().not_null())
                    .col(
                        ColumnDef::new(Contracts::AccountHolderName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Contracts::IfscCode).string_len(11).not_null())
                    .col(ColumnDef::new(Contracts::UpiId).string())
                    .col(
                        ColumnDef::new(Contracts::UseSmartContract)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Contracts::WalletAddress).string())
                    .col(ColumnDef::new(Contracts::PreferredBlockchain).string_len(32))
                    .col(
                        ColumnDef::new(Contracts::EscrowRequired)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Contracts::EscrowPercentage).string_len(2))
                    .col(
                        ColumnDef::new(Contracts::AutomaticPayout)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Contracts::IdProofDocument).string().not_null())
                    .col(ColumnDef::new(Contracts::LandProofDocument).string())
                    .col(ColumnDef::new(Contracts::Status).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Contracts::AllowVisibility)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Contracts::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Contracts::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Contracts::Table, Contracts::UserId)
                            .to(crate::Users::Table, crate::Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("user_id_contracts_idx")
                    .table(Contracts::Table)
                    .col(Contracts::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Contracts::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
pub(crate) enum Contracts {
    Table,
    Id,
    UserId,
    CropName,
    CropVariety,
    CropCategory,
    Quantity,
    QuantityUnit,
    ExpectedYieldDate,
    SowingDate,
    Address,
    State,
    District,
    Village,
    PinCode,
    FarmArea,
    AreaUnit,
    Latitude,
    Longitude,
    ExpectedPrice,
    MinPrice,
    RequiresAdvance,
    AdvanceAmount,
    PaymentMode,
    PreferredBuyerType,
    ContractDuration,
    DeliveryResponsibility,
    DeliveryLocation,
    PenaltyClauses,
    BankName,
    AccountNumber,
    AccountHolderName,
    IfscCode,
    UpiId,
    UseSmartContract,
    WalletAddress,
    PreferredBlockchain,
    EscrowRequired,
    EscrowPercentage,
    AutomaticPayout,
    IdProofDocument,
    LandProofDocument,
    Status,
    AllowVisibility,
    CreatedAt,
    UpdatedAt,
}
