use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContractImages::Table)
                    .col(
                        ColumnDef::new(ContractImages::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContractImages::ContractId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContractImages::Path).string().not_null())
                    .col(ColumnDef::new(ContractImages::Position).integer().not_null())
                    .index(
                        Index::create()
                            .name("contract_id_position_contract_images_idx")
                            .col(ContractImages::ContractId)
                            .col(ContractImages::Position)
                            .unique(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ContractImages::Table, ContractImages::ContractId)
                            .to(crate::Contracts::Table, crate::Contracts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContractImages::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
enum ContractImages {
    Table,
    Id,
    ContractId,
    Path,
    Position,
}
