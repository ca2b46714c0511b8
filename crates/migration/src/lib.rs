pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_users_table;
mod m20240601_000002_create_authentication_tokens_table;
mod m20240601_000003_create_contracts_table;
mod m20240601_000004_create_contract_images_table;
mod m20240601_000005_create_agreements_table;

pub(crate) use m20240601_000001_create_users_table::Users;
pub(crate) use m20240601_000003_create_contracts_table::Contracts;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_users_table::Migration),
            Box::new(m20240601_000002_create_authentication_tokens_table::Migration),
            Box::new(m20240601_000003_create_contracts_table::Migration),
            Box::new(m20240601_000004_create_contract_images_table::Migration),
            Box::new(m20240601_000005_create_agreements_table::Migration),
        ]
    }
}
