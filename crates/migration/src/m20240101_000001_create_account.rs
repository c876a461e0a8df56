//! Create `account` table.
//!
//! Single resource table keyed by a store-assigned serial id.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(integer(Account::Id).primary_key().auto_increment())
                    .col(string_len(Account::Name, 64).not_null())
                    .col(string_len(Account::Email, 64).not_null())
                    .col(string_len(Account::Address, 256).not_null())
                    .col(
                        ColumnDef::new(Account::PhoneNumber)
                            .string_len(32)
                            .null(),
                    )
                    .col(date(Account::DateJoined).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Account::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Account {
    Table,
    Id,
    Name,
    Email,
    Address,
    PhoneNumber,
    DateJoined,
}
