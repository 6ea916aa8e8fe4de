//! Create `departments` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(uuid(Departments::Id).primary_key())
                    .col(string_len(Departments::Name, 128).not_null())
                    .col(string_len(Departments::Description, 512).not_null())
                    .col(big_integer(Departments::Version).not_null())
                    .col(timestamp_with_time_zone(Departments::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Departments::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Departments {
    Table,
    Id,
    Name,
    Description,
    Version,
    CreatedAt,
    UpdatedAt,
}
