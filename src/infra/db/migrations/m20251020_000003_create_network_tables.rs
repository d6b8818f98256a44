//! Migration: Create lines and stops tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lines::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lines::LineId)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Lines::Code)
                            .string_len(16)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Lines::Name).string().not_null())
                    .col(ColumnDef::new(Lines::LineMode).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Lines::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Stops::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Stops::StopId)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Stops::Code)
                            .string_len(16)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Stops::Name).string().not_null())
                    .col(ColumnDef::new(Stops::Lat).double().null())
                    .col(ColumnDef::new(Stops::Lon).double().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Stops::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Lines::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Lines {
    Table,
    LineId,
    Code,
    Name,
    LineMode,
    Active,
}

#[derive(Iden)]
enum Stops {
    Table,
    StopId,
    Code,
    Name,
    Lat,
    Lon,
}
