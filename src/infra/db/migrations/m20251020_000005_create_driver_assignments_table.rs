//! Migration: Create driver_assignments table.
//!
//! The partial unique indexes close the open-assignment race at the
//! store level; the repository additionally re-checks inside a
//! serializable transaction.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DriverAssignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DriverAssignments::AssignmentId)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DriverAssignments::DriverId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DriverAssignments::VehicleId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DriverAssignments::LineId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DriverAssignments::StartTs)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DriverAssignments::EndTs)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_driver_assignments_driver")
                            .from(DriverAssignments::Table, DriverAssignments::DriverId)
                            .to(Drivers::Table, Drivers::DriverId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_driver_assignments_vehicle")
                            .from(DriverAssignments::Table, DriverAssignments::VehicleId)
                            .to(Vehicles::Table, Vehicles::VehicleId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_driver_assignments_line")
                            .from(DriverAssignments::Table, DriverAssignments::LineId)
                            .to(Lines::Table, Lines::LineId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_driver_assignments_line_id")
                    .table(DriverAssignments::Table)
                    .col(DriverAssignments::LineId)
                    .to_owned(),
            )
            .await?;

        // At most one open assignment per driver and per vehicle
        manager
            .create_index(
                Index::create()
                    .name("uq_driver_assignments_open_driver")
                    .table(DriverAssignments::Table)
                    .col(DriverAssignments::DriverId)
                    .unique()
                    .and_where(Expr::col(DriverAssignments::EndTs).is_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_driver_assignments_open_vehicle")
                    .table(DriverAssignments::Table)
                    .col(DriverAssignments::VehicleId)
                    .unique()
                    .and_where(Expr::col(DriverAssignments::EndTs).is_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DriverAssignments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DriverAssignments {
    Table,
    AssignmentId,
    DriverId,
    VehicleId,
    LineId,
    StartTs,
    EndTs,
}

#[derive(Iden)]
enum Drivers {
    Table,
    DriverId,
}

#[derive(Iden)]
enum Vehicles {
    Table,
    VehicleId,
}

#[derive(Iden)]
enum Lines {
    Table,
    LineId,
}
