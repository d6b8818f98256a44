//! Migration: Create trips and trip_stops tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Trips::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Trips::TripId)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Trips::UserId).string_len(36).null())
                    .col(ColumnDef::new(Trips::LineId).string_len(36).null())
                    .col(ColumnDef::new(Trips::OriginStopId).string_len(36).null())
                    .col(ColumnDef::new(Trips::DestStopId).string_len(36).null())
                    .col(
                        ColumnDef::new(Trips::PlannedStart)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Trips::PlannedEnd)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Trips::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trips_user")
                            .from(Trips::Table, Trips::UserId)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trips_line")
                            .from(Trips::Table, Trips::LineId)
                            .to(Lines::Table, Lines::LineId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trips_origin_stop")
                            .from(Trips::Table, Trips::OriginStopId)
                            .to(Stops::Table, Stops::StopId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trips_dest_stop")
                            .from(Trips::Table, Trips::DestStopId)
                            .to(Stops::Table, Stops::StopId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_trips_user_id")
                    .table(Trips::Table)
                    .col(Trips::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TripStops::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TripStops::TripId)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TripStops::StopId).string_len(36).not_null())
                    .col(
                        ColumnDef::new(TripStops::Eta)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TripStops::Ata)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trip_stops_trip")
                            .from(TripStops::Table, TripStops::TripId)
                            .to(Trips::Table, Trips::TripId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trip_stops_stop")
                            .from(TripStops::Table, TripStops::StopId)
                            .to(Stops::Table, Stops::StopId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TripStops::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Trips::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Trips {
    Table,
    TripId,
    UserId,
    LineId,
    OriginStopId,
    DestStopId,
    PlannedStart,
    PlannedEnd,
    CreatedAt,
}

#[derive(Iden)]
enum TripStops {
    Table,
    TripId,
    StopId,
    Eta,
    Ata,
}

#[derive(Iden)]
enum Users {
    Table,
    UserId,
}

#[derive(Iden)]
enum Lines {
    Table,
    LineId,
}

#[derive(Iden)]
enum Stops {
    Table,
    StopId,
}
