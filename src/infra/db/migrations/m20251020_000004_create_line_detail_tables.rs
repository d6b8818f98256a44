//! Migration: Create stop_times and line_schedules tables.
//!
//! Both belong to a line and cascade with it. The only hard itinerary
//! constraint is (line, stop) uniqueness; offset monotonicity and
//! one-schedule-per-(line, dow) are repository-level invariants.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StopTimes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StopTimes::StopTimeId)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StopTimes::LineId).string_len(36).not_null())
                    .col(ColumnDef::new(StopTimes::StopId).string_len(36).not_null())
                    .col(
                        ColumnDef::new(StopTimes::ScheduledSecondsFromStart)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stop_times_line")
                            .from(StopTimes::Table, StopTimes::LineId)
                            .to(Lines::Table, Lines::LineId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stop_times_stop")
                            .from(StopTimes::Table, StopTimes::StopId)
                            .to(Stops::Table, Stops::StopId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_stop_times_line_stop")
                    .table(StopTimes::Table)
                    .col(StopTimes::LineId)
                    .col(StopTimes::StopId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LineSchedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LineSchedules::ScheduleId)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LineSchedules::LineId).string_len(36).not_null())
                    .col(
                        ColumnDef::new(LineSchedules::Dow)
                            .small_integer()
                            .not_null()
                            .check(Expr::col(LineSchedules::Dow).between(0, 6)),
                    )
                    .col(ColumnDef::new(LineSchedules::StartTime).time().not_null())
                    .col(ColumnDef::new(LineSchedules::EndTime).time().not_null())
                    .col(
                        ColumnDef::new(LineSchedules::HeadwayMinutes)
                            .integer()
                            .not_null()
                            .check(Expr::col(LineSchedules::HeadwayMinutes).gt(0)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_line_schedules_line")
                            .from(LineSchedules::Table, LineSchedules::LineId)
                            .to(Lines::Table, Lines::LineId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_line_schedules_line_dow")
                    .table(LineSchedules::Table)
                    .col(LineSchedules::LineId)
                    .col(LineSchedules::Dow)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LineSchedules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StopTimes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum StopTimes {
    Table,
    StopTimeId,
    LineId,
    StopId,
    ScheduledSecondsFromStart,
}

#[derive(Iden)]
enum LineSchedules {
    Table,
    ScheduleId,
    LineId,
    Dow,
    StartTime,
    EndTime,
    HeadwayMinutes,
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
