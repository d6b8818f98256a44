//! Driver assignment database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::DriverAssignment;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "driver_assignments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub assignment_id: String,
    pub driver_id: String,
    pub vehicle_id: String,
    pub line_id: String,
    pub start_ts: DateTimeUtc,
    /// NULL while the assignment is open
    pub end_ts: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::driver::Entity",
        from = "Column::DriverId",
        to = "super::driver::Column::DriverId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Driver,
    #[sea_orm(
        belongs_to = "super::vehicle::Entity",
        from = "Column::VehicleId",
        to = "super::vehicle::Column::VehicleId",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Vehicle,
    #[sea_orm(
        belongs_to = "super::line::Entity",
        from = "Column::LineId",
        to = "super::line::Column::LineId",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Line,
}

impl Related<super::driver::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Driver.def()
    }
}

impl Related<super::vehicle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicle.def()
    }
}

impl Related<super::line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Line.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for DriverAssignment {
    fn from(model: Model) -> Self {
        DriverAssignment {
            assignment_id: model.assignment_id,
            driver_id: model.driver_id,
            vehicle_id: model.vehicle_id,
            line_id: model.line_id,
            start_ts: model.start_ts,
            end_ts: model.end_ts,
        }
    }
}
