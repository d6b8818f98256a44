//! Stop time database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::StopTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "stop_times")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub stop_time_id: String,
    pub line_id: String,
    pub stop_id: String,
    pub scheduled_seconds_from_start: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::line::Entity",
        from = "Column::LineId",
        to = "super::line::Column::LineId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Line,
    #[sea_orm(
        belongs_to = "super::stop::Entity",
        from = "Column::StopId",
        to = "super::stop::Column::StopId",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Stop,
}

impl Related<super::line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Line.def()
    }
}

impl Related<super::stop::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stop.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for StopTime {
    fn from(model: Model) -> Self {
        StopTime {
            stop_time_id: model.stop_time_id,
            line_id: model.line_id,
            stop_id: model.stop_id,
            scheduled_seconds_from_start: model.scheduled_seconds_from_start,
        }
    }
}
