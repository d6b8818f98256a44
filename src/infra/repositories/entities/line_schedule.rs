//! Line schedule database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::LineSchedule;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "line_schedules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub schedule_id: String,
    pub line_id: String,
    pub dow: i16,
    pub start_time: Time,
    pub end_time: Time,
    pub headway_minutes: i32,
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
}

impl Related<super::line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Line.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for LineSchedule {
    fn from(model: Model) -> Self {
        LineSchedule {
            schedule_id: model.schedule_id,
            line_id: model.line_id,
            dow: model.dow as u8,
            start_time: model.start_time,
            end_time: model.end_time,
            headway_minutes: model.headway_minutes,
        }
    }
}
