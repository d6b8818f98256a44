//! Line database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Line, LineMode};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub line_id: String,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    /// Stored under the original column name; the domain calls it `mode`
    pub line_mode: String,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stop_time::Entity")]
    StopTimes,
    #[sea_orm(has_many = "super::line_schedule::Entity")]
    LineSchedules,
    #[sea_orm(has_many = "super::driver_assignment::Entity")]
    DriverAssignments,
}

impl Related<super::stop_time::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StopTimes.def()
    }
}

impl Related<super::line_schedule::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LineSchedules.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Line {
    fn from(model: Model) -> Self {
        Line {
            line_id: model.line_id,
            code: model.code,
            name: model.name,
            mode: LineMode::from(model.line_mode.as_str()),
            active: model.active,
        }
    }
}
