//! Stop database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Stop;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "stops")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub stop_id: String,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stop_time::Entity")]
    StopTimes,
}

impl Related<super::stop_time::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StopTimes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Stop {
    fn from(model: Model) -> Self {
        Stop {
            stop_id: model.stop_id,
            code: model.code,
            name: model.name,
            lat: model.lat,
            lon: model.lon,
        }
    }
}
