//! Vehicle database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Vehicle;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub vehicle_id: String,
    #[sea_orm(unique)]
    pub plate: String,
    pub model: Option<String>,
    pub capacity: Option<i32>,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::driver_assignment::Entity")]
    DriverAssignments,
}

impl Related<super::driver_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DriverAssignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Vehicle {
    fn from(model: Model) -> Self {
        Vehicle {
            vehicle_id: model.vehicle_id,
            plate: model.plate,
            model: model.model,
            capacity: model.capacity,
            active: model.active,
        }
    }
}
