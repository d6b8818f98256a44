//! Driver database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Driver;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "drivers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub driver_id: String,
    pub full_name: String,
    #[sea_orm(unique)]
    pub license_no: String,
    pub hire_date: Date,
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

impl From<Model> for Driver {
    fn from(model: Model) -> Self {
        Driver {
            driver_id: model.driver_id,
            full_name: model.full_name,
            license_no: model.license_no,
            hire_date: model.hire_date,
        }
    }
}
