//! Trip stop database entity for SeaORM.
//!
//! The primary key is the trip id alone: a trip tracks a single stop.

use sea_orm::entity::prelude::*;

use crate::domain::TripStop;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "trip_stops")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub trip_id: String,
    pub stop_id: String,
    pub eta: Option<DateTimeUtc>,
    pub ata: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::trip::Entity",
        from = "Column::TripId",
        to = "super::trip::Column::TripId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Trip,
    #[sea_orm(
        belongs_to = "super::stop::Entity",
        from = "Column::StopId",
        to = "super::stop::Column::StopId",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Stop,
}

impl Related<super::trip::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trip.def()
    }
}

impl Related<super::stop::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stop.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for TripStop {
    fn from(model: Model) -> Self {
        TripStop {
            trip_id: model.trip_id,
            stop_id: model.stop_id,
            eta: model.eta,
            ata: model.ata,
        }
    }
}
