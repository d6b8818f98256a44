//! Trip database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Trip;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "trips")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub trip_id: String,
    /// Nulled when the owning user is deleted
    pub user_id: Option<String>,
    pub line_id: Option<String>,
    pub origin_stop_id: Option<String>,
    pub dest_stop_id: Option<String>,
    pub planned_start: DateTimeUtc,
    pub planned_end: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::UserId",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::line::Entity",
        from = "Column::LineId",
        to = "super::line::Column::LineId",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Line,
    #[sea_orm(has_one = "super::trip_stop::Entity")]
    TripStop,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::trip_stop::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TripStop.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Trip {
    fn from(model: Model) -> Self {
        Trip {
            trip_id: model.trip_id,
            user_id: model.user_id,
            line_id: model.line_id,
            origin_stop_id: model.origin_stop_id,
            dest_stop_id: model.dest_stop_id,
            planned_start: model.planned_start,
            planned_end: model.planned_end,
            created_at: model.created_at,
        }
    }
}
