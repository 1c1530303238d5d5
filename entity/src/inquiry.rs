use crate::traits::FindableById;
use sea_orm::entity::prelude::*;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use utoipa::ToSchema;

/// A prospective buyer interest record, optionally tied to a vehicle
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, ToSchema)]
#[schema(title = "Inquiry")]
#[sea_orm(table_name = "inquiry")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub vehicle_id: Option<i32>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vehicle::Entity",
        from = "Column::VehicleId",
        to = "super::vehicle::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Vehicle,
}

impl Related<super::vehicle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicle.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl FindableById for Entity {
    type Model = Model;

    fn find_by_path_id(
        id: i32,
        db: &DatabaseConnection,
    ) -> impl std::future::Future<Output = Result<Option<Model>, DbErr>> + Send {
        Entity::find_by_id(id).one(db)
    }
}
