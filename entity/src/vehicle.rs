use crate::traits::FindableById;
use sea_orm::entity::prelude::*;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, ToSchema)]
#[schema(title = "Vehicle")]
#[sea_orm(table_name = "vehicle")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub brand: String,
    pub model: String,
    pub year: i16,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub price: Decimal,
    pub mileage: i32,
    pub fuel_type: String,
    pub transmission: String,
    pub power: i16,
    pub description: Option<String>,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::vehicle_feature::Entity")]
    VehicleFeature,
    #[sea_orm(has_many = "super::vehicle_image::Entity")]
    VehicleImage,
    #[sea_orm(has_many = "super::inquiry::Entity")]
    Inquiry,
}

impl Related<super::vehicle_feature::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VehicleFeature.def()
    }
}

impl Related<super::vehicle_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VehicleImage.def()
    }
}

impl Related<super::inquiry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inquiry.def()
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
