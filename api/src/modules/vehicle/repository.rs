use super::dto::CreateVehicleDto;
use entity::constants::VehicleStatus;
use entity::{vehicle, vehicle_feature, vehicle_image};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionError, TransactionTrait,
};

/// A vehicle with its feature and image rows
pub struct VehicleDetails {
    pub vehicle: vehicle::Model,
    pub features: Vec<vehicle_feature::Model>,
    pub images: Vec<vehicle_image::Model>,
}

/// Creates a vehicle listing and all of its feature and image rows atomically
///
/// every row is created within a single transaction, on any failure nothing is
/// persisted and the error is returned, files already written to the upload
/// storage are never touched here and are left for the caller to clean up
///
/// `image_paths` must be in upload order, the index of each path becomes the
/// `sort_order` of its image row
pub async fn create_vehicle_with_attachments(
    conn: &DatabaseConnection,
    dto: &CreateVehicleDto,
    price: Decimal,
    features: Vec<String>,
    image_paths: Vec<String>,
) -> Result<vehicle::Model, DbErr> {
    let new_vehicle = vehicle::ActiveModel {
        brand: Set(dto.brand.clone()),
        model: Set(dto.model.clone()),
        year: Set(dto.year),
        price: Set(price),
        mileage: Set(dto.mileage),
        fuel_type: Set(dto.fuel_type.clone()),
        transmission: Set(dto.transmission.clone()),
        power: Set(dto.power),
        description: Set(dto.description.clone()),
        status: Set(VehicleStatus::Available.to_string()),
        ..Default::default()
    };

    conn.transaction::<_, vehicle::Model, DbErr>(|tx| {
        Box::pin(async move {
            let created_vehicle = new_vehicle.insert(tx).await?;

            if !features.is_empty() {
                let feature_rows = features.into_iter().map(|name| vehicle_feature::ActiveModel {
                    vehicle_id: Set(created_vehicle.id),
                    name: Set(name),
                    ..Default::default()
                });

                vehicle_feature::Entity::insert_many(feature_rows)
                    .exec(tx)
                    .await?;
            }

            if !image_paths.is_empty() {
                let image_rows =
                    image_paths
                        .into_iter()
                        .enumerate()
                        .map(|(position, path)| vehicle_image::ActiveModel {
                            vehicle_id: Set(created_vehicle.id),
                            path: Set(path),
                            sort_order: Set(position as i32),
                            ..Default::default()
                        });

                vehicle_image::Entity::insert_many(image_rows).exec(tx).await?;
            }

            Ok(created_vehicle)
        })
    })
    .await
    .map_err(|e| match e {
        TransactionError::Connection(e) => e,
        TransactionError::Transaction(e) => e,
    })
}

/// Loads the feature and image rows of a vehicle, images ordered for display
pub async fn find_vehicle_details(
    conn: &DatabaseConnection,
    vehicle: vehicle::Model,
) -> Result<VehicleDetails, DbErr> {
    let features = vehicle_feature::Entity::find()
        .filter(vehicle_feature::Column::VehicleId.eq(vehicle.id))
        .all(conn)
        .await?;

    let images = vehicle_image::Entity::find()
        .filter(vehicle_image::Column::VehicleId.eq(vehicle.id))
        .order_by_asc(vehicle_image::Column::SortOrder)
        .all(conn)
        .await?;

    Ok(VehicleDetails {
        vehicle,
        features,
        images,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    /// a `RETURNING "id"` row, what postgres answers bulk inserts with
    fn id_row(id: i32) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("id", Value::Int(Some(id)))])
    }

    fn test_dto() -> CreateVehicleDto {
        CreateVehicleDto {
            images: vec![],
            features: None,
            brand: String::from("Toyota"),
            model: String::from("Corolla"),
            year: 2022,
            price: String::from("74990.00"),
            mileage: 15000,
            fuel_type: String::from("hybrid"),
            transmission: String::from("automatic"),
            power: 122,
            description: Some(String::from("single owner")),
        }
    }

    fn test_vehicle_model(id: i32) -> vehicle::Model {
        vehicle::Model {
            id,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
            brand: String::from("Toyota"),
            model: String::from("Corolla"),
            year: 2022,
            price: Decimal::new(7_499_000, 2),
            mileage: 15000,
            fuel_type: String::from("hybrid"),
            transmission: String::from("automatic"),
            power: 122,
            description: Some(String::from("single owner")),
            status: String::from("available"),
        }
    }

    #[tokio::test]
    async fn creates_vehicle_features_and_images_in_one_transaction() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_vehicle_model(1)]])
            .append_query_results([[id_row(2)], [id_row(2)]])
            .into_connection();

        let created = create_vehicle_with_attachments(
            &db,
            &test_dto(),
            Decimal::new(7_499_000, 2),
            vec![String::from("heated seats"), String::from("sunroof")],
            vec![
                String::from("vehicles/1-1.jpeg"),
                String::from("vehicles/1-2.jpeg"),
            ],
        )
        .await
        .unwrap();

        assert_eq!(created.id, 1);

        let log = format!("{:?}", db.into_transaction_log());

        // all three inserts ran, vehicle first so its generated id is
        // available for the feature and image rows
        let vehicle_at = log.find("INSERT INTO \"vehicle\"").unwrap();
        let features_at = log.find("INSERT INTO \"vehicle_feature\"").unwrap();
        let images_at = log.find("INSERT INTO \"vehicle_image\"").unwrap();

        assert!(vehicle_at < features_at);
        assert!(features_at < images_at);

        // image rows are bound in upload order so the zero based
        // sort_order of each row matches its position in the upload
        let first_image_at = log.find("vehicles/1-1.jpeg").unwrap();
        let second_image_at = log.find("vehicles/1-2.jpeg").unwrap();

        assert!(first_image_at < second_image_at);
    }

    #[tokio::test]
    async fn vehicle_without_attachments_creates_no_child_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_vehicle_model(3)]])
            .into_connection();

        let created =
            create_vehicle_with_attachments(&db, &test_dto(), Decimal::new(7_499_000, 2), vec![], vec![])
                .await
                .unwrap();

        assert_eq!(created.id, 3);

        let log = format!("{:?}", db.into_transaction_log());

        assert!(log.contains("INSERT INTO \"vehicle\""));
        assert!(!log.contains("INSERT INTO \"vehicle_feature\""));
        assert!(!log.contains("INSERT INTO \"vehicle_image\""));
    }

    #[tokio::test]
    async fn failing_child_insert_fails_the_whole_creation() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_vehicle_model(4)]])
            .append_query_errors([DbErr::Custom(String::from("connection reset"))])
            .into_connection();

        let result = create_vehicle_with_attachments(
            &db,
            &test_dto(),
            Decimal::new(7_499_000, 2),
            vec![String::from("heated seats")],
            vec![],
        )
        .await;

        assert!(result.is_err());
    }
}
