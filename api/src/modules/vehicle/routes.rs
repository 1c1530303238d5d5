use super::dto::{
    parse_features_field, CreateVehicleDto, ListVehiclesDto, UpdateVehicleDto, VehicleDto,
};
use crate::{
    database::{
        error::DbError,
        helpers::{paginated_query_to_pagination_result, set_if_some},
    },
    modules::{
        auth,
        common::{
            dto::{PaginatedVehicle, Pagination, PaginationResult},
            extractors::{
                DbConnection, EntityFromPathId, ValidatedJson, ValidatedMultipart, ValidatedQuery,
            },
            multipart_form_data,
            responses::{internal_error_msg, SimpleError},
        },
        vehicle::repository,
    },
    server::controller::AppState,
    services::storage::StorageKey,
};
use axum::extract::State;
use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::Utc;
use http::StatusCode;
use migration::{extension::postgres::PgExpr, Expr};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QueryTrait, Set,
};
use std::str::FromStr;

use entity::{vehicle, vehicle_image};

/// storage folder uploaded vehicle images are kept under, filenames are
/// generated before the vehicle row exists so they never contain its id
const VEHICLE_UPLOADS_FOLDER: &str = "vehicles";

pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        //
        .route(
            "/",
            post(create_vehicle).route_layer(axum::middleware::from_fn_with_state(
                state.clone(),
                auth::middleware::require_user,
            )),
        )
        //
        .route("/:vehicle_id", get(vehicle_by_id))
        //
        .route(
            "/:vehicle_id",
            put(update_vehicle).route_layer(axum::middleware::from_fn_with_state(
                state.clone(),
                auth::middleware::require_user,
            )),
        )
        //
        .route(
            "/:vehicle_id",
            delete(delete_vehicle).route_layer(axum::middleware::from_fn_with_state(
                state,
                auth::middleware::require_user,
            )),
        )
}

/// Creates a new vehicle listing
///
/// multipart body with the listing fields, a JSON encoded `features` array
/// field and up to 10 image attachments, the vehicle, feature and image rows
/// are created atomically
#[utoipa::path(
    post,
    tag = "vehicle",
    path = "/vehicle",
    security(("session_id" = [])),
    request_body(content = CreateVehicleDto, content_type = "multipart/form-data"),
    responses(
        (
            status = CREATED,
            description = "the created vehicle with its features and image URLs",
            content_type = "application/json",
            body = VehicleDto,
        ),
        (
            status = BAD_REQUEST,
            description = "invalid dto error message / INVALID_FILE_TYPE",
            body = SimpleError,
        ),
        (
            status = INTERNAL_SERVER_ERROR,
            description = "failed to store a image or to persist the listing",
            body = SimpleError,
        ),
    ),
)]
pub async fn create_vehicle(
    State(state): State<AppState>,
    ValidatedMultipart(dto): ValidatedMultipart<CreateVehicleDto>,
) -> Result<(StatusCode, Json<VehicleDto>), (StatusCode, SimpleError)> {
    // validate every attachment before storing anything, a single unacceptable
    // file fails the whole request with no side effects
    let mut keys = Vec::with_capacity(dto.images.len());

    for image in &dto.images {
        keys.push(StorageKey {
            folder: String::from(VEHICLE_UPLOADS_FOLDER),
            filename: multipart_form_data::unique_image_filename(image)?,
        });
    }

    let mut stored_paths: Vec<String> = Vec::with_capacity(keys.len());

    for (key, image) in keys.into_iter().zip(&dto.images) {
        let path = String::from(key);

        if state
            .storage
            .put(path.clone(), image.contents.clone())
            .await
            .is_err()
        {
            for stored in stored_paths {
                let _ = state.storage.delete(stored).await;
            }

            return Err(internal_error_msg("failed to store vehicle image"));
        }

        stored_paths.push(path);
    }

    let features = parse_features_field(dto.features.as_deref());

    let price = Decimal::from_str(&dto.price)
        .map_err(|_| (StatusCode::BAD_REQUEST, SimpleError::from("invalid price")))?;

    let creation_result = repository::create_vehicle_with_attachments(
        &state.db,
        &dto,
        price,
        features,
        stored_paths.clone(),
    )
    .await;

    let created_vehicle = match creation_result {
        Ok(vehicle) => vehicle,
        Err(e) => {
            // the transaction was rolled back so no image row references the
            // stored files, remove them to not leave orphans behind
            for stored in stored_paths {
                let _ = state.storage.delete(stored).await;
            }

            return Err(DbError::from(e).into());
        }
    };

    let details = repository::find_vehicle_details(&state.db, created_vehicle)
        .await
        .map_err(DbError::from)?;

    Ok((StatusCode::CREATED, Json(VehicleDto::from(details))))
}

/// Get a vehicle by id
///
/// the returned listing contains its feature labels and image URLs,
/// images ordered by their display position
#[utoipa::path(
    get,
    tag = "vehicle",
    path = "/vehicle/{vehicle_id}",
    params(
        ("vehicle_id" = i32, Path, description = "id of the vehicle to get"),
    ),
    responses(
        (
            status = OK,
            content_type = "application/json",
            body = VehicleDto,
        ),
        (
            status = NOT_FOUND,
            body = SimpleError,
        ),
    ),
)]
pub async fn vehicle_by_id(
    DbConnection(db): DbConnection,
    EntityFromPathId(v): EntityFromPathId<vehicle::Entity>,
) -> Result<Json<VehicleDto>, (StatusCode, SimpleError)> {
    let details = repository::find_vehicle_details(&db, v)
        .await
        .map_err(DbError::from)?;

    Ok(Json(VehicleDto::from(details)))
}

/// Update a vehicle
#[utoipa::path(
    put,
    tag = "vehicle",
    path = "/vehicle/{vehicle_id}",
    security(("session_id" = [])),
    params(
        ("vehicle_id" = i32, Path, description = "id of the vehicle to update"),
    ),
    request_body(content = UpdateVehicleDto, content_type = "application/json"),
    responses(
        (
            status = OK,
            content_type = "application/json",
            body = entity::vehicle::Model,
        ),
    ),
)]
pub async fn update_vehicle(
    DbConnection(db): DbConnection,
    EntityFromPathId(vehicle): EntityFromPathId<vehicle::Entity>,
    ValidatedJson(dto): ValidatedJson<UpdateVehicleDto>,
) -> Result<Json<vehicle::Model>, (StatusCode, SimpleError)> {
    let price = match &dto.price {
        Some(raw) => Some(
            Decimal::from_str(raw)
                .map_err(|_| (StatusCode::BAD_REQUEST, SimpleError::from("invalid price")))?,
        ),
        None => None,
    };

    let mut v: vehicle::ActiveModel = vehicle.into();

    v.brand = set_if_some(dto.brand);
    v.model = set_if_some(dto.model);
    v.year = set_if_some(dto.year);
    v.price = set_if_some(price);
    v.mileage = set_if_some(dto.mileage);
    v.fuel_type = set_if_some(dto.fuel_type);
    v.transmission = set_if_some(dto.transmission);
    v.power = set_if_some(dto.power);
    v.description = set_if_some(dto.description);
    v.status = set_if_some(dto.status);
    v.updated_at = Set(Utc::now().into());

    let updated_vehicle = v.update(&db).await.map_err(DbError::from)?;

    Ok(Json(updated_vehicle))
}

/// Deletes a vehicle
///
/// feature and image rows are removed by the database cascade, stored
/// image files are deleted best effort afterwards
#[utoipa::path(
    delete,
    tag = "vehicle",
    path = "/vehicle/{vehicle_id}",
    security(("session_id" = [])),
    params(
        ("vehicle_id" = i32, Path, description = "id of the vehicle to delete"),
    ),
    responses(
        (
            status = OK,
            body = String,
            content_type = "application/json",
            description = "success message",
            example = json!("vehicle deleted successfully"),
        ),
        (
            status = UNAUTHORIZED,
            description = "invalid session",
            body = SimpleError,
        ),
        (
            status = NOT_FOUND,
            body = SimpleError,
        ),
    ),
)]
pub async fn delete_vehicle(
    State(state): State<AppState>,
    DbConnection(db): DbConnection,
    EntityFromPathId(req_vehicle): EntityFromPathId<vehicle::Entity>,
) -> Result<Json<String>, (StatusCode, SimpleError)> {
    let images = vehicle_image::Entity::find()
        .filter(vehicle_image::Column::VehicleId.eq(req_vehicle.id))
        .all(&db)
        .await
        .map_err(DbError::from)?;

    vehicle::Entity::delete_by_id(req_vehicle.id)
        .exec(&db)
        .await
        .map_err(DbError::from)?;

    // a leftover file with no image row pointing to it is harmless, so
    // failures here only get logged by the storage service
    for image in images {
        let _ = state.storage.delete(image.path).await;
    }

    Ok(Json(String::from("vehicle deleted successfully")))
}

/// Lists vehicles
#[utoipa::path(
    get,
    tag = "vehicle",
    path = "/vehicle",
    params(
        Pagination,
        ListVehiclesDto
    ),
    responses(
        (
            status = OK,
            description = "paginated list of vehicles",
            content_type = "application/json",
            body = PaginatedVehicle,
        ),
    ),
)]
pub async fn list_vehicles(
    ValidatedQuery(pagination): ValidatedQuery<Pagination>,
    ValidatedQuery(filter): ValidatedQuery<ListVehiclesDto>,
    DbConnection(db): DbConnection,
) -> Result<Json<PaginationResult<vehicle::Model>>, (StatusCode, SimpleError)> {
    let db_query = vehicle::Entity::find()
        .apply_if(filter.brand, |query, brand| {
            if !brand.is_empty() {
                let col = Expr::col((vehicle::Entity, vehicle::Column::Brand));
                query.filter(col.ilike(format!("%{}%", brand)))
            } else {
                query
            }
        })
        .apply_if(filter.status, |query, status| {
            query.filter(vehicle::Column::Status.eq(status))
        })
        .order_by_asc(vehicle::Column::Id)
        .paginate(&db, pagination.page_size);

    let result = paginated_query_to_pagination_result(db_query, pagination).await?;

    Ok(Json(result))
}
