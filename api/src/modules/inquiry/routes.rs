use super::dto::{CreateInquiryDto, ListInquiriesDto, UpdateInquiryDto};
use crate::{
    database::{error::DbError, helpers::paginated_query_to_pagination_result},
    modules::{
        auth,
        common::{
            dto::{PaginatedInquiry, Pagination, PaginationResult},
            extractors::{DbConnection, EntityFromPathId, ValidatedJson, ValidatedQuery},
            responses::SimpleError,
        },
    },
    server::controller::AppState,
};
use axum::{
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use entity::constants::InquiryStatus;
use entity::{inquiry, vehicle};
use http::StatusCode;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QueryTrait, Set,
};

pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_inquiry))
        //
        .route(
            "/",
            get(list_inquiries).route_layer(axum::middleware::from_fn_with_state(
                state.clone(),
                auth::middleware::require_user,
            )),
        )
        //
        .route(
            "/:inquiry_id",
            put(update_inquiry).route_layer(axum::middleware::from_fn_with_state(
                state,
                auth::middleware::require_user,
            )),
        )
}

/// Creates a customer inquiry
///
/// public endpoint for prospective buyers, the inquiry is created
/// with the `new` status
#[utoipa::path(
    post,
    tag = "inquiry",
    path = "/inquiry",
    request_body(content = CreateInquiryDto, content_type = "application/json"),
    responses(
        (
            status = CREATED,
            description = "the created inquiry",
            content_type = "application/json",
            body = entity::inquiry::Model,
        ),
        (
            status = BAD_REQUEST,
            description = "invalid dto error message / vehicle does not exist",
            body = SimpleError,
        ),
    ),
)]
pub async fn create_inquiry(
    DbConnection(db): DbConnection,
    ValidatedJson(dto): ValidatedJson<CreateInquiryDto>,
) -> Result<(StatusCode, Json<inquiry::Model>), (StatusCode, SimpleError)> {
    if let Some(vehicle_id) = dto.vehicle_id {
        vehicle::Entity::find_by_id(vehicle_id)
            .one(&db)
            .await
            .map_err(DbError::from)?
            .ok_or((
                StatusCode::BAD_REQUEST,
                SimpleError::from("vehicle does not exist"),
            ))?;
    }

    let created_inquiry = inquiry::ActiveModel {
        vehicle_id: Set(dto.vehicle_id),
        name: Set(dto.name),
        email: Set(dto.email),
        phone: Set(dto.phone),
        message: Set(dto.message),
        status: Set(InquiryStatus::New.to_string()),
        ..Default::default()
    }
    .insert(&db)
    .await
    .map_err(DbError::from)?;

    Ok((StatusCode::CREATED, Json(created_inquiry)))
}

/// Lists customer inquiries, most recent first
#[utoipa::path(
    get,
    tag = "inquiry",
    path = "/inquiry",
    security(("session_id" = [])),
    params(
        Pagination,
        ListInquiriesDto
    ),
    responses(
        (
            status = OK,
            description = "paginated list of inquiries",
            content_type = "application/json",
            body = PaginatedInquiry,
        ),
        (
            status = UNAUTHORIZED,
            description = "invalid session",
            body = SimpleError,
        ),
    ),
)]
pub async fn list_inquiries(
    ValidatedQuery(pagination): ValidatedQuery<Pagination>,
    ValidatedQuery(filter): ValidatedQuery<ListInquiriesDto>,
    DbConnection(db): DbConnection,
) -> Result<Json<PaginationResult<inquiry::Model>>, (StatusCode, SimpleError)> {
    let db_query = inquiry::Entity::find()
        .apply_if(filter.status, |query, status| {
            query.filter(inquiry::Column::Status.eq(status))
        })
        .order_by_desc(inquiry::Column::Id)
        .paginate(&db, pagination.page_size);

    let result = paginated_query_to_pagination_result(db_query, pagination).await?;

    Ok(Json(result))
}

/// Updates the handling status of a inquiry
#[utoipa::path(
    put,
    tag = "inquiry",
    path = "/inquiry/{inquiry_id}",
    security(("session_id" = [])),
    params(
        ("inquiry_id" = i32, Path, description = "id of the inquiry to update"),
    ),
    request_body(content = UpdateInquiryDto, content_type = "application/json"),
    responses(
        (
            status = OK,
            content_type = "application/json",
            body = entity::inquiry::Model,
        ),
        (
            status = NOT_FOUND,
            body = SimpleError,
        ),
    ),
)]
pub async fn update_inquiry(
    DbConnection(db): DbConnection,
    EntityFromPathId(inquiry): EntityFromPathId<inquiry::Entity>,
    ValidatedJson(dto): ValidatedJson<UpdateInquiryDto>,
) -> Result<Json<inquiry::Model>, (StatusCode, SimpleError)> {
    let mut i: inquiry::ActiveModel = inquiry.into();

    i.status = Set(dto.status);
    i.updated_at = Set(Utc::now().into());

    let updated_inquiry = i.update(&db).await.map_err(DbError::from)?;

    Ok(Json(updated_inquiry))
}
