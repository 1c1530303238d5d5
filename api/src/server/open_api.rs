use crate::modules::{auth, common, inquiry, vehicle};
use crate::server::controller;
use axum::Router;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_rapidoc::RapiDoc;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    components(schemas(
        entity::vehicle::Model,
        entity::vehicle_feature::Model,
        entity::vehicle_image::Model,
        entity::inquiry::Model,

        common::dto::PaginatedVehicle,
        common::dto::PaginatedInquiry,
        common::responses::SimpleError,

        auth::dto::SignIn,
        auth::dto::UserDto,
        auth::dto::SignInResponse,

        vehicle::dto::VehicleDto,
        vehicle::dto::VehicleImageDto,
        vehicle::dto::CreateVehicleDto,
        vehicle::dto::UpdateVehicleDto,

        inquiry::dto::CreateInquiryDto,
        inquiry::dto::UpdateInquiryDto,
    )),
    paths(
        controller::healthcheck,

        auth::routes::sign_in,
        auth::routes::sign_out,
        auth::routes::me,

        vehicle::routes::list_vehicles,
        vehicle::routes::vehicle_by_id,
        vehicle::routes::create_vehicle,
        vehicle::routes::update_vehicle,
        vehicle::routes::delete_vehicle,

        inquiry::routes::create_inquiry,
        inquiry::routes::list_inquiries,
        inquiry::routes::update_inquiry,
    ),
    modifiers(&SessionIdCookieSecurityScheme),
)]
struct ApiDoc;

/// session id on request cookie for user session authentication,
/// unfortunately this does not work on rapidoc or swagger UI for now, see:
///
/// https://github.com/swagger-api/swagger-js/issues/1163
struct SessionIdCookieSecurityScheme;

impl Modify for SessionIdCookieSecurityScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            // unfortunately as of writing this, the open api spec does not support
            // scopes for apiKey authentication, such as cookies.
            components.add_security_scheme(
                "session_id",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "sid",
                    "user session id",
                ))),
            );
        }
    }
}

/// Creates a router that serves the OpenAPI documents and their UIs
pub fn create_openapi_router() -> Router<controller::AppState> {
    Router::new()
        .merge(SwaggerUi::new("/swagger").url("/docs/openapi.json", ApiDoc::openapi()))
        .merge(RapiDoc::new("/docs/openapi.json").path("/rapidoc"))
}
