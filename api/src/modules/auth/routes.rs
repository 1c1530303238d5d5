use super::dto::{self, SignIn, SignInResponse, UserDto};
use super::middleware::RequestUser;
use super::session::{OptionalSessionId, SessionId};
use crate::modules::common::extractors::ValidatedJson;
use crate::modules::common::responses::{internal_error_res, SimpleError};
use crate::server::controller::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_client_ip::SecureClientIp;
use axum_extra::{headers::UserAgent, TypedHeader};
use http::{HeaderMap, StatusCode};

pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/sign-out", post(sign_out))
        .layer(axum::middleware::from_fn_with_state(
            state,
            super::middleware::require_user,
        ))
        .route("/sign-in", post(sign_in))
}

fn sign_in_response(user: UserDto, ses_token: SessionId) -> (HeaderMap, Json<SignInResponse>) {
    let mut headers = HeaderMap::new();

    headers.insert("Set-Cookie", ses_token.into_set_cookie_header());

    let res_body = SignInResponse { user };

    (headers, Json(res_body))
}

/// Signs in, creating a new session
///
/// on success the response contains a `Set-Cookie` header with the
/// session id cookie for the newly created session
#[utoipa::path(
    post,
    tag = "auth",
    path = "/auth/sign-in",
    request_body(content = SignIn, content_type = "application/json"),
    responses(
        (
            status = OK,
            description = "sign in successful",
            content_type = "application/json",
            body = SignInResponse,
            headers(("Set-Cookie" = String, description = "new session id cookie")),
        ),
        (
            status = UNAUTHORIZED,
            description = "invalid password",
            body = SimpleError,
        ),
        (
            status = NOT_FOUND,
            description = "user not found",
            body = SimpleError,
        ),
    ),
)]
pub async fn sign_in(
    client_ip: SecureClientIp,
    old_session_token: OptionalSessionId,
    State(state): State<AppState>,
    TypedHeader(user_agent): TypedHeader<UserAgent>,
    ValidatedJson(payload): ValidatedJson<dto::SignIn>,
) -> Result<(HeaderMap, Json<SignInResponse>), (StatusCode, SimpleError)> {
    use super::service::UserFromCredentialsError as Err;

    let user = state
        .auth_service
        .get_user_from_credentials(payload.email, payload.password)
        .await
        .map_err(|e| match e {
            Err::NotFound => (StatusCode::NOT_FOUND, SimpleError::from("user not found")),
            Err::InternalError => internal_error_res(),
            Err::InvalidPassword => (
                StatusCode::UNAUTHORIZED,
                SimpleError::from("invalid password"),
            ),
        })?;

    let session_token = state
        .auth_service
        .new_session(user.id, client_ip.0, user_agent.to_string())
        .await
        .or(Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            SimpleError::from("failed to create session"),
        )))?;

    if let Some(old_ses_token) = old_session_token.get_value() {
        state.auth_service.delete_session(&old_ses_token).await.ok();
    }

    Ok(sign_in_response(user, session_token))
}

/// Signs out of the current user session
///
/// signs out by deleting the user session present in the sid (session id)
/// request cookie
#[utoipa::path(
    post,
    tag = "auth",
    path = "/auth/sign-out",
    security(("session_id" = [])),
    responses(
        (
            status = OK,
            body = String,
            content_type = "application/json",
            example = json!("signed out successfully"),
            headers(("Set-Cookie" = String, description = "expired cookie to clear the session id")),
        ),
        (
            status = UNAUTHORIZED,
            description = "invalid session",
            body = SimpleError,
        ),
    ),
)]
pub async fn sign_out(
    Extension(session_id): Extension<SessionId>,
    State(state): State<AppState>,
) -> Result<(HeaderMap, Json<String>), (StatusCode, SimpleError)> {
    state
        .auth_service
        .delete_session(&session_id)
        .await
        .map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                SimpleError::from("failed to delete session"),
            )
        })?;

    let mut headers = HeaderMap::new();
    headers.insert("Set-Cookie", session_id.into_delete_cookie_header());

    Ok((headers, Json(String::from("signed out successfully"))))
}

/// Gets the user for the request session
#[utoipa::path(
    get,
    tag = "auth",
    path = "/auth/me",
    security(("session_id" = [])),
    responses(
        (
            status = OK,
            content_type = "application/json",
            body = UserDto,
        ),
        (
            status = UNAUTHORIZED,
            description = "invalid session",
            body = SimpleError,
        ),
    ),
)]
pub async fn me(
    Extension(req_user): Extension<RequestUser>,
) -> Result<Json<UserDto>, (StatusCode, SimpleError)> {
    Ok(Json(req_user.0))
}
