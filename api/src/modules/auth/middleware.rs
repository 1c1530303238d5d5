use super::dto::UserDto;
use super::session::{get_session_id_from_request_headers, SessionId};
use crate::{
    modules::common::{
        error_codes::{INVALID_SESSION, NO_SID_COOKIE},
        responses::{internal_error_msg, SimpleError},
    },
    server::controller::AppState,
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::StatusCode;

/// Simple extractor for routes that are only allowed for logged in users
#[derive(Clone)]
pub struct RequestUser(pub UserDto);

/// middleware for routes that require a logged in user, this queries the DB to get
/// the request user by his session ID cookie, so use it only within routes that need
/// the user data, adds the following extensions:
///
/// - `SessionId`
/// - `RequestUser`
pub async fn require_user(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, (StatusCode, SimpleError)> {
    let mut headers = req.headers().clone();

    if let Some(session_id) = get_session_id_from_request_headers(&mut headers) {
        let session_token = SessionId::from(session_id);

        let maybe_user = state
            .auth_service
            .get_user_from_session_id(session_token)
            .await
            .map_err(|_| internal_error_msg("failed to fetch user session"))?;

        let user = maybe_user.ok_or((
            StatusCode::UNAUTHORIZED,
            SimpleError::from(INVALID_SESSION),
        ))?;

        req.extensions_mut().insert(session_token);
        req.extensions_mut().insert(RequestUser(UserDto::from(user)));

        return Ok(next.run(req).await);
    }

    Err((StatusCode::UNAUTHORIZED, SimpleError::from(NO_SID_COOKIE)))
}
