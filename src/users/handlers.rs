use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use bytes::Bytes;
use std::fmt::Display;
use tracing::{info, instrument, warn};

use crate::{config::ResponseMode, error::ApiError, state::AppState};

use super::{
    dto::{User, UserPayload},
    extractors::UserId,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user).put(update_user))
        .route(
            "/users/:id",
            get(get_user)
                .delete(delete_user)
                .fallback(user_id_method_not_allowed),
        )
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Response {
    let users = state.users.list().await;
    if users.is_empty() && state.config.response_mode == ResponseMode::Legacy {
        return (StatusCode::OK, "No Users").into_response();
    }
    Json(users).into_response()
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<Response, ApiError> {
    match state.users.get(id).await {
        Some(user) => Ok(Json(user).into_response()),
        None => missing(state.config.response_mode, id),
    }
}

#[instrument(skip(state, body))]
pub async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let payload = decode_payload(&body)?;
    let user = state.users.create(payload).await?;
    info!(user_id = user.id, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip(state, body))]
pub async fn update_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let payload = decode_payload(&body)?;
    let Some(merged) = state.users.update(&payload).await else {
        return missing(state.config.response_mode, payload.id);
    };
    info!(user_id = merged.id, "user updated");
    Ok(match state.config.response_mode {
        ResponseMode::Legacy => Json(payload).into_response(),
        ResponseMode::Strict => Json(merged).into_response(),
    })
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<Response, ApiError> {
    if state.users.delete(id).await.is_none() {
        return missing(state.config.response_mode, id);
    }
    info!(user_id = id, "user deleted");
    Ok((StatusCode::OK, format!("Deleted User Id: {id}")).into_response())
}

/// Other methods on `/users/:id`: a non-digit id still reads as an unmatched route.
async fn user_id_method_not_allowed(_id: UserId) -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}

fn missing(mode: ResponseMode, id: impl Display) -> Result<Response, ApiError> {
    match mode {
        ResponseMode::Legacy => Ok((StatusCode::OK, format!("No User Id: {id}")).into_response()),
        ResponseMode::Strict => Err(ApiError::NotFound(id.to_string())),
    }
}

/// Decodes the first JSON value in `body`; a `null` body is an empty payload.
/// Content-Type is not checked.
fn decode_payload(body: &[u8]) -> Result<UserPayload, ApiError> {
    let mut values = serde_json::Deserializer::from_slice(body).into_iter::<Option<UserPayload>>();
    match values.next() {
        Some(Ok(payload)) => Ok(payload.unwrap_or_default()),
        Some(Err(e)) => {
            warn!(error = %e, "malformed user payload");
            Err(ApiError::BadRequest(e.to_string()))
        }
        None => {
            warn!("empty user payload");
            Err(ApiError::BadRequest("EOF".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_ignores_trailing_data() {
        let p = decode_payload(br#"{"id":3,"email":"x@y.z"} trailing"#).unwrap();
        assert_eq!(p.id, 3);
        assert_eq!(p.email, "x@y.z");
    }

    #[test]
    fn decode_null_body_is_empty_payload() {
        assert_eq!(decode_payload(b"null").unwrap(), UserPayload::default());
    }

    #[test]
    fn decode_empty_body_is_bad_request() {
        let err = decode_payload(b"   ").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "EOF");
    }

    #[test]
    fn decode_malformed_body_reports_error_text() {
        let err = decode_payload(br#"{"first_name":"#).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn missing_depends_on_mode() {
        let legacy = missing(ResponseMode::Legacy, 5).unwrap();
        assert_eq!(legacy.status(), StatusCode::OK);
        let strict = missing(ResponseMode::Strict, -5).unwrap_err();
        assert_eq!(strict.status(), StatusCode::NOT_FOUND);
        assert_eq!(strict.to_string(), "No User Id: -5");
    }
}
