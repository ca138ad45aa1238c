//! Session store controller.

use crate::{
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{extract::State, routing::get, Json, Router};
use gatehouse_core::SessionId;
use gatehouse_service::dto::{
    InvalidateSessionsRequest, InvalidatedSessionsResponse, UserSessionsResponse,
};
use tracing::debug;

/// Creates the session router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(session_overview).delete(invalidate_sessions))
}

/// List every user together with its live sessions.
#[utoipa::path(
    get,
    path = "/sessions",
    tag = "sessions",
    responses(
        (status = 200, description = "Overview built", body = [UserSessionsResponse])
    )
)]
pub async fn session_overview(State(state): State<AppState>) -> ApiResult<Vec<UserSessionsResponse>> {
    debug!("Session overview request");

    let response = state.session_service.user_sessions_overview().await?;
    ok(response)
}

/// Remove a set of sessions from the store.
///
/// Unknown ids are ignored; an empty id list is accepted and removes
/// nothing.
#[utoipa::path(
    delete,
    path = "/sessions",
    tag = "sessions",
    request_body = InvalidateSessionsRequest,
    responses(
        (status = 200, description = "Sessions removed", body = InvalidatedSessionsResponse)
    )
)]
pub async fn invalidate_sessions(
    State(state): State<AppState>,
    Json(request): Json<InvalidateSessionsRequest>,
) -> ApiResult<InvalidatedSessionsResponse> {
    debug!("Invalidate sessions request: {} id(s)", request.session_ids.len());

    let ids: Vec<SessionId> = request.session_ids.into_iter().map(SessionId::from).collect();
    let removed = state.session_service.invalidate_sessions(&ids).await?;
    ok(InvalidatedSessionsResponse { removed })
}
