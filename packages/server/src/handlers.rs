use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use nport_filings::{fetch_holdings, relay_search, FilingOutcome, FilingRequest, SearchRequest};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub user_agent_configured: bool,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub security: Option<String>,
}

#[derive(Deserialize)]
pub struct ParseQuery {
    pub cik: Option<String>,
    pub accession: Option<String>,
    pub security: Option<String>,
}

fn error_response(status: StatusCode, error: impl ToString) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

pub async fn health() -> &'static str {
    "OK"
}

/// Lets the frontend warn when no `SEC_USER_AGENT` is configured.
pub async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        user_agent_configured: state.config.is_user_agent_configured(),
    })
}

/// Relay a security search to EDGAR full-text search.
pub async fn search_nport(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Response {
    let request = match SearchRequest::new(params.security.as_deref()) {
        Ok(request) => request,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
    };

    match relay_search(&state.edgar, &request).await {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}

/// Fetch one N-PORT filing and return the holdings matching `security`.
///
/// Lookup failures are reported in the body with HTTP 200; only missing
/// parameters are rejected with 400.
pub async fn parse_nport(
    State(state): State<AppState>,
    Query(params): Query<ParseQuery>,
) -> Result<Json<FilingOutcome>, Response> {
    let request = FilingRequest::new(
        params.cik.as_deref(),
        params.accession.as_deref(),
        params.security.as_deref(),
    )
    .map_err(|e| error_response(StatusCode::BAD_REQUEST, e))?;

    Ok(Json(fetch_holdings(&state.edgar, &request).await))
}
