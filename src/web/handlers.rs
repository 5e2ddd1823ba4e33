//! Request handlers for the search service

use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Query, State,
    },
    response::Html,
    Form, Json,
};
use serde::Deserialize;

use crate::core::{lookup, search_by_type, CaseDetails, SearchRequest};
use crate::web::error::{ApiError, ApiResponse};
use crate::web::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct TypeQuery {
    pub case_type: Option<String>,
}

/// `GET /` - the search page
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let html = state
        .pages
        .render_index()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Html(html))
}

/// `POST /search_case` - look up one case from form fields
///
/// A body that cannot be read as a form counts as missing fields.
pub async fn search_case(
    State(state): State<AppState>,
    form: Result<Form<SearchRequest>, FormRejection>,
) -> Result<Json<ApiResponse<CaseDetails>>, ApiError> {
    let Form(request) = form.map_err(|rejection| {
        tracing::debug!("unreadable search form: {}", rejection);
        ApiError::MissingFields
    })?;
    find_case(state, request).await
}

/// `GET /api/cases/search` - the same lookup from query parameters
pub async fn search_case_query(
    State(state): State<AppState>,
    query: Result<Query<SearchRequest>, QueryRejection>,
) -> Result<Json<ApiResponse<CaseDetails>>, ApiError> {
    let Query(request) = query.map_err(|rejection| {
        tracing::debug!("unreadable search query: {}", rejection);
        ApiError::MissingFields
    })?;
    find_case(state, request).await
}

/// `GET /api/cases/search/type` - all cases whose type contains `case_type`
pub async fn search_type(
    State(state): State<AppState>,
    query: Result<Query<TypeQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<CaseDetails>>>, ApiError> {
    let case_type = query
        .map(|Query(q)| q.case_type.unwrap_or_default())
        .unwrap_or_default();
    if case_type.trim().is_empty() {
        return Err(ApiError::MissingCaseType);
    }

    let store = state.store.clone();
    let cases = state
        .run_blocking(move || search_by_type(&store, &case_type))
        .await
        .map_err(|err| match err {
            ApiError::MissingFields => ApiError::MissingCaseType,
            other => other,
        })?;

    if cases.is_empty() {
        return Err(ApiError::NoCasesForType);
    }
    Ok(Json(ApiResponse::success(cases)))
}

async fn find_case(
    state: AppState,
    request: SearchRequest,
) -> Result<Json<ApiResponse<CaseDetails>>, ApiError> {
    let store = state.store.clone();
    let details = state
        .run_blocking(move || lookup(&store, &request))
        .await?;

    tracing::debug!(case = %details.case_title, "case found");
    Ok(Json(ApiResponse::success(details)))
}
