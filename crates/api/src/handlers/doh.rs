use crate::{errors::ApiError, state::AppState};
use axum::{
    body::{Body, Bytes},
    extract::{Query, State},
    http::{HeaderMap, Method, Uri},
    response::Response,
};
use doh_relay_domain::InboundRequest;
use std::collections::HashMap;
use tracing::instrument;

#[instrument(skip_all, name = "api_doh", fields(method = %method, path = %uri.path()))]
pub async fn handle_doh(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request = InboundRequest {
        method,
        path: uri.path().to_string(),
        headers,
        query,
        body,
    };

    let shaped = state.handle_doh.execute(request).await?;

    let mut response = Response::new(Body::from(shaped.body));
    *response.status_mut() = shaped.status;
    *response.headers_mut() = shaped.headers;
    Ok(response)
}
