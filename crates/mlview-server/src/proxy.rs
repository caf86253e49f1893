//! Forwards tracking API calls to the upstream MLflow server.

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::state::AppState;

/// Headers copied from the browser request to the upstream request.
const FORWARDED_HEADERS: [header::HeaderName; 2] = [header::ACCEPT, header::CONTENT_TYPE];

/// Joins the tracking server base URL with the request path and query.
pub fn upstream_url(tracking_uri: &str, uri: &Uri) -> String {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    format!("{}{}", tracking_uri.trim_end_matches('/'), path)
}

pub async fn forward(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let target = upstream_url(&state.config.tracking_uri, &uri);
    debug!("proxy {} {}", method, target);

    let mut request = state.http.request(method, &target);
    for name in FORWARDED_HEADERS {
        if let Some(value) = headers.get(&name) {
            request = request.header(name, value.clone());
        }
    }
    if !body.is_empty() {
        request = request.body(body);
    }

    let resp = match request.send().await {
        Ok(resp) => resp,
        Err(e) => {
            warn!("tracking server unreachable at {}: {}", target, e);
            return bad_gateway(format!("tracking server unreachable: {}", e));
        }
    };

    let status = resp.status();
    let content_type = resp.headers().get(header::CONTENT_TYPE).cloned();
    let bytes = match resp.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("failed to read tracking server response: {}", e);
            return bad_gateway(format!("failed to read tracking server response: {}", e));
        }
    };

    let mut builder = Response::builder().status(status);
    if let Some(ct) = content_type {
        builder = builder.header(header::CONTENT_TYPE, ct);
    }
    builder
        .body(Body::from(bytes))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

fn bad_gateway(message: String) -> Response {
    (StatusCode::BAD_GATEWAY, message).into_response()
}
