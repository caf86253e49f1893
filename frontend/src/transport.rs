//! Browser transport for the tracking client.

use gloo_net::http::Request;
use leptos::prelude::*;
use mlview_core::{
    ApiConfig, HttpMethod, HttpRequest, HttpResponse, HttpTransport, MlviewError, Result,
    TrackingClient, DEFAULT_API_PREFIX,
};

/// Issues requests with `fetch` through gloo-net, relative to the page
/// origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
        };
        let builder = request
            .headers
            .iter()
            .fold(builder, |b, (name, value)| b.header(name, value));

        let req = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| MlviewError::Network(e.to_string()))?;

        let resp = req
            .send()
            .await
            .map_err(|e| MlviewError::Network(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| MlviewError::Network(e.to_string()))?;
        Ok(HttpResponse::new(request.url, status, body))
    }
}

pub type Api = TrackingClient<GlooTransport>;

/// Prefix baked in at build time (`MLVIEW_API_PREFIX=... trunk build`).
pub fn api_config() -> ApiConfig {
    ApiConfig::new(option_env!("MLVIEW_API_PREFIX").unwrap_or(DEFAULT_API_PREFIX))
}

pub fn provide_api() {
    provide_context(Api::new(GlooTransport, api_config()));
}

pub fn use_api() -> Api {
    use_context::<Api>().expect("tracking client not provided")
}
