//! Typed wrappers over the three MLflow endpoints mlview reads from.
//!
//! Each call returns the raw [`HttpResponse`]; decoding is up to the caller
//! (see [`crate::views`] for the decode-and-load helpers the views use).

use crate::config::ApiConfig;
use crate::error::Result;
use crate::http::{self, HttpResponse, HttpTransport};
use crate::models::{GetRunRequest, SearchExperimentsRequest, SearchRunsRequest};

#[derive(Debug, Clone)]
pub struct TrackingClient<T> {
    transport: T,
    config: ApiConfig,
}

impl<T: HttpTransport> TrackingClient<T> {
    pub fn new(transport: T, config: ApiConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `GET <prefix>/runs/get?run_id=...`
    pub async fn get_run(&self, request: &GetRunRequest) -> Result<HttpResponse> {
        http::get(
            &self.transport,
            &self.config.endpoint("runs/get"),
            [("run_id", request.run_id.as_str())],
        )
        .await
    }

    /// `POST <prefix>/runs/search`
    pub async fn search_runs(&self, request: &SearchRunsRequest) -> Result<HttpResponse> {
        http::post(&self.transport, &self.config.endpoint("runs/search"), request).await
    }

    /// `POST <prefix>/experiments/search`
    pub async fn search_experiments(
        &self,
        request: &SearchExperimentsRequest,
    ) -> Result<HttpResponse> {
        http::post(
            &self.transport,
            &self.config.endpoint("experiments/search"),
            request,
        )
        .await
    }
}
