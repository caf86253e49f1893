//! mlview-core: tracking API client, routes and view state for mlview.
//!
//! Nothing in here owns a runtime. Network access goes through the
//! [`HttpTransport`] trait so the same client runs in the browser and in the
//! native binaries.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod routes;
pub mod views;

pub use api::TrackingClient;
pub use config::{ApiConfig, DEFAULT_API_PREFIX};
pub use error::{MlviewError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
pub use models::{Experiment, Run, RunData, RunInfo};
pub use routes::AppRoute;
pub use views::{Loader, TableRow, Ticket, ViewState};
