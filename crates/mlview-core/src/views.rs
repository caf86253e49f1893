//! View state shared by the web and terminal front ends.
//!
//! Each view owns one [`Loader`], keyed on the route parameter it watches.
//! A new key starts a new generation; a response tagged with an older
//! generation is dropped, so a slow stale request can never overwrite the
//! state of the current one.

use tracing::{debug, warn};

use crate::api::TrackingClient;
use crate::error::Result;
use crate::http::HttpTransport;
use crate::models::{
    Experiment, GetRunRequest, GetRunResponse, Run, SearchExperimentsRequest,
    SearchExperimentsResponse, SearchRunsRequest, SearchRunsResponse,
};
use crate::routes::{experiment_href, run_href};

/// Title of the single column every table renders.
pub const NAME_COLUMN: &str = "Name";

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Unloaded,
    Loaded(T),
    Errored(String),
}

impl<T> ViewState<T> {
    pub fn is_unloaded(&self) -> bool {
        matches!(self, ViewState::Unloaded)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Errored(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(&self, f: impl FnOnce(&T) -> U) -> ViewState<U> {
        match self {
            ViewState::Unloaded => ViewState::Unloaded,
            ViewState::Loaded(value) => ViewState::Loaded(f(value)),
            ViewState::Errored(message) => ViewState::Errored(message.clone()),
        }
    }
}

/// Generation tag handed out by [`Loader::request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone)]
pub struct Loader<K, T> {
    key: Option<K>,
    generation: u64,
    state: ViewState<T>,
}

impl<K, T> Default for Loader<K, T> {
    fn default() -> Self {
        Self {
            key: None,
            generation: 0,
            state: ViewState::Unloaded,
        }
    }
}

impl<K: PartialEq, T> Loader<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fetch for `key`. Returns `None` when `key` is the one already
    /// requested, in which case no new fetch must be issued.
    pub fn request(&mut self, key: K) -> Option<Ticket> {
        if self.key.as_ref() == Some(&key) {
            return None;
        }
        self.key = Some(key);
        Some(self.bump())
    }

    /// Follows a watched route parameter. `Some` behaves like [`request`],
    /// `None` like [`reset`]. A returned ticket means exactly one fetch must
    /// be issued for the new key.
    ///
    /// [`request`]: Loader::request
    /// [`reset`]: Loader::reset
    pub fn sync(&mut self, key: Option<K>) -> Option<Ticket> {
        match key {
            Some(key) => self.request(key),
            None => {
                self.reset();
                None
            }
        }
    }

    /// Drops the current key and any in-flight response, back to `Unloaded`.
    pub fn reset(&mut self) {
        self.key = None;
        self.bump();
    }

    /// Applies `result` if `ticket` is still the latest. Returns whether it was
    /// applied.
    pub fn resolve(&mut self, ticket: Ticket, result: Result<T>) -> bool {
        if ticket.0 != self.generation {
            debug!(
                "dropping stale response (generation {} < {})",
                ticket.0, self.generation
            );
            return false;
        }
        self.state = match result {
            Ok(value) => ViewState::Loaded(value),
            Err(e) => {
                warn!("fetch failed: {}", e);
                ViewState::Errored(e.to_string())
            }
        };
        true
    }

    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    fn bump(&mut self) -> Ticket {
        self.generation += 1;
        self.state = ViewState::Unloaded;
        Ticket(self.generation)
    }
}

// ─── Rows ────────────────────────────────────────────────────────────────────

/// One table row: identity key, link label and link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub key: String,
    pub label: String,
    pub href: String,
}

/// `name` unless it is empty, in which case `id`.
pub fn display_label(name: &str, id: &str) -> String {
    if name.is_empty() {
        id.to_string()
    } else {
        name.to_string()
    }
}

pub fn experiment_rows(experiments: &[Experiment]) -> Vec<TableRow> {
    experiments
        .iter()
        .map(|exp| TableRow {
            key: exp.experiment_id.clone(),
            label: display_label(&exp.name, &exp.experiment_id),
            href: experiment_href(&exp.experiment_id),
        })
        .collect()
}

pub fn run_rows(experiment_id: &str, runs: &[Run]) -> Vec<TableRow> {
    runs.iter()
        .map(|run| TableRow {
            key: run.info.run_id.clone(),
            label: run_title(run),
            href: run_href(experiment_id, &run.info.run_id),
        })
        .collect()
}

pub fn run_title(run: &Run) -> String {
    display_label(&run.info.name, &run.info.run_id)
}

// ─── Loading ─────────────────────────────────────────────────────────────────

/// `search_experiments`, decoded to the `experiments` list. The views pass
/// `&Default::default()` to use the server's result limit.
pub async fn load_experiments<T: HttpTransport>(
    client: &TrackingClient<T>,
    request: &SearchExperimentsRequest,
) -> Result<Vec<Experiment>> {
    let resp = client.search_experiments(request).await?;
    let body: SearchExperimentsResponse = resp.json()?;
    Ok(body.experiments)
}

/// `search_runs` scoped to `experiment_id`, or to nothing when it is absent.
pub async fn load_runs<T: HttpTransport>(
    client: &TrackingClient<T>,
    experiment_id: Option<&str>,
) -> Result<Vec<Run>> {
    let resp = client
        .search_runs(&SearchRunsRequest::for_experiment(experiment_id))
        .await?;
    let body: SearchRunsResponse = resp.json()?;
    Ok(body.runs)
}

pub async fn load_run<T: HttpTransport>(client: &TrackingClient<T>, run_id: &str) -> Result<Run> {
    let resp = client
        .get_run(&GetRunRequest {
            run_id: run_id.to_string(),
        })
        .await?;
    let body: GetRunResponse = resp.json()?;
    Ok(body.run)
}
