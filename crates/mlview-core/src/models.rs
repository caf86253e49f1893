//! Data models for the MLflow tracking API.
//!
//! Everything here is read-only: the types mirror the JSON the tracking
//! server returns and the request bodies the three client calls send.

use serde::{Deserialize, Serialize};

/// A named grouping of runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Experiment {
    pub experiment_id: String,
    #[serde(default)]
    pub name: String,
}

/// Identity block of a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RunInfo {
    pub run_id: String,
    /// Missing or empty on unnamed runs.
    #[serde(default)]
    pub name: String,
}

/// Metrics, params and tags of a run. Never inspected, carried as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct RunData(pub serde_json::Map<String, serde_json::Value>);

impl RunData {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }
}

/// A single recorded execution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Run {
    pub info: RunInfo,
    #[serde(default)]
    pub data: RunData,
}

// ─── Requests ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GetRunRequest {
    pub run_id: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct SearchRunsRequest {
    pub experiment_ids: Vec<String>,
}

impl SearchRunsRequest {
    /// Builds the id list from an optional route parameter. An absent
    /// parameter yields an empty list, never a null element.
    pub fn for_experiment(experiment_id: Option<&str>) -> Self {
        Self {
            experiment_ids: experiment_id.into_iter().map(str::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct SearchExperimentsRequest {
    /// Omitted from the body when `None` so the server applies its default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i64>,
}

// ─── Responses ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GetRunResponse {
    pub run: Run,
}

/// The tracking server drops empty repeated fields, so `{}` is a valid
/// empty result.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct SearchRunsResponse {
    #[serde(default)]
    pub runs: Vec<Run>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct SearchExperimentsResponse {
    #[serde(default)]
    pub experiments: Vec<Experiment>,
}

/// Error body returned by the tracking server on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error_code: Option<String>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_without_name_decodes_empty() {
        let run: Run = serde_json::from_str(r#"{"info":{"run_id":"abc123"},"data":{}}"#).unwrap();
        assert_eq!(run.info.run_id, "abc123");
        assert!(run.info.name.is_empty());
        assert!(run.data.is_empty());
    }

    #[test]
    fn test_run_data_kept_opaque() {
        let json = r#"{"info":{"run_id":"r1","name":"n"},"data":{"metrics":[{"key":"loss","value":0.1}]}}"#;
        let run: Run = serde_json::from_str(json).unwrap();
        assert!(run.data.get("metrics").unwrap().is_array());
    }

    #[test]
    fn test_search_experiments_request_omits_missing_limit() {
        let body = serde_json::to_string(&SearchExperimentsRequest::default()).unwrap();
        assert_eq!(body, "{}");

        let body = serde_json::to_string(&SearchExperimentsRequest { max_results: Some(5) }).unwrap();
        assert_eq!(body, r#"{"max_results":5}"#);
    }

    #[test]
    fn test_search_runs_request_filters_missing_id() {
        assert!(SearchRunsRequest::for_experiment(None).experiment_ids.is_empty());
        assert_eq!(
            SearchRunsRequest::for_experiment(Some("7")).experiment_ids,
            vec!["7".to_string()]
        );
        let body = serde_json::to_string(&SearchRunsRequest::for_experiment(None)).unwrap();
        assert_eq!(body, r#"{"experiment_ids":[]}"#);
    }

    #[test]
    fn test_empty_search_responses() {
        let runs: SearchRunsResponse = serde_json::from_str("{}").unwrap();
        assert!(runs.runs.is_empty());
        let exps: SearchExperimentsResponse =
            serde_json::from_str(r#"{"experiments":[],"next_page_token":null}"#).unwrap();
        assert!(exps.experiments.is_empty());
    }
}
