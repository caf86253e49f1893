//! Client-side routes.

/// Path patterns in the router's `:param` syntax.
pub const EXPERIMENT_LIST_PATH: &str = "/";
pub const EXPERIMENT_DETAIL_PATH: &str = "/experiments/:experiment_id";
pub const RUN_DETAIL_PATH: &str = "/experiments/:experiment_id/runs/:run_id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRoute {
    ExperimentList,
    ExperimentDetail {
        experiment_id: String,
    },
    RunDetail {
        experiment_id: String,
        run_id: String,
    },
}

impl AppRoute {
    /// Matches a URL path (query and fragment ignored). Empty segments never
    /// bind a parameter.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path
            .trim_start_matches('/')
            .trim_end_matches('/')
            .split('/')
            .collect();

        match segments.as_slice() {
            [""] => Some(AppRoute::ExperimentList),
            ["experiments", experiment_id] if !experiment_id.is_empty() => {
                Some(AppRoute::ExperimentDetail {
                    experiment_id: decode_segment(experiment_id),
                })
            }
            ["experiments", experiment_id, "runs", run_id]
                if !experiment_id.is_empty() && !run_id.is_empty() =>
            {
                Some(AppRoute::RunDetail {
                    experiment_id: decode_segment(experiment_id),
                    run_id: decode_segment(run_id),
                })
            }
            _ => None,
        }
    }

    pub fn href(&self) -> String {
        match self {
            AppRoute::ExperimentList => "/".to_string(),
            AppRoute::ExperimentDetail { experiment_id } => experiment_href(experiment_id),
            AppRoute::RunDetail {
                experiment_id,
                run_id,
            } => run_href(experiment_id, run_id),
        }
    }

    pub fn experiment_id(&self) -> Option<&str> {
        match self {
            AppRoute::ExperimentList => None,
            AppRoute::ExperimentDetail { experiment_id }
            | AppRoute::RunDetail { experiment_id, .. } => Some(experiment_id),
        }
    }

    pub fn run_id(&self) -> Option<&str> {
        match self {
            AppRoute::RunDetail { run_id, .. } => Some(run_id),
            _ => None,
        }
    }
}

/// Ids are percent-encoded so a `/` or `?` in one cannot change the route.
pub fn experiment_href(experiment_id: &str) -> String {
    format!("/experiments/{}", urlencoding::encode(experiment_id))
}

pub fn run_href(experiment_id: &str, run_id: &str) -> String {
    format!(
        "/experiments/{}/runs/{}",
        urlencoding::encode(experiment_id),
        urlencoding::encode(run_id)
    )
}

/// Decodes one path segment, keeping it as-is if it is not valid UTF-8 once
/// decoded.
fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}
