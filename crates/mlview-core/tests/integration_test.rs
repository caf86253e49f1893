//! Integration tests for mlview-core, driven by a recording transport.

use std::cell::RefCell;
use std::collections::HashMap;

use mlview_core::models::SearchExperimentsRequest;
use mlview_core::views::{self, load_experiments, load_run, load_runs};
use mlview_core::{
    ApiConfig, HttpMethod, HttpRequest, HttpResponse, HttpTransport, Loader, MlviewError,
    Result, TrackingClient, ViewState,
};

/// Answers from a path → (status, body) table and records every request.
#[derive(Default)]
struct MockTransport {
    routes: HashMap<String, (u16, String)>,
    sent: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    fn with(mut self, path: &str, status: u16, body: &str) -> Self {
        self.routes
            .insert(path.to_string(), (status, body.to_string()));
        self
    }

    fn sent(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }
}

impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let path = request.url.split('?').next().unwrap_or_default().to_string();
        self.sent.borrow_mut().push(request.clone());
        match self.routes.get(&path) {
            Some((status, body)) => Ok(HttpResponse::new(request.url, *status, body.clone())),
            None => Err(MlviewError::Network(format!("connection refused: {}", path))),
        }
    }
}

fn client(transport: MockTransport) -> TrackingClient<MockTransport> {
    TrackingClient::new(transport, ApiConfig::default())
}

#[tokio::test]
async fn test_search_experiments_request_shape() {
    let api = client(MockTransport::default().with(
        "/api/2.0/mlflow/experiments/search",
        200,
        r#"{"experiments":[{"experiment_id":"1","name":"Exp A"}]}"#,
    ));

    let experiments = load_experiments(&api, &Default::default()).await.unwrap();
    assert_eq!(experiments.len(), 1);

    let sent = api.transport().sent();
    assert_eq!(sent.len(), 1, "exactly one call on mount");
    assert_eq!(sent[0].method, HttpMethod::Post);
    assert_eq!(sent[0].url, "/api/2.0/mlflow/experiments/search");
    assert_eq!(sent[0].body.as_deref(), Some("{}"));
    assert_eq!(sent[0].header("Content-Type"), Some("application/json"));

    let rows = views::experiment_rows(&experiments);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].href, "/experiments/1");
    assert_eq!(rows[0].label, "Exp A");
}

#[tokio::test]
async fn test_search_experiments_passes_result_limit() {
    let api = client(MockTransport::default().with(
        "/api/2.0/mlflow/experiments/search",
        200,
        r#"{"experiments":[]}"#,
    ));

    let request = SearchExperimentsRequest {
        max_results: Some(3),
    };
    load_experiments(&api, &request).await.unwrap();

    let sent = api.transport().sent();
    assert_eq!(sent[0].body.as_deref(), Some(r#"{"max_results":3}"#));
}

#[tokio::test]
async fn test_search_runs_scoped_to_experiment() {
    let api = client(MockTransport::default().with(
        "/api/2.0/mlflow/runs/search",
        200,
        r#"{"runs":[{"info":{"run_id":"r1","name":""},"data":{}}]}"#,
    ));

    let runs = load_runs(&api, Some("E")).await.unwrap();
    let rows = views::run_rows("E", &runs);
    assert_eq!(rows[0].href, "/experiments/E/runs/r1");
    assert_eq!(rows[0].label, "r1");

    load_runs(&api, None).await.unwrap();

    let sent = api.transport().sent();
    assert_eq!(sent[0].body.as_deref(), Some(r#"{"experiment_ids":["E"]}"#));
    assert_eq!(sent[1].body.as_deref(), Some(r#"{"experiment_ids":[]}"#));
}

#[tokio::test]
async fn test_get_run_uses_query_string() {
    let api = client(MockTransport::default().with(
        "/api/2.0/mlflow/runs/get",
        200,
        r#"{"run":{"info":{"run_id":"abc123","name":"My Run"},"data":{}}}"#,
    ));

    let run = load_run(&api, "abc123").await.unwrap();
    assert_eq!(views::run_title(&run), "My Run");

    let sent = api.transport().sent();
    assert_eq!(sent[0].method, HttpMethod::Get);
    assert_eq!(sent[0].url, "/api/2.0/mlflow/runs/get?run_id=abc123");
    assert!(sent[0].body.is_none());
}

#[tokio::test]
async fn test_configured_prefix() {
    let transport = MockTransport::default().with("/mock/experiments/search", 200, "{}");
    let api = TrackingClient::new(transport, ApiConfig::new("/mock/"));

    let experiments = load_experiments(&api, &Default::default()).await.unwrap();
    assert!(experiments.is_empty());
}

#[tokio::test]
async fn test_failures_surface_as_errors() {
    let api = client(
        MockTransport::default()
            .with(
                "/api/2.0/mlflow/runs/get",
                404,
                r#"{"error_code":"RESOURCE_DOES_NOT_EXIST","message":"Run 'nope' not found"}"#,
            )
            .with("/api/2.0/mlflow/experiments/search", 200, "not json"),
    );

    let err = load_run(&api, "nope").await.unwrap_err();
    assert_eq!(err.status(), Some(404));

    let err = load_experiments(&api, &Default::default()).await.unwrap_err();
    assert!(matches!(err, MlviewError::Decode(_)));

    let err = load_runs(&api, Some("1")).await.unwrap_err();
    assert!(matches!(err, MlviewError::Network(_)));
}

/// Runs one watched-parameter change through the loader the way the views
/// do: sync the key, fetch only if a ticket comes back, resolve with it.
async fn follow_experiment(
    api: &TrackingClient<MockTransport>,
    loader: &mut Loader<Option<String>, Vec<mlview_core::Run>>,
    experiment_id: Option<&str>,
) {
    let key = Some(experiment_id.map(str::to_string));
    if let Some(ticket) = loader.sync(key) {
        let result = load_runs(api, experiment_id).await;
        assert!(loader.resolve(ticket, result));
    }
}

async fn follow_run(
    api: &TrackingClient<MockTransport>,
    loader: &mut Loader<String, mlview_core::Run>,
    run_id: Option<&str>,
) {
    if let Some(ticket) = loader.sync(run_id.map(str::to_string)) {
        let result = load_run(api, run_id.unwrap_or_default()).await;
        loader.resolve(ticket, result);
    }
}

#[tokio::test]
async fn test_one_fetch_per_distinct_experiment() {
    let api = client(MockTransport::default().with(
        "/api/2.0/mlflow/runs/search",
        200,
        r#"{"runs":[]}"#,
    ));
    let mut loader = Loader::new();

    // Re-renders with an unchanged parameter must not refetch.
    for param in [Some("1"), Some("1"), Some("2"), Some("2"), None, None, Some("1")] {
        follow_experiment(&api, &mut loader, param).await;
    }

    let bodies: Vec<String> = api
        .transport()
        .sent()
        .into_iter()
        .filter_map(|r| r.body)
        .collect();
    assert_eq!(
        bodies,
        vec![
            r#"{"experiment_ids":["1"]}"#,
            r#"{"experiment_ids":["2"]}"#,
            r#"{"experiment_ids":[]}"#,
            r#"{"experiment_ids":["1"]}"#,
        ]
    );
    assert_eq!(loader.state(), &ViewState::Loaded(vec![]));
}

#[tokio::test]
async fn test_missing_run_id_issues_no_call() {
    let api = client(MockTransport::default().with(
        "/api/2.0/mlflow/runs/get",
        200,
        r#"{"run":{"info":{"run_id":"abc123","name":""},"data":{}}}"#,
    ));
    let mut loader = Loader::new();

    follow_run(&api, &mut loader, None).await;
    follow_run(&api, &mut loader, None).await;
    assert!(api.transport().sent().is_empty());
    assert!(loader.state().is_unloaded());

    follow_run(&api, &mut loader, Some("abc123")).await;
    assert_eq!(api.transport().sent().len(), 1);
    let run = loader.state().loaded().unwrap();
    assert_eq!(mlview_core::views::run_title(run), "abc123");

    // Losing the parameter drops back to the placeholder without a call.
    follow_run(&api, &mut loader, None).await;
    assert_eq!(api.transport().sent().len(), 1);
    assert!(loader.state().is_unloaded());
}
