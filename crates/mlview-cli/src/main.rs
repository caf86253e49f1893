//! mlview CLI: serve the dashboard or browse the tracking server from a
//! terminal.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mlview_cli::table::rows_table;
use mlview_cli::ReqwestTransport;
use mlview_core::models::SearchExperimentsRequest;
use mlview_core::views::{self, load_experiments, load_run, load_runs};
use mlview_core::{ApiConfig, TrackingClient, DEFAULT_API_PREFIX};
use mlview_server::{serve, ServerConfig};

#[derive(Parser)]
#[command(
    name = "mlview",
    about = "mlview: browse MLflow experiments and runs",
    version,
    author
)]
struct Cli {
    /// Base URL of the MLflow tracking server
    #[arg(
        long,
        global = true,
        env = "MLFLOW_TRACKING_URI",
        default_value = "http://127.0.0.1:5000"
    )]
    tracking_uri: String,
    /// Path prefix of the tracking REST API
    #[arg(long, global = true, env = "MLVIEW_API_PREFIX", default_value = DEFAULT_API_PREFIX)]
    api_prefix: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web dashboard server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to bind to
        #[arg(long, short, default_value_t = 8000)]
        port: u16,
    },
    /// List experiments
    Experiments {
        /// Maximum number of experiments to return (server default if omitted)
        #[arg(long, short = 'n')]
        max_results: Option<i64>,
    },
    /// List the runs of an experiment
    Runs {
        /// Experiment id
        experiment_id: String,
    },
    /// Show a single run
    Run {
        /// Run id
        run_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let api = ApiConfig::new(&cli.api_prefix);

    match cli.command {
        Commands::Serve { host, port } => {
            cmd_serve(cli.tracking_uri, api, host, port).await?;
        }
        Commands::Experiments { max_results } => {
            let client = tracking_client(&cli.tracking_uri, api)?;
            cmd_experiments(&client, max_results).await?;
        }
        Commands::Runs { experiment_id } => {
            let client = tracking_client(&cli.tracking_uri, api)?;
            cmd_runs(&client, &experiment_id).await?;
        }
        Commands::Run { run_id } => {
            let client = tracking_client(&cli.tracking_uri, api)?;
            cmd_run(&client, &run_id).await?;
        }
    }

    Ok(())
}

fn tracking_client(tracking_uri: &str, api: ApiConfig) -> Result<TrackingClient<ReqwestTransport>> {
    Ok(TrackingClient::new(ReqwestTransport::new(tracking_uri)?, api))
}

// ─── Command implementations ──────────────────────────────────────────────────

async fn cmd_serve(tracking_uri: String, api: ApiConfig, host: String, port: u16) -> Result<()> {
    println!("mlview dashboard");
    println!("   Tracking server: {}", tracking_uri);
    println!("   URL:             http://{}:{}", host, port);
    println!();

    let config = ServerConfig {
        host,
        port,
        tracking_uri,
        api,
    };
    serve(config).await
}

async fn cmd_experiments(
    client: &TrackingClient<ReqwestTransport>,
    max_results: Option<i64>,
) -> Result<()> {
    let request = SearchExperimentsRequest { max_results };
    let experiments = load_experiments(client, &request).await?;

    if experiments.is_empty() {
        println!("No experiments found");
        return Ok(());
    }
    println!("{}", rows_table(&views::experiment_rows(&experiments)));
    Ok(())
}

async fn cmd_runs(client: &TrackingClient<ReqwestTransport>, experiment_id: &str) -> Result<()> {
    let runs = load_runs(client, Some(experiment_id)).await?;
    if runs.is_empty() {
        println!("No runs found for experiment '{}'", experiment_id);
        return Ok(());
    }
    println!("{}", rows_table(&views::run_rows(experiment_id, &runs)));
    Ok(())
}

async fn cmd_run(client: &TrackingClient<ReqwestTransport>, run_id: &str) -> Result<()> {
    let run = load_run(client, run_id).await?;
    println!("{}", views::run_title(&run));
    Ok(())
}
