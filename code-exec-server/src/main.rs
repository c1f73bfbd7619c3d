use clap::Parser;
use code_exec::{
    CodeExecutionService, HistoryStore, InMemoryHistory, JsonFileHistory, ServiceConfig,
    DEFAULT_PYTHON,
};
use code_exec_server::{create_app, run_server, AppState};
use project_tracker::ProjectTracker;
use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to listen on
    #[arg(short, long, default_value = "0.0.0.0:8000")]
    addr: SocketAddr,

    /// Wall-clock limit for a single execution, in seconds
    #[arg(long, default_value = "5")]
    timeout_secs: u64,

    /// Python interpreter used to run snippets
    #[arg(long, default_value = DEFAULT_PYTHON)]
    python: String,

    /// Directory for temporary script files (defaults to the system temp dir)
    #[arg(long)]
    scratch_dir: Option<PathBuf>,

    /// Maximum number of concurrent executions (unbounded if omitted)
    #[arg(short, long)]
    max_concurrent: Option<usize>,

    /// JSON file that stores the execution history
    #[arg(long, default_value = "history.json")]
    history_file: PathBuf,

    /// Keep the execution history in memory only
    #[arg(long, conflicts_with = "history_file")]
    no_history_file: bool,

    /// Git repository served by /commit-history/git
    #[arg(long, default_value = ".")]
    repo: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = ServiceConfig::default()
        .with_python(args.python)
        .with_timeout(Duration::from_secs(args.timeout_secs));
    if let Some(dir) = args.scratch_dir {
        config = config.with_scratch_dir(dir);
    }
    if let Some(max) = args.max_concurrent {
        config = config.with_max_concurrent_executions(max);
    }

    let history: Arc<dyn HistoryStore> = if args.no_history_file {
        info!("Keeping execution history in memory");
        Arc::new(InMemoryHistory::new())
    } else {
        info!("Recording execution history to {}", args.history_file.display());
        Arc::new(JsonFileHistory::new(args.history_file))
    };

    let state = AppState::new(
        CodeExecutionService::new(config),
        history,
        Arc::new(ProjectTracker::new()),
        args.repo,
    );

    run_server(create_app(state), args.addr).await?;

    Ok(())
}
