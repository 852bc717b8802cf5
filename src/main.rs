use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::convert::Infallible;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use music_retrieval_client::cli_style::get_styles;
use music_retrieval_client::render::render_session;
use music_retrieval_client::shell::run_shell;
use music_retrieval_client::{
    AppConfig, CliConfig, FileConfig, QueryDispatcher, RetrievalAlgorithm, SessionController,
    SessionState,
};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

/// Only `true` (any case) forces local synthesis, any other value leaves it off.
fn parse_use_mock(s: &str) -> Result<bool, Infallible> {
    Ok(s.trim().eq_ignore_ascii_case("true"))
}

#[derive(Parser, Debug)]
#[command(styles=get_styles(), name = "music-retrieval", about = "Music retrieval demo client")]
struct CliArgs {
    /// Free-text query. Starts the interactive shell when omitted.
    pub query: Option<String>,

    /// Retrieval algorithm for the first (or only) result panel.
    #[clap(short, long, value_enum)]
    pub algorithm: Option<RetrievalAlgorithm>,

    /// Retrieval algorithm for the second panel in comparison mode.
    #[clap(long, value_enum)]
    pub algorithm2: Option<RetrievalAlgorithm>,

    /// Number of results (5, 10, 20 or 50).
    #[clap(short)]
    pub k: Option<usize>,

    /// Run both algorithms side by side.
    #[clap(long)]
    pub compare: bool,

    /// Base URL of the scoring service.
    #[clap(long, env = "BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Never contact the scoring service, synthesize every result locally.
    #[clap(long, env = "USE_MOCK", action = ArgAction::SetTrue, value_parser = parse_use_mock)]
    pub use_mock: bool,

    /// Timeout in seconds for scoring service requests.
    #[clap(long)]
    pub request_timeout_sec: Option<u64>,

    /// Optional TOML config file, its values override the command line.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Print results as JSON instead of rendering panels.
    #[clap(long)]
    pub json: bool,

    /// Log routing decisions and fallbacks to stderr.
    #[clap(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            backend_url: self.backend_url.clone(),
            use_mock: self.use_mock,
            request_timeout_sec: self.request_timeout_sec,
            k: self.k,
            algorithm: self.algorithm,
            algorithm2: self.algorithm2,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init();
}

async fn run_once(mut controller: SessionController, query: &str, json: bool) -> Result<i32> {
    controller.submit_search(query).await;
    let state = controller.snapshot();

    if json {
        let results: Vec<_> = state.result1.iter().chain(state.result2.iter()).collect();
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        render_session(&mut std::io::stdout(), &state)?;
    }

    Ok(if state.error.is_some() { 1 } else { 0 })
}

async fn run(cli_args: CliArgs) -> Result<i32> {
    let file_config = match &cli_args.config {
        Some(path) => Some(
            FileConfig::load(path)
                .with_context(|| format!("Could not load config at {}", path.display()))?,
        ),
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    if config.use_mock {
        info!("Local synthesis forced, the scoring service will not be contacted");
    } else {
        info!("Scoring service configured at {}", config.backend_url);
    }

    let dispatcher = Arc::new(QueryDispatcher::from_config(&config)?);
    let state = SessionState {
        comparison_mode: cli_args.compare,
        algorithm1: config.algorithm,
        algorithm2: config.algorithm2,
        k: config.k,
        ..SessionState::default()
    };
    let controller = SessionController::with_state(dispatcher, state);

    match cli_args.query.as_deref() {
        Some(query) => run_once(controller, query, cli_args.json).await,
        None => {
            run_shell(controller).await?;
            Ok(0)
        }
    }
}

#[tokio::main]
async fn main() {
    let cli_args = CliArgs::parse();
    init_logging(cli_args.verbose);

    match run(cli_args).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}
