use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use simtwin_application::SimulationService;
use simtwin_client::HttpGateway;
use simtwin_infrastructure::{ConfigService, TomlStateRepository};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "simtwin")]
#[command(about = "SimTwin - console front end for a digital twin simulation service", long_about = None)]
struct Cli {
    /// Backend base URL (overrides config file and SIMTWIN_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available simulation models
    Models,
    /// Select the model used by subsequent commands
    Select {
        model: String,
        /// Also initialize a fresh session for the model
        #[arg(long)]
        init: bool,
    },
    /// Initialize a simulation session for the selected model
    Init {
        /// Shortcut for `--params '{"initial": N}'` (wins over --params)
        #[arg(long)]
        initial: Option<f64>,
        /// Model parameters as a JSON object
        #[arg(long)]
        params: Option<String>,
    },
    /// Advance the simulation by one step
    Step {
        /// Control input; defaults to the model's default value
        #[arg(long, allow_hyphen_values = true)]
        control: Option<f64>,
        /// Optional time delta passed through to the backend
        #[arg(long)]
        delta_time: Option<f64>,
    },
    /// Show the current simulation state
    State,
    /// Tabulate the session history
    History,
    /// Print backend logs for the session
    Logs,
    /// Reset the session, optionally with new parameters
    Reset {
        /// Model parameters as a JSON object
        #[arg(long)]
        params: Option<String>,
    },
    /// Patch model parameters on the running session
    Params {
        /// New parameters as a JSON object
        params: String,
    },
    /// Show the persisted session store
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let base_url = cli
        .base_url
        .unwrap_or_else(|| ConfigService::new().get_config().base_url);
    let gateway = Arc::new(HttpGateway::new(base_url));
    let store = Arc::new(TomlStateRepository::open_default());
    let service = Arc::new(SimulationService::new(gateway, store));

    let outcome = match cli.command {
        Commands::Models => {
            commands::model::models();
            Ok(())
        }
        Commands::Select { model, init } => commands::model::select(&service, &model, init).await,
        Commands::Init { initial, params } => {
            commands::session::init(&service, initial, params.as_deref()).await
        }
        Commands::Step {
            control,
            delta_time,
        } => commands::session::step(&service, control, delta_time).await,
        Commands::State => commands::session::state(&service).await,
        Commands::History => commands::session::history(&service).await,
        Commands::Logs => commands::session::logs(&service).await,
        Commands::Reset { params } => commands::session::reset(&service, params.as_deref()).await,
        Commands::Params { params } => commands::session::update_params(&service, &params).await,
        Commands::Status => {
            commands::session::status(&service).await;
            Ok(())
        }
    };

    // Errors are shown inline and never panic out of the process.
    if let Err(err) = outcome {
        eprintln!("{}", err.to_string().red());
        std::process::exit(1);
    }

    Ok(())
}
