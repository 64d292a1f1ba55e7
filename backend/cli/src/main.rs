mod context;
mod products_cmd;
mod reviews_cmd;
mod summarize_cmd;
mod terminal_output;

#[cfg(test)]
mod testing;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use reviewlens_config::load_and_prepare;
use reviewlens_core::ProductId;
use reviewlens_logging::init_logger;

use context::{log_settings, AppContext};
use terminal_output::note_error;

#[derive(Parser)]
#[command(name = "reviewlens")]
#[command(about = "ReviewLens: browse product reviews and stream AI summaries")]
#[command(version)]
struct Cli {
    /// API base URL, e.g. http://localhost:3000/api
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Config file (defaults to $REVIEWLENS_CONFIG, then the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the product catalog
    Products,
    /// Show reviews for a product
    Reviews {
        /// Product ID
        id: ProductId,
    },
    /// Summarize a product's reviews
    Summarize {
        /// Product ID
        id: ProductId,
        /// Wait for the whole summary instead of streaming it
        #[arg(long)]
        blocking: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            note_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let api_base = cli.api_base.clone();
    let loaded = load_and_prepare(cli.config.as_deref(), move |cfg| {
        if let Some(base) = api_base {
            cfg.api.base_url = base;
        }
    })
    .await?;

    init_logger(&log_settings(&loaded.config))?;
    debug!(path = %loaded.path.display(), "Config ready");
    for warning in &loaded.warnings {
        warn!(path = %warning.path, message = %warning.message, "Config warning");
    }

    let ctx = AppContext::from_config(&loaded.config)?;
    let mut stdout = std::io::stdout();

    match cli.command {
        Commands::Products => products_cmd::run(&ctx, &mut stdout).await,
        Commands::Reviews { id } => reviews_cmd::run(&ctx, id, &mut stdout).await,
        Commands::Summarize { id, blocking } => {
            summarize_cmd::run(&ctx, id, blocking, &mut stdout).await
        }
    }
}
