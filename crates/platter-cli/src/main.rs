mod config;
mod plan_cmd;
mod serve_cmd;
#[cfg(test)]
mod test_util;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use platter_core::assets::AssetStore;
use platter_core::backend::OpenAiBackend;
use platter_core::backend::types::DEFAULT_API_URL;

use config::PlatterConfig;
use serve_cmd::AppState;

#[derive(Parser)]
#[command(name = "platter", about = "Daily meal-plan service with a generative backend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a platter config file
    Init {
        /// Base URL of the OpenAI-compatible API
        #[arg(long, default_value = DEFAULT_API_URL)]
        api_url: String,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Run the HTTP server
    Serve {
        /// Bind address (overrides the config file)
        #[arg(long)]
        bind: Option<String>,
        /// Port (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
        /// Asset root directory (overrides the config file)
        #[arg(long)]
        asset_root: Option<PathBuf>,
    },
    /// Generate one meal plan and print it as JSON
    Plan {
        /// Comma-separated base ingredients
        #[arg(long)]
        ingredients: String,
        /// Maximum total calories for the day
        #[arg(long, default_value_t = 2000)]
        kcal: u32,
        /// Use only the provided ingredients (plus salt, pepper, spices)
        #[arg(long)]
        exact: bool,
        /// Extra preference, e.g. "spicy" or "high protein"
        #[arg(long)]
        extra: Option<String>,
        /// Asset root directory (overrides the config file)
        #[arg(long)]
        asset_root: Option<PathBuf>,
    },
}

/// Execute the `platter init` command: write the config file.
fn cmd_init(api_url: &str, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let mut cfg = config::ConfigFile::default();
    cfg.backend.api_url = api_url.to_string();
    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  backend.api_url = {api_url}");
    println!();
    println!("Next: set PLATTER_API_KEY (or add backend.api_key to the config file),");
    println!("then run `platter serve`.");

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { api_url, force } => {
            cmd_init(&api_url, force)?;
        }
        Commands::Serve {
            bind,
            port,
            asset_root,
        } => {
            let resolved = PlatterConfig::resolve()?;
            let bind = bind.unwrap_or(resolved.server.bind.clone());
            let port = port.unwrap_or(resolved.server.port);
            let asset_root = asset_root.unwrap_or(resolved.server.asset_root.clone());

            let store = AssetStore::new(asset_root);
            store.ensure_layout()?;

            let backend = OpenAiBackend::new(resolved.backend)?;
            let state = AppState {
                backend: Arc::new(backend),
                store,
            };
            serve_cmd::run_serve(state, &bind, port).await?;
        }
        Commands::Plan {
            ingredients,
            kcal,
            exact,
            extra,
            asset_root,
        } => {
            plan_cmd::run_plan_command(plan_cmd::PlanArgs {
                ingredients,
                kcal,
                exact,
                extra,
                asset_root,
            })
            .await?;
        }
    }

    Ok(())
}
