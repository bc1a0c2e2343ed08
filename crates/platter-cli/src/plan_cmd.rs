//! One-shot plan generation from the terminal.
//!
//! Runs the same pipeline the HTTP endpoint drives and prints the
//! resulting plan as JSON. Asset URLs are resolved against the
//! configured server address, so the links work once `platter serve`
//! is running against the same asset root.

use std::path::PathBuf;

use anyhow::{Result, bail};

use platter_core::assets::AssetStore;
use platter_core::backend::OpenAiBackend;
use platter_core::models::PlanRequest;
use platter_core::orchestrator::run_plan;

use crate::config::PlatterConfig;

pub struct PlanArgs {
    pub ingredients: String,
    pub kcal: u32,
    pub exact: bool,
    pub extra: Option<String>,
    pub asset_root: Option<PathBuf>,
}

pub async fn run_plan_command(args: PlanArgs) -> Result<()> {
    if args.ingredients.trim().is_empty() {
        bail!("--ingredients must not be empty");
    }
    if args.kcal == 0 {
        bail!("--kcal must be greater than zero");
    }

    let config = PlatterConfig::resolve()?;
    let asset_root = args.asset_root.unwrap_or_else(|| config.server.asset_root.clone());
    let store = AssetStore::new(asset_root);
    store.ensure_layout()?;

    let backend = OpenAiBackend::new(config.backend)?;
    let base_url = format!("http://{}:{}/", config.server.bind, config.server.port);

    let request = PlanRequest {
        ingredients: args.ingredients,
        kcal: args.kcal,
        exact_ingredients: args.exact,
        extra: args.extra,
    };

    let plan = run_plan(&backend, &store, &request, &base_url)
        .await
        .map_err(anyhow::Error::new)?;

    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
