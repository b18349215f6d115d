//! Catalog command handlers.

use super::commands::Commands;
use serde::Serialize;
use std::path::Path;
use vitrine::{
    BackendHint, CatalogEngine, CatalogRequest, Category, EnvironmentSignals, JsonError,
    VitrineConfig, VitrineResult,
};

/// Load configuration from `path`, or from the layered defaults.
pub fn load_config(path: Option<&Path>) -> VitrineResult<VitrineConfig> {
    match path {
        Some(path) => VitrineConfig::from_file(path),
        None => VitrineConfig::load(),
    }
}

/// Handle one catalog command against `config`.
pub async fn handle_command(cmd: Commands, config: &VitrineConfig) -> VitrineResult<()> {
    let engine = CatalogEngine::from_config(config, EnvironmentSignals::from_env(config))?;

    match cmd {
        Commands::List {
            platform,
            page,
            limit,
            category,
            search,
        } => {
            let request = CatalogRequest {
                platform: platform.parse()?,
                page,
                limit,
                category: parse_category(category.as_deref())?,
                search,
            };
            print_json(&engine.query(&request).await)
        }

        Commands::Capabilities => print_json(&engine.capabilities()),

        Commands::Delete { urls } => {
            let results = engine.delete_assets(&urls).await;
            let failed = results.iter().filter(|r| !r.success).count();
            if failed > 0 {
                tracing::warn!(failed, total = results.len(), "Some deletions failed");
            }
            print_json(&results)
        }

        Commands::Superseded {
            platform,
            category,
            prune,
            dry_run,
        } => {
            let hint: BackendHint = platform.parse()?;
            let category = parse_category(category.as_deref())?;
            if prune {
                print_json(&engine.prune_superseded(hint, category, dry_run).await?)
            } else {
                print_json(&engine.superseded(hint, category).await?)
            }
        }
    }
}

fn parse_category(slug: Option<&str>) -> VitrineResult<Option<Category>> {
    Ok(slug.map(str::parse::<Category>).transpose()?)
}

fn print_json<T: Serialize>(value: &T) -> VitrineResult<()> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| JsonError::new(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
