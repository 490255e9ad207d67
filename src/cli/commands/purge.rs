use std::sync::Arc;

use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::database::{DocumentStore, Filter};
use crate::models::Collection;

/// Resolve `all` or a single collection name
pub fn parse_target(name: &str) -> anyhow::Result<Vec<Collection>> {
    if name == "all" {
        return Ok(Collection::ALL.to_vec());
    }

    Collection::parse(name)
        .map(|collection| vec![collection])
        .ok_or_else(|| anyhow::anyhow!("Unknown collection '{}', expected malls, stores, employees, users or all", name))
}

/// Bulk delete; returns the number of removed records per collection
pub async fn purge(store: &dyn DocumentStore, targets: &[Collection]) -> anyhow::Result<Vec<(Collection, u64)>> {
    let mut removed = Vec::with_capacity(targets.len());
    for collection in targets {
        let count = store.delete_all(*collection, &Filter::All).await?;
        tracing::info!("Purged {} record(s) from {}", count, collection);
        removed.push((*collection, count));
    }
    Ok(removed)
}

pub async fn handle(
    name: &str,
    confirmed: bool,
    store: Arc<dyn DocumentStore>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let targets = parse_target(name)?;
    if !confirmed {
        anyhow::bail!("Refusing to purge {} without --yes", name);
    }

    let removed = purge(store.as_ref(), &targets).await?;
    let total: u64 = removed.iter().map(|(_, count)| count).sum();
    let counts: serde_json::Map<String, serde_json::Value> = removed
        .iter()
        .map(|(collection, count)| (collection.to_string(), json!(count)))
        .collect();

    output_success(
        output_format,
        &format!("Removed {} record(s) from {}", total, name),
        Some(json!({ "removed": counts })),
    )
}
