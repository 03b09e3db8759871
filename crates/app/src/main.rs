use anyhow::Context;

use storefront_app::{StorefrontConfig, demo};

fn main() -> anyhow::Result<()> {
    let config = StorefrontConfig::from_env().context("failed to load configuration")?;
    storefront_observability::init(config.log_format);

    tracing::info!(page_size = config.page_size, sort = %config.default_sort, "starting storefront demo");

    let report = demo::run(&config)?;
    println!("{}", serde_json::to_string_pretty(&report.settled)?);
    for (item_id, count) in &report.remaining_stock {
        tracing::info!(item_id = %item_id, count, "remaining stock");
    }
    Ok(())
}
