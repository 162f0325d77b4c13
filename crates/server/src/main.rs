//! Shopping agent server binary.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use shop_agent_catalog::{RetryPolicy, StoreClient, StoreOptions};
use shop_agent_config::{load_settings, Settings};
use shop_agent_core::{FeatureGlossary, PhoneStore};
use shop_agent_server::{create_router, AppState};
use shop_agent_tools::{catalog_tools, PhoneReferenceCache};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let env = std::env::var("SHOP_AGENT_ENV").ok();
    let settings = load_settings(env.as_deref()).context("failed to load settings")?;

    let store = build_store(&settings)?;
    let glossary = Arc::new(FeatureGlossary::default());
    let registry = Arc::new(catalog_tools(store.clone(), glossary));
    let reference = Arc::new(PhoneReferenceCache::new(store));

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let state = AppState {
        config: Arc::new(settings),
        registry,
        reference,
    };

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "shopping agent server listening");

    axum::serve(listener, create_router(state))
        .await
        .context("server error")?;

    Ok(())
}

fn build_store(settings: &Settings) -> anyhow::Result<Arc<dyn PhoneStore>> {
    let store = StoreClient::new(StoreOptions {
        base_url: settings.store.url.clone(),
        api_key: settings.store.api_key.clone(),
        table: settings.store.table.clone(),
        timeout: Duration::from_secs(settings.store.timeout_secs),
        retry: RetryPolicy {
            max_attempts: settings.store.retry.max_attempts,
            base_delay: Duration::from_millis(settings.store.retry.base_delay_ms),
            max_delay: Duration::from_millis(settings.store.retry.max_delay_ms),
        },
    })
    .context("failed to create catalog store client")?;

    Ok(Arc::new(store))
}
