use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    http::Method,
    routing::get,
    Json, Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};

use crate::{fetch::Fetcher, parse, registry::Registry, MenuItem, Result};

#[derive(Clone)]
pub struct AppState {
    registry: Arc<Registry>,
    fetcher: Arc<dyn Fetcher>,
}

impl AppState {
    pub fn new(registry: Registry, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            registry: Arc::new(registry),
            fetcher,
        }
    }

    /// Resolves `dining_hall`, fetches its page and extracts the menu. Any failure aborts the whole scrape.
    pub async fn scrape_menu(&self, dining_hall: &str) -> Result<Vec<MenuItem>> {
        let url = self.registry.resolve(dining_hall)?;
        let page = self.fetcher.fetch(url).await?;
        let items = parse::extract(&page.document());
        log::info!("{dining_hall}: {} menu items", items.len());
        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "Menu items: {}",
                serde_json::to_string(&items).unwrap_or_default()
            );
        }
        Ok(items)
    }
}

/// Every `diningHall` value in the query string, comma joined. Never rejects: a missing or
/// repeated parameter falls through to the registry as an unknown hall.
fn dining_hall_param(query: Option<&str>) -> String {
    let Some(query) = query else {
        return String::new();
    };
    url::form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == "diningHall")
        .map(|(_, value)| value.into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

async fn menu(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<MenuItem>>> {
    let dining_hall = dining_hall_param(query.as_deref());
    match state.scrape_menu(&dining_hall).await {
        Ok(items) => Ok(Json(items)),
        Err(e) => {
            log::warn!("Error fetching the menu for {dining_hall:?}: {e}");
            Err(e)
        }
    }
}

pub fn router(state: AppState) -> Router {
    let compression_layer: CompressionLayer = CompressionLayer::new()
        .br(true)
        .deflate(true)
        .gzip(true)
        .zstd(true);
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any);

    Router::new()
        .route("/menu", get(menu))
        .with_state(state)
        .layer(cors_layer)
        .layer(compression_layer)
}

/// Resolves on Ctrl-C so in-flight requests can finish before exit.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("shutting down");
}
