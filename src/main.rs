use tokio::net::TcpListener;

use umich_menu::{
    config::Config,
    fetch,
    registry::Registry,
    routes::{router, shutdown_signal, AppState},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> core::result::Result<(), Box<dyn std::error::Error>> {
    umich_menu::init_logging();
    let config = Config::from_env()?;
    let registry = Registry::with_base(&config.base_url)?;
    log::info!(
        "dining halls: {}",
        registry.keys().collect::<Vec<_>>().join(", ")
    );
    log::info!("using {:?} renderer", config.renderer);
    let fetcher = fetch::connect(config.renderer, config.fetch_timeout).await?;
    let app = router(AppState::new(registry, fetcher));

    let addr = config.addr;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| format!("failed to listen on {addr}: {e}"))?;
    log::info!("listening on http://{addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
