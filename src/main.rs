use std::{net::SocketAddr, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use treat_tracker::{router, AppState, JsonSheetStore, Settings, Tracker};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let settings = Settings::from_env();
    let store = JsonSheetStore::new(settings.sheet_path.clone());
    store.seed_if_missing(&settings.layout).await?;

    let tracker = Tracker::new(Arc::new(store), settings.layout.clone());
    // refuse to start against a sheet that cannot be read or has the wrong shape
    if let Err(err) = tracker.load().await {
        if err.is_schema() {
            error!(worksheet = %settings.layout.worksheet, "tracker sheet has the wrong shape: {err}");
        } else {
            error!(path = %settings.sheet_path.display(), "tracker sheet is unreachable: {err}");
        }
        return Err(err.into());
    }

    let app = router(AppState::new(settings.title.as_str(), tracker));

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    info!(sheet = %settings.sheet_path.display(), "listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
