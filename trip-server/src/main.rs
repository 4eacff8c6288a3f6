use tracing_subscriber::EnvFilter;

use trip_server::cache::CachedGeocoder;
use trip_server::config::ServerConfig;
use trip_server::geocode::HttpGeocoder;
use trip_server::store::JsonFileTripStore;
use trip_server::web::{AppState, create_router};

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "trip_server=info,tower_http=info";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    // Open the trip store (fail fast if the data file is unreadable)
    let store = JsonFileTripStore::open(&config.data_path).expect("Failed to open trip store");

    // Create cached geocoder
    let country = config.geocode.country_name.clone();
    let geocoder = HttpGeocoder::new(config.geocode).expect("Failed to create geocoder");
    let geocoder = CachedGeocoder::new(geocoder, &config.cache);

    let state = AppState::new(store, geocoder, &country);
    let app = create_router(state, &config.static_dir);

    tracing::info!(addr = %config.bind_addr, static_dir = %config.static_dir.display(), "starting server");

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
