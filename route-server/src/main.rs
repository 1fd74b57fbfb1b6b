use std::process::ExitCode;

use route_server::config::{AppConfig, ProviderSource};
use route_server::providers::{Backend, FixtureProviders, LiveProviders};
use route_server::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("route_server=info,tower_http=info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    // Live clients, or a recorded scenario when ROUTE_FIXTURE_PATH is set
    let backend = match &config.source {
        ProviderSource::Live { tmap, kakao } => LiveProviders::new(tmap.clone(), kakao.clone())
            .map(Backend::from)
            .map_err(|e| e.to_string()),
        ProviderSource::Fixture(path) => FixtureProviders::load(path)
            .map(Backend::from)
            .map_err(|e| e.to_string()),
    };
    let backend = match backend {
        Ok(backend) => backend,
        Err(e) => {
            error!(error = %e, "Failed to create route providers");
            return ExitCode::FAILURE;
        }
    };
    let backend_name = backend.name();

    let state = AppState::new(backend, &config.cache, config.planner.clone());
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(
        addr = %config.bind_addr,
        backend = backend_name,
        cache_ttl_secs = config.cache.ttl.as_secs(),
        debug = config.planner.include_debug,
        "Route planner listening"
    );
    info!("  GET  /health      - Health check");
    info!("  POST /api/routes  - Plan taxi and transit routes");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
