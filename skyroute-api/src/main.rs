use std::sync::Arc;
use std::net::SocketAddr;
use skyroute_api::{app, AppState};
use skyroute_engine::{EngineConfig, FlightSearchEngine};
use skyroute_store::{AmadeusClient, RedisClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skyroute_api=debug,skyroute_engine=debug,skyroute_store=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = skyroute_store::app_config::Config::load()?;
    tracing::info!("Starting SkyRoute API on port {}", config.server.port);

    if config.amadeus.api_key.is_empty() || config.amadeus.api_secret.is_empty() {
        tracing::warn!("Amadeus credentials are empty; every supplier request will fail");
    }

    let redis = RedisClient::new(&config.redis.url).await?;
    let supplier = AmadeusClient::new(config.amadeus.clone())?;

    let engine = FlightSearchEngine::new(
        Arc::new(supplier),
        EngineConfig { max_hub_candidates: config.search.max_hub_candidates },
    );

    let app_state = AppState {
        engine: Arc::new(engine),
        redis: Some(Arc::new(redis)),
        search: config.search.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>()
    ).await?;

    Ok(())
}
