use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use stasera::cache::{AppCache, RedisCache};
use stasera::config::Config;
use stasera::notify::LogNotifier;
use stasera::providers::{HttpMetadataProvider, HttpScheduleProvider};
use stasera::routes::create_router;
use stasera::state::AppState;
use stasera::store::RedisStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("stasera=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let store = Arc::new(RedisStore::new(&config.redis_url)?);
    let cache = AppCache::new(Arc::new(RedisCache::new(&config.redis_url)?));

    let schedule = Arc::new(HttpScheduleProvider::new(
        config.schedule_url.clone(),
        cache.clone(),
    ));
    let metadata = Arc::new(HttpMetadataProvider::new(
        config.metadata_url.clone(),
        config.metadata_api_key.clone(),
    ));

    let state = AppState::new(
        store,
        cache,
        schedule,
        metadata,
        Arc::new(LogNotifier),
        config.taste_weights(),
        config.number_suggestions,
    );

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
