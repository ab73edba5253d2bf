mod config;
mod contact;
mod db;
mod errors;
mod knowledge;
mod matching;
mod models;
mod onboarding;
mod profiles;
mod repository;
mod routes;
mod safety;
mod skills;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::db::create_pool;
use crate::knowledge::KnowledgeBase;
use crate::repository::postgres::PgStore;
use crate::routes::build_router;
use crate::skills::gaps::LearnedGaps;
use crate::skills::resolver::SkillResolver;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Wisdom API v{}", env!("CARGO_PKG_VERSION"));

    // Knowledge base: embedded default unless KNOWLEDGE_PATH overrides it
    let knowledge = Arc::new(KnowledgeBase::load(config.knowledge_path.as_deref())?);

    let resolver = Arc::new(SkillResolver::new(&knowledge, Arc::new(LearnedGaps::new())));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(PgStore::new(db));

    let state = AppState {
        profiles: store.clone(),
        connections: store,
        resolver,
        knowledge,
        config: config.clone(),
    };

    // TODO: restrict CORS origins once the web client is deployed
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
