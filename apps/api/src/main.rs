mod ai_client;
mod analysis;
mod audit;
mod auth;
mod config;
mod db;
mod errors;
mod interviews;
mod models;
mod routes;
mod sharing;
mod state;
mod transcription;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ai_client::AiClient;
use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging. Event targets carry the bin crate name,
    // so the default directive must use it, not the package name.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting RecruiterLab API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    // Initialize the AI provider client
    let ai = AiClient::new(config.openai_base_url.clone(), config.openai_api_key.clone());
    info!(
        "AI client initialized (chat: {}, transcription: {})",
        ai_client::CHAT_MODEL,
        ai_client::TRANSCRIPTION_MODEL
    );

    // Build app state
    let state = AppState {
        db,
        s3,
        ai,
        config: config.clone(),
    };

    // Build router. The permissive CORS layer also answers OPTIONS preflights.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "recruiterlab-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}

#[cfg(test)]
mod tests {
    #[test]
    fn default_log_filter_targets_this_crate() {
        // Tracing targets are prefixed with the bin crate name. If the bin
        // target is ever renamed, the default filter directive must follow.
        assert_eq!(env!("CARGO_CRATE_NAME"), "api");
    }
}
