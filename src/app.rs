/*
 * Responsibility
 * - Config読み込み → 依存生成 (PgPool / IdCodec / AuthService) → Router 組み立て
 * - Middleware の適用 (HTTP infra / CORS / security headers)
 * - axum::serve() で起動
 */
use anyhow::Result;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use crate::{
    api,
    config::Config,
    middleware,
    services::{auth::build_auth_service, id_codec::IdCodec},
    state::AppState,
};

pub async fn run() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;

    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    let id_codec = IdCodec::new(config.sqids_min_length, &config.sqids_alphabet)?;
    let auth = build_auth_service(&config);

    let state = AppState::new(db, id_codec, auth);
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "savepoint api listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn build_router(state: AppState, config: &Config) -> Router {
    let app = Router::new()
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    let app = middleware::cors::apply(app, config);
    let app = middleware::security_headers::apply(app);
    middleware::http::apply(app)
}
