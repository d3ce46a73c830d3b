use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::repository::AuthRepository;
use service::auth::service::TokenConfig;
use service::auth::AuthService;
use service::probe::chrome::{ChromeProbe, ChromeProbeConfig};
use service::probe::ProbeGate;
use service::tracker::repository::{SeaOrmTrackerRepository, TrackerRepository};

use crate::routes;
use crate::state::AppState;

fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr(cfg: &configs::AppConfig, from_file: bool) -> anyhow::Result<SocketAddr> {
    let (host, port) = if from_file {
        (cfg.server.host.clone(), cfg.server.port)
    } else {
        let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8081);
        (host, port)
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let (mut cfg, from_file) = match configs::load_default() {
        Ok(c) => (c, true),
        Err(_) => (configs::AppConfig::default(), false),
    };
    cfg.database.normalize_from_env();
    cfg.auth.normalize_from_env();

    // DB connection + schema
    let db = if cfg.database.url.trim().is_empty() {
        models::db::connect().await?
    } else {
        models::db::connect_with(&cfg.database).await?
    };
    migration::Migrator::up(&db, None).await?;

    let jwt_secret = if cfg.auth.jwt_secret.trim().is_empty() {
        env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".to_string())
    } else {
        cfg.auth.jwt_secret.clone()
    };

    let users: Arc<dyn AuthRepository> = Arc::new(SeaOrmAuthRepository { db: db.clone() });
    let auth = Arc::new(AuthService::new(
        Arc::clone(&users),
        TokenConfig::new(jwt_secret, cfg.auth.token_ttl_days),
    ));
    let trackers: Arc<dyn TrackerRepository> = Arc::new(SeaOrmTrackerRepository { db });

    let chrome = ChromeProbe::new(ChromeProbeConfig {
        nav_timeout: Duration::from_secs(cfg.probe.nav_timeout_secs),
        selector_timeout: Duration::from_secs(cfg.probe.selector_timeout_secs),
        window_size: (1512, 823),
    });
    let probe = Arc::new(ProbeGate::new(
        Arc::new(chrome),
        cfg.probe.max_concurrent,
        Duration::from_secs(cfg.probe.wall_clock_secs),
    ));

    let state = AppState { auth, users, trackers, probe };

    let cors = build_cors();
    let app: Router = routes::build_router(cors, state);

    let addr = load_bind_addr(&cfg, from_file)?;
    info!(%addr, "starting tracker server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
