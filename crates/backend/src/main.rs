pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::middleware::{self, Next};
use axum::response::Response;
use std::path::Path;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE: &str = "backend.log";
const DEFAULT_LOG_FILTER: &str = "info,tower_http=warn";

/// Консоль + файл `target/logs/backend.log` (без ANSI).
/// `init` заодно подключает мост `log` → tracing для записей из contracts.
fn init_tracing() -> anyhow::Result<()> {
    let log_dir = Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join(LOG_FILE))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

async fn log_request(req: Request<Body>, next: Next) -> Response {
    let started = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let elapsed = started.elapsed().as_millis();
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        tracing::warn!("{} {} -> {} ({} ms)", method, path, status.as_u16(), elapsed);
    } else {
        tracing::info!("{} {} -> {} ({} ms)", method, path, status.as_u16(), elapsed);
    }
    response
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let config = shared::config::load_config()?;
    let seed_path = shared::config::get_seed_path(&config);
    let seed = shared::data::seed::SeedData::load(seed_path.as_deref())?;
    tracing::info!(
        "Seed loaded: {} project(s), {} item(s), {} glossary term(s)",
        seed.projects.len(),
        seed.items.len(),
        seed.glossary.len()
    );
    shared::data::store::initialize_store(seed)?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    // API первым, остальное отдаёт собранный фронтенд
    let app = routes::configure_routes()
        .fallback_service(ServeDir::new("dist"))
        .layer(middleware::from_fn(log_request))
        .layer(cors);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::AddrInUse {
            tracing::error!("Port busy: {} is already taken by another process", addr);
        } else {
            tracing::error!("Cannot bind {}: {}", addr, e);
        }
        e
    })?;
    tracing::info!("Translation queue backend listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
