use std::path::PathBuf;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use configs::AppConfig;
use service::PointRegistry;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod points;
pub mod system;

/// Content-Security-Policy for the map client: OpenStreetMap tiles and the
/// unpkg CDN (Leaflet) are the only third-party origins.
pub const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
    img-src 'self' data: blob: https://*.tile.openstreetmap.org https://tile.openstreetmap.org; \
    script-src 'self' https://unpkg.com; \
    style-src 'self' 'unsafe-inline' https://unpkg.com; \
    connect-src 'self'; \
    object-src 'none'; \
    base-uri 'self'; \
    frame-ancestors 'self'";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub registry: PointRegistry,
}

impl AppState {
    pub fn new(registry: PointRegistry) -> Self {
        Self { registry }
    }
}

/// Router settings that come from configuration.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub static_dir: PathBuf,
    pub body_limit_bytes: usize,
}

impl From<&AppConfig> for RouterOptions {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            static_dir: cfg.static_files.dir.clone(),
            body_limit_bytes: cfg.server.body_limit_bytes,
        }
    }
}

/// Build the full application router: JSON API, metrics and the static client.
pub fn build_router(state: AppState, opts: RouterOptions, cors: CorsLayer) -> Router {
    let index = opts.static_dir.join("index.html");
    let static_dir = ServeDir::new(&opts.static_dir).fallback(ServeFile::new(index));

    let api = Router::new()
        .route("/api/health", get(system::health))
        .route("/api/materials", get(points::list_materials))
        .route("/api/points", get(points::list_points).post(points::create_point))
        .layer(DefaultBodyLimit::max(opts.body_limit_bytes));

    Router::new()
        .merge(api)
        .route("/metrics", get(system::metrics))
        // 其余路径交给前端（单页应用，找不到时回退 index.html）
        .fallback_service(static_dir)
        .with_state(state)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx 以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
