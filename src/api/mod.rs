pub mod error;
pub mod response;
pub mod v1;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::{config::Config, simulator::HemsBackend};

/// Origin of the local presentation client allowed when CORS is on
const DEV_CLIENT_ORIGIN: &str = "http://localhost:3000";

pub fn router(backend: Arc<dyn HemsBackend>, cfg: &Config) -> Router {
    let mut router = Router::new().nest("/api/v1", v1::router(v1::AppState { backend }));

    if cfg.server.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(HeaderValue::from_static(DEV_CLIENT_ORIGIN))
            .allow_methods([Method::GET, Method::POST, Method::PATCH])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);
        router = router.layer(cors);
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(axum::extract::DefaultBodyLimit::max(64 * 1024))
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(cfg.server.request_timeout_secs),
                )),
        )
        .layer(TraceLayer::new_for_http())
}
