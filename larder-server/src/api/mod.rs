//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`inventory`] - 库存接口 (含状态统计)
//! - [`orders`] - 采购订单接口
//! - [`suppliers`] - 供应商接口

pub mod health;
pub mod inventory;
pub mod orders;
pub mod suppliers;

use std::time::{Duration, Instant};

use axum::{Router, middleware};
use http::{HeaderName, HeaderValue, StatusCode};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;
use uuid::Uuid;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        target: "http_access",
        %method,
        %uri,
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        request_id = %request_id,
        "{} {} {}",
        method,
        uri,
        response.status()
    );

    response
}

/// Requests running longer than `timeout` are answered with 408
pub fn request_timeout(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Health API - public route
        .merge(health::router())
        .merge(inventory::router())
        .merge(orders::router())
        .merge(suppliers::router())
}

/// Build a fully configured application with all middleware and state
///
/// This is used by both the HTTP server and oneshot calls in tests
pub fn build_app(state: ServerState) -> Router {
    let timeout = Duration::from_millis(state.config.request_timeout_ms);
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    build_router()
        .with_state(state)
        // ========== Tower HTTP Middleware ==========
        .layer(request_timeout(timeout))
        // Request logging - sees the generated request id
        .layer(middleware::from_fn(log_request))
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        // Request ID - outermost, generate unique ID for each request
        .layer(SetRequestIdLayer::new(request_id, XRequestId))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::routing::get;
    use http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn slow_requests_time_out_with_408() {
        let app = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "done"
                }),
            )
            .route("/fast", get(|| async { "done" }))
            .layer(request_timeout(Duration::from_millis(20)));

        let slow = Request::builder().uri("/slow").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(slow).await.unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

        let fast = Request::builder().uri("/fast").body(Body::empty()).unwrap();
        let response = app.oneshot(fast).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
