//! 健康检查路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /health | GET | 存活 + 数据库检查 | 无 |
//!
//! # 响应示例
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "version": "0.1.0",
//!   "uptime_seconds": 42,
//!   "checks": { "database": { "status": "ok", "latency_ms": 1 } }
//! }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use http::StatusCode;
use serde::Serialize;
use std::time::{Instant, SystemTime};

use crate::core::ServerState;
use crate::db::DbService;

/// 健康检查路由 - 公共路由
pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

/// 健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    /// healthy | degraded
    status: &'static str,
    version: &'static str,
    /// 运行时间 (秒)
    uptime_seconds: u64,
    checks: HealthChecks,
}

#[derive(Serialize)]
pub struct HealthChecks {
    database: CheckResult,
}

/// 单项检查结果
#[derive(Serialize)]
pub struct CheckResult {
    /// 状态 (ok | error)
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl CheckResult {
    fn ok_with_latency(latency_ms: u64) -> Self {
        Self {
            status: "ok",
            latency_ms: Some(latency_ms),
            message: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            latency_ms: None,
            message: Some(message.into()),
        }
    }
}

// 服务器启动时间 (懒加载静态变量)
static START_TIME: std::sync::OnceLock<SystemTime> = std::sync::OnceLock::new();

/// 记录启动时间 (启动时调用一次)
pub fn mark_started() {
    START_TIME.get_or_init(SystemTime::now);
}

fn get_uptime_seconds() -> u64 {
    let start = START_TIME.get_or_init(SystemTime::now);
    SystemTime::now()
        .duration_since(*start)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// GET /health - 存活检查，数据库不可用时返回 503
pub async fn health(State(state): State<ServerState>) -> (StatusCode, Json<HealthResponse>) {
    let db_start = Instant::now();
    let database = match DbService::ping(&state.pool).await {
        Ok(()) => CheckResult::ok_with_latency(db_start.elapsed().as_millis() as u64),
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unavailable");
            CheckResult::error(e.message)
        }
    };

    let healthy = database.status == "ok";
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if healthy { "healthy" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            uptime_seconds: get_uptime_seconds(),
            checks: HealthChecks { database },
        }),
    )
}
