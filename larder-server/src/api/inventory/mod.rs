//! Inventory API 模块
//!
//! 静态路径 (`/count`, `/summary`, `/low-stock` ...) 优先于 `/{id}` 匹配。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/inventory", routes())
}

fn routes() -> Router<ServerState> {
    let stats_routes = Router::new()
        .route("/count", get(handler::count_by_status))
        .route("/low-stock/count", get(handler::count_low_stock))
        .route("/expiring-soon/count", get(handler::count_expiring_soon))
        .route("/available/count", get(handler::count_available))
        .route("/low-stock", get(handler::list_low_stock))
        .route("/expiring-soon", get(handler::list_expiring_soon))
        .route("/out-of-stock", get(handler::list_out_of_stock))
        .route("/summary", get(handler::summary))
        .route("/refresh-status", post(handler::refresh_status));

    let crud_routes = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        );

    stats_routes.merge(crud_routes)
}
