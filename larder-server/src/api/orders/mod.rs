//! Order API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/revenue/delivered", get(handler::delivered_revenue))
        .route(
            "/{order_id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
