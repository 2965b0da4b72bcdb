//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{DeliveredRevenue, Order, OrderDraft, OrderReplace};

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/orders - 获取所有订单
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let orders = state.orders.list_all().await?;
    Ok(Json(orders))
}

/// GET /api/orders/:order_id - 获取单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.orders.get(&order_id).await?;
    Ok(Json(order))
}

/// POST /api/orders - 创建订单 (服务端分配订单号和创建日期)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderDraft>,
) -> AppResult<Json<Order>> {
    let order = state.orders.create(payload).await?;
    Ok(Json(order))
}

/// PUT /api/orders/:order_id - 按订单号整体替换，不存在则新建
pub async fn update(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
    Json(payload): Json<OrderReplace>,
) -> AppResult<Json<Order>> {
    let order = state.orders.update(&order_id, payload).await?;
    Ok(Json(order))
}

/// DELETE /api/orders/:order_id - 删除订单 (幂等)
pub async fn delete(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<bool>> {
    let removed = state.orders.delete(&order_id).await?;
    Ok(Json(removed))
}

/// GET /api/orders/revenue/delivered - 已交付订单总金额
pub async fn delivered_revenue(
    State(state): State<ServerState>,
) -> AppResult<Json<DeliveredRevenue>> {
    let revenue = state.orders.total_delivered_revenue().await?;
    Ok(Json(revenue))
}
