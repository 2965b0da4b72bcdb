//! Inventory API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::models::{InventoryItem, InventoryItemInput, InventoryStatus, InventorySummary};

use crate::core::ServerState;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResult {
    /// 状态发生变化的条目数
    pub changed: u64,
}

/// GET /api/inventory - 获取所有库存条目
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<InventoryItem>>> {
    let items = state.inventory.list_all().await?;
    Ok(Json(items))
}

/// GET /api/inventory/:id - 获取单个库存条目
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<InventoryItem>> {
    let item = state.inventory.get(id).await?;
    Ok(Json(item))
}

/// POST /api/inventory - 创建库存条目
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<InventoryItemInput>,
) -> AppResult<Json<InventoryItem>> {
    let item = state.inventory.create(payload).await?;
    Ok(Json(item))
}

/// PUT /api/inventory/:id - 整体替换库存条目
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<InventoryItemInput>,
) -> AppResult<Json<InventoryItem>> {
    let item = state.inventory.update(id, payload).await?;
    Ok(Json(item))
}

/// DELETE /api/inventory/:id - 删除库存条目 (幂等)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let removed = state.inventory.delete(id).await?;
    Ok(Json(removed))
}

/// GET /api/inventory/count?status=Low Stock - 按状态计数
pub async fn count_by_status(
    State(state): State<ServerState>,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<i64>> {
    let status: InventoryStatus = query.status.parse()?;
    let count = state.inventory.count_by_status(status).await?;
    Ok(Json(count))
}

/// GET /api/inventory/low-stock/count
pub async fn count_low_stock(State(state): State<ServerState>) -> AppResult<Json<i64>> {
    Ok(Json(state.inventory.count_low_stock().await?))
}

/// GET /api/inventory/expiring-soon/count
pub async fn count_expiring_soon(State(state): State<ServerState>) -> AppResult<Json<i64>> {
    Ok(Json(state.inventory.count_expiring_soon().await?))
}

/// GET /api/inventory/available/count
pub async fn count_available(State(state): State<ServerState>) -> AppResult<Json<i64>> {
    Ok(Json(state.inventory.count_available().await?))
}

/// GET /api/inventory/low-stock
pub async fn list_low_stock(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<InventoryItem>>> {
    Ok(Json(state.inventory.list_low_stock().await?))
}

/// GET /api/inventory/expiring-soon
pub async fn list_expiring_soon(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<InventoryItem>>> {
    Ok(Json(state.inventory.list_expiring_soon().await?))
}

/// GET /api/inventory/out-of-stock
pub async fn list_out_of_stock(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<InventoryItem>>> {
    Ok(Json(state.inventory.list_out_of_stock().await?))
}

/// GET /api/inventory/summary - 各状态计数
pub async fn summary(State(state): State<ServerState>) -> AppResult<Json<InventorySummary>> {
    Ok(Json(state.inventory.summary().await?))
}

/// POST /api/inventory/refresh-status - 按今天重新计算所有状态
pub async fn refresh_status(State(state): State<ServerState>) -> AppResult<Json<RefreshResult>> {
    let changed = state.inventory.refresh_statuses().await?;
    Ok(Json(RefreshResult { changed }))
}
