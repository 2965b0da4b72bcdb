//! Supplier API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Supplier, SupplierInput, SupplierName};

use crate::core::ServerState;
use crate::db::repository::{RepoError, supplier};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text,
    validate_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

fn supplier_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::SupplierNotFound, format!("Supplier {id} not found"))
        .with_detail("id", id)
}

/// Trim every text field, drop blank categories, then check lengths
fn validate_input(input: &mut SupplierInput) -> AppResult<()> {
    for field in [
        &mut input.company,
        &mut input.contact_person,
        &mut input.email,
        &mut input.mobile,
        &mut input.address,
    ] {
        *field = field.trim().to_string();
    }
    input.categories = input
        .categories
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();

    validate_required_text(&input.company, "company", MAX_NAME_LEN)?;
    validate_text(&input.contact_person, "contact_person", MAX_NAME_LEN)?;
    validate_text(&input.email, "email", MAX_EMAIL_LEN)?;
    validate_text(&input.mobile, "mobile", MAX_SHORT_TEXT_LEN)?;
    validate_text(&input.address, "address", MAX_ADDRESS_LEN)?;
    for category in &input.categories {
        validate_text(category, "categories", MAX_NAME_LEN)?;
    }
    Ok(())
}

/// GET /api/suppliers - 获取所有供应商
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Supplier>>> {
    let suppliers = supplier::find_all(&state.pool).await?;
    Ok(Json(suppliers))
}

/// GET /api/suppliers/names - 仅公司名称
pub async fn list_names(State(state): State<ServerState>) -> AppResult<Json<Vec<SupplierName>>> {
    let names = supplier::find_names(&state.pool).await?;
    Ok(Json(names))
}

/// GET /api/suppliers/:id - 获取单个供应商
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Supplier>> {
    let found = supplier::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| supplier_not_found(id))?;
    Ok(Json(found))
}

/// POST /api/suppliers - 创建供应商
pub async fn create(
    State(state): State<ServerState>,
    Json(mut payload): Json<SupplierInput>,
) -> AppResult<Json<Supplier>> {
    validate_input(&mut payload)?;
    let created = supplier::create(&state.pool, payload).await?;
    tracing::info!(supplier_id = created.id, company = %created.company, "Supplier created");
    Ok(Json(created))
}

/// PUT /api/suppliers/:id - 整体替换供应商
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(mut payload): Json<SupplierInput>,
) -> AppResult<Json<Supplier>> {
    validate_input(&mut payload)?;
    let updated = supplier::update(&state.pool, id, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => supplier_not_found(id),
            other => other.into(),
        })?;
    tracing::info!(supplier_id = id, "Supplier updated");
    Ok(Json(updated))
}

/// DELETE /api/suppliers/:id - 删除供应商 (幂等)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let removed = supplier::delete(&state.pool, id).await?;
    if removed {
        tracing::info!(supplier_id = id, "Supplier deleted");
    }
    Ok(Json(removed))
}
