//! 测试辅助: 临时工作目录上的完整 ServerState

#![allow(dead_code)]

use chrono::NaiveDate;
use larder_server::{Config, ServerState};
use shared::models::{InventoryItemInput, OrderDraft, OrderReplace};
use tempfile::TempDir;

/// Keep the `TempDir` alive for as long as the state is used
pub struct TestEnv {
    pub state: ServerState,
    _dir: TempDir,
}

pub async fn test_env() -> TestEnv {
    test_env_with(|_| {}).await
}

pub async fn test_env_with(adjust: impl FnOnce(&mut Config)) -> TestEnv {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut config = Config::with_work_dir(dir.path().to_string_lossy());
    adjust(&mut config);
    let state = ServerState::initialize(&config)
        .await
        .expect("initialize server state");
    TestEnv { state, _dir: dir }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn order_draft(name: &str, price: &str, status: Option<&str>) -> OrderDraft {
    OrderDraft {
        name: name.to_string(),
        category: "Dry goods".to_string(),
        supplier: "Mill & Co".to_string(),
        delivery: "2025-01-20".to_string(),
        status: status.map(str::to_string),
        quantity: "10".to_string(),
        unit: "kg".to_string(),
        price: price.to_string(),
    }
}

pub fn order_replace(order_id: Option<&str>, draft: OrderDraft) -> OrderReplace {
    OrderReplace {
        order_id: order_id.map(str::to_string),
        fields: draft,
    }
}

pub fn item_input(name: &str, quantity: &str, expires: &str) -> InventoryItemInput {
    InventoryItemInput {
        name: name.to_string(),
        category: "Pantry".to_string(),
        quantity: quantity.to_string(),
        unit: "kg".to_string(),
        status: None,
        expiration_date: expires.to_string(),
    }
}
