use sqlx::SqlitePool;

use crate::core::{Config, Result};
use crate::db::DbService;
use crate::inventory::InventoryService;
use crate::orders::OrderService;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段都是廉价克隆 (连接池内部为 Arc)，每个请求拿到一份拷贝。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | SQLite 连接池 |
/// | inventory | InventoryService | 库存状态引擎 |
/// | orders | OrderService | 订单生命周期 (含订单号分配) |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// 库存服务
    pub inventory: InventoryService,
    /// 订单服务
    pub orders: OrderService,
}

impl ServerState {
    /// 基于已打开的连接池构造服务
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let inventory = InventoryService::new(pool.clone(), config.status_policy, config.timezone);
        let orders = OrderService::new(pool.clone(), config.order_id_max_attempts, config.timezone);
        Self {
            config,
            pool,
            inventory,
            orders,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 工作目录结构 (work_dir/database, work_dir/logs)
    /// 2. 数据库 (work_dir/database/larder.db) + 迁移
    /// 3. 服务
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db = DbService::new(&config.database_path()).await?;

        tracing::info!(
            timezone = %config.timezone,
            low_stock_threshold = %config.status_policy.low_stock_threshold,
            expiry_window_days = config.status_policy.expiry_window_days,
            derive_status = config.status_policy.derive_status,
            "Server state initialized"
        );

        Ok(Self::new(config.clone(), db.pool))
    }
}
