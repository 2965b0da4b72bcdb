//! Larder Server - 库存、采购订单与供应商管理
//!
//! # 架构概述
//!
//! - **库存状态引擎** (`inventory`): 按数量和保质期推导库存状态，提供统计
//! - **订单号分配** (`orders::allocator`): 按月递增的 `ORD_<年>_<月>_<序号>`
//! - **订单生命周期** (`orders`): 创建、按键 upsert、删除、已交付金额
//! - **数据库** (`db`): SQLite (sqlx) 存储
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! larder-server/src/
//! ├── core/          # 配置、状态、服务器、错误
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 连接池 + repository
//! ├── inventory/     # 库存状态引擎
//! ├── orders/        # 订单号分配 + 订单服务
//! └── utils/         # 错误、日志、时间、校验
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod inventory;
pub mod orders;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use inventory::{InventoryService, StatusPolicy};
pub use orders::{OrderIdAllocator, OrderService};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// 设置运行环境: 工作目录 + 日志
///
/// 需在 `dotenv` 加载之后、其它初始化之前调用
pub fn setup_environment(config: &Config) -> anyhow::Result<()> {
    config.ensure_work_dir_structure()?;
    let logs_dir = config.logs_dir();
    init_logger_with_file(&config.log_level, config.log_json, Some(logs_dir.as_path()))?;
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __                   __
   / /   ____ __________/ /__  _____
  / /   / __ `/ ___/ __  / _ \/ ___/
 / /___/ /_/ / /  / /_/ /  __/ /
/_____/\__,_/_/   \__,_/\___/_/
    "#
    );
}
