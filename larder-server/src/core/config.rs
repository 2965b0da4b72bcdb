use std::path::PathBuf;

use chrono_tz::Tz;
use rust_decimal::Decimal;

use crate::inventory::StatusPolicy;
use crate::inventory::status::{DEFAULT_EXPIRY_WINDOW_DAYS, DEFAULT_LOW_STOCK_THRESHOLD};
use crate::orders::allocator::DEFAULT_MAX_ATTEMPTS;

/// 数据库文件名 (位于 work_dir/database 下)
pub const DATABASE_FILE: &str = "larder.db";

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./larder-data | 工作目录 (database/, logs/) |
/// | HTTP_PORT | 8080 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | TIMEZONE | UTC | 业务时区 (决定"今天") |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | LOW_STOCK_THRESHOLD | 10 | 低库存阈值 |
/// | EXPIRY_WINDOW_DAYS | 7 | 临期窗口(天) |
/// | DERIVE_INVENTORY_STATUS | true | 每次写入时重新计算库存状态 |
/// | ORDER_ID_MAX_ATTEMPTS | 5 | 订单号分配重试上限 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false (production 为 true) | JSON 日志 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/larder HTTP_PORT=9000 TIMEZONE=Europe/Madrid cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库和日志
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | production
    pub environment: String,
    /// 业务时区
    pub timezone: Tz,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 库存状态规则
    pub status_policy: StatusPolicy,
    /// 订单号分配最大尝试次数
    pub order_id_max_attempts: u32,
    /// 日志级别 (EnvFilter 语法)
    pub log_level: String,
    /// 是否输出 JSON 日志
    pub log_json: bool,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载配置
    ///
    /// 常用于测试场景
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let environment = get("ENVIRONMENT").unwrap_or_else(|| "development".into());
        let is_production = environment == "production";

        Self {
            work_dir: get("WORK_DIR").unwrap_or_else(|| "./larder-data".into()),
            http_port: get("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            timezone: get("TIMEZONE")
                .and_then(|tz| tz.parse().ok())
                .unwrap_or(Tz::UTC),
            request_timeout_ms: get("REQUEST_TIMEOUT_MS")
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            status_policy: StatusPolicy {
                low_stock_threshold: get("LOW_STOCK_THRESHOLD")
                    .and_then(|v| v.trim().parse::<Decimal>().ok())
                    .filter(|v| !v.is_sign_negative())
                    .unwrap_or(Decimal::from(DEFAULT_LOW_STOCK_THRESHOLD)),
                expiry_window_days: get("EXPIRY_WINDOW_DAYS")
                    .and_then(|v| v.parse::<u32>().ok())
                    .unwrap_or(DEFAULT_EXPIRY_WINDOW_DAYS),
                derive_status: get("DERIVE_INVENTORY_STATUS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(true),
            },
            order_id_max_attempts: get("ORDER_ID_MAX_ATTEMPTS")
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_MAX_ATTEMPTS),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: get("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(is_production),
            environment,
        }
    }

    /// 使用自定义工作目录覆盖配置
    ///
    /// 常用于测试场景
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_lookup(|_| None);
        config.work_dir = work_dir.into();
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// work_dir/database
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// work_dir/database/larder.db
    pub fn database_path(&self) -> PathBuf {
        self.database_dir().join(DATABASE_FILE)
    }

    /// work_dir/logs
    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 创建工作目录结构 (database/, logs/)
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
