//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`logger`] - tracing 日志初始化
//! - [`time`] - 业务时区日期
//! - [`validation`] - 输入解析与校验

pub mod error;
pub mod logger;
pub mod time;
pub mod validation;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
