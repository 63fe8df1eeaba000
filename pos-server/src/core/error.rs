//! 服务器启动与运行错误
//!
//! 请求级错误使用 [`AppError`](crate::utils::AppError)，这里只覆盖进程生命周期。

use thiserror::Error;

use crate::db::StoreError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("存储初始化失败: {0}")]
    Store(#[from] StoreError),

    #[error("监听失败: {0}")]
    Io(#[from] std::io::Error),
}

/// 服务器生命周期的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
