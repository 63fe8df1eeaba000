//! HosPOS Server - 多终端 POS 后端
//!
//! # 架构概述
//!
//! 本 crate 提供 POS 后端的核心功能：
//!
//! - **预订生命周期** (`bookings`): open → closed / cancelled 状态机，账单总额服务端重算
//! - **定价引擎** (`pricing`): 税额、折扣、支付结算 (纯计算)
//! - **折扣目录** (`discounts`): 折扣定义、到期与续期、兑换码查找
//! - **销售账本** (`ledger`): 只追加的销售与支付记录
//! - **终端注册** (`terminals`): 绑定码、初始数据快照、心跳在线状态
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! pos-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── db/            # 文档存储 (SurrealDB / 内存) 与仓储
//! ├── pricing/       # 定价引擎
//! ├── bookings/      # 预订生命周期
//! ├── discounts/     # 折扣目录
//! ├── ledger/        # 销售/支付账本
//! ├── terminals/     # 终端绑定与心跳
//! ├── api/           # HTTP 路由和处理器
//! ├── middleware/    # 请求日志、故障屏障、终端守卫
//! └── utils/         # 日志、校验
//! ```

pub mod api;
pub mod bookings;
pub mod core;
pub mod db;
pub mod discounts;
pub mod ledger;
pub mod middleware;
pub mod pricing;
pub mod terminals;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境: 加载 `.env`，按配置初始化日志
///
/// 返回加载好的配置
pub fn setup_environment() -> Config {
    // .env 不存在是正常情况
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );

    if dotenv_loaded {
        tracing::debug!("Loaded environment from .env");
    }
    config
}

pub fn print_banner() {
    println!(
        r#"
    __  __           ____  ____  _____
   / / / /___  _____/ __ \/ __ \/ ___/
  / /_/ / __ \/ ___/ /_/ / / / /\__ \
 / __  / /_/ (__  ) ____/ /_/ /___/ /
/_/ /_/\____/____/_/    \____//____/
    "#
    );
}
