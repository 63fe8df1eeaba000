use std::time::Duration;

use crate::bookings::BookingManager;
use crate::core::{Config, Result};
use crate::db::{self, StoreHandle};
use crate::discounts::DiscountDirectory;
use crate::ledger::SaleLedger;
use crate::terminals::TerminalRegistry;

/// 服务器状态 - 持有所有组件的共享引用
///
/// 存储句柄在启动时创建一次，注入到每个组件中；之后不会在请求处理中重新初始化。
/// 所有字段都是廉价克隆 (内部为 `Arc`)。
///
/// # 组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | store | StoreHandle | 文档存储 |
/// | bookings | BookingManager | 预订生命周期 |
/// | discounts | DiscountDirectory | 折扣目录 |
/// | ledger | SaleLedger | 销售/支付账本 |
/// | terminals | TerminalRegistry | 终端绑定与心跳 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 文档存储
    pub store: StoreHandle,
    pub bookings: BookingManager,
    pub discounts: DiscountDirectory,
    pub ledger: SaleLedger,
    pub terminals: TerminalRegistry,
}

impl ServerState {
    /// 基于已连接的存储构造状态
    ///
    /// 测试直接传入 `MemoryStore`
    pub fn new(config: Config, store: StoreHandle) -> Self {
        let bookings = BookingManager::new(store.clone());
        let discounts = DiscountDirectory::new(store.clone());
        let ledger = SaleLedger::new(store.clone(), discounts.clone(), bookings.clone());
        let terminals = TerminalRegistry::new(
            store.clone(),
            Duration::from_secs(config.heartbeat_timeout_secs),
        );
        Self {
            config,
            store,
            bookings,
            discounts,
            ledger,
            terminals,
        }
    }

    /// 初始化服务器状态
    ///
    /// 连接 `config.store_uri` 指定的存储 (仅此一次)，然后组装各组件。
    pub async fn initialize(config: &Config) -> Result<Self> {
        let store = db::connect_store(config).await?;
        tracing::info!(store_uri = %config.store_uri, "Document store connected");
        Ok(Self::new(config.clone(), store))
    }
}
