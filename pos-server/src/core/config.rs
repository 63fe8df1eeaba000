/// 服务器配置 - POS 后端的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | STORE_URI | rocksdb://data/hospos.db | 文档存储连接 URI (`memory` 为进程内存储) |
/// | HTTP_PORT (或 PORT) | 8080 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | STORE_TIMEOUT_MS | 5000 | 单次存储操作超时(毫秒) |
/// | STORE_BULK_TIMEOUT_MS | 30000 | 批量写入超时(毫秒) |
/// | HEARTBEAT_TIMEOUT_SECS | 90 | 超过该时间无心跳视为离线 |
/// | REQUIRE_LINKED_TILL | false | 写操作是否要求已绑定终端 |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 优雅关闭超时(毫秒) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_DIR | - | 日志文件目录 (按天滚动) |
///
/// # 示例
///
/// ```ignore
/// STORE_URI=memory HTTP_PORT=9000 cargo run -p pos-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 文档存储连接 URI
    pub store_uri: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 单次存储操作超时 (毫秒)
    pub store_timeout_ms: u64,
    /// 批量写入 (种子数据) 超时 (毫秒)
    pub store_bulk_timeout_ms: u64,
    /// 终端在线判定窗口 (秒)
    pub heartbeat_timeout_secs: u64,
    /// 预订/销售/支付写入是否要求 `x-till-id` 指向已绑定终端
    pub require_linked_till: bool,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
    /// 日志级别
    pub log_level: String,
    /// 是否输出 JSON 日志
    pub log_json: bool,
    /// 日志目录
    pub log_dir: Option<String>,
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self {
            store_uri: std::env::var("STORE_URI")
                .unwrap_or_else(|_| "rocksdb://data/hospos.db".into()),
            http_port: env_parse("HTTP_PORT")
                .or_else(|| env_parse("PORT"))
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            store_timeout_ms: env_parse("STORE_TIMEOUT_MS").unwrap_or(5000),
            store_bulk_timeout_ms: env_parse("STORE_BULK_TIMEOUT_MS").unwrap_or(30000),
            heartbeat_timeout_secs: env_parse("HEARTBEAT_TIMEOUT_SECS").unwrap_or(90),
            require_linked_till: env_parse("REQUIRE_LINKED_TILL").unwrap_or(false),
            shutdown_timeout_ms: env_parse("SHUTDOWN_TIMEOUT_MS").unwrap_or(10000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: env_parse("LOG_JSON").unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(store_uri: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.store_uri = store_uri.into();
        config.http_port = http_port;
        config
    }

    /// 测试配置: 内存存储、开发环境、不要求终端绑定
    pub fn for_tests() -> Self {
        Self {
            store_uri: crate::db::MEMORY_URI.into(),
            http_port: 0,
            environment: "development".into(),
            store_timeout_ms: 5000,
            store_bulk_timeout_ms: 30000,
            heartbeat_timeout_secs: 90,
            require_linked_till: false,
            shutdown_timeout_ms: 1000,
            log_level: "debug".into(),
            log_json: false,
            log_dir: None,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_tests_is_isolated_from_env() {
        let config = Config::for_tests();
        assert_eq!(config.store_uri, "memory");
        assert!(config.is_development());
        assert!(!config.is_production());
        assert!(!config.require_linked_till);
    }
}
