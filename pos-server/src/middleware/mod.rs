//! 中间件模块
//!
//! - [`logging_middleware`] - 请求日志
//! - [`handle_panic`] - 请求级故障屏障 (配合 `CatchPanicLayer`)
//! - [`LinkedTill`] - 已绑定终端守卫 (提取器)

mod linked_till;
mod logging;
mod panic;

pub use linked_till::{LinkedTill, TILL_ID_HEADER};
pub use logging::logging_middleware;
pub use panic::handle_panic;
