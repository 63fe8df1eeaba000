//! 请求日志中间件
//!
//! 每个请求在 `http_request` span 中处理，span 携带请求 ID、方法、路由和终端 ID；
//! 请求结束时在该 span 内记录一条完成日志。

use axum::{
    extract::{MatchedPath, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{Instrument, debug, info, info_span, warn};

use super::TILL_ID_HEADER;

/// 请求结果分类，决定完成日志的级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Ok,
    ClientError,
    ServerError,
}

impl Outcome {
    fn of(status: StatusCode) -> Self {
        if status.is_server_error() {
            Self::ServerError
        } else if status.is_client_error() {
            Self::ClientError
        } else {
            Self::Ok
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::ClientError => "client_error",
            Self::ServerError => "server_error",
        }
    }
}

fn header_str<'a>(req: &'a Request, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

/// 请求日志中间件
///
/// 4xx/5xx 以 `warn` 记录，其余以 `info` 记录。
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    // SetRequestIdLayer 在外层，正常情况下一定存在
    let request_id = header_str(&req, "x-request-id")
        .map(str::to_owned)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let till = header_str(&req, TILL_ID_HEADER).map(str::to_owned);
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| req.uri().path().to_owned(), |p| p.as_str().to_owned());

    let span = info_span!(
        "http_request",
        request_id = %request_id,
        method = %req.method(),
        path = %path,
        till = ?till,
    );

    async move {
        debug!("Request started");
        let response = next.run(req).await;

        let status = response.status().as_u16();
        let latency_ms = start.elapsed().as_millis() as u64;
        let outcome = Outcome::of(response.status());
        match outcome {
            Outcome::Ok => info!(status, latency_ms, "Request completed"),
            Outcome::ClientError | Outcome::ServerError => {
                warn!(status, latency_ms, outcome = outcome.as_str(), "Request completed")
            }
        }
        response
    }
    .instrument(span)
    .await
}
