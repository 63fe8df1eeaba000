/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as document identity.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: process-wide sequence (4096 values per ms)
///
/// Ids sort by creation time, which the store relies on for list ordering.
pub fn snowflake_id() -> i64 {
    use std::sync::atomic::{AtomicI64, Ordering};
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    static SEQUENCE: AtomicI64 = AtomicI64::new(0);

    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed) & 0xFFF; // 12 bits
    (ts << 12) | seq
}

/// Parse a path or payload identity.
///
/// Only plain positive decimal integers are accepted; signs, whitespace and
/// the legacy `table:id` form are rejected.
pub fn parse_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}

/// Add whole calendar months to a millisecond timestamp (UTC).
///
/// Day overflow clamps to the last day of the target month (Jan 31 + 1 month = Feb 28/29).
pub fn add_months_millis(millis: i64, months: u32) -> Option<i64> {
    use chrono::{DateTime, Months};
    DateTime::from_timestamp_millis(millis)?
        .checked_add_months(Months::new(months))
        .map(|dt| dt.timestamp_millis())
}
