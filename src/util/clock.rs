//! Wall-clock access for token expiry checks.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

/// Seconds since the Unix epoch.
#[must_use]
pub fn now_unix_secs() -> i64 {
    #[cfg(feature = "csr")]
    {
        millis_to_secs(js_sys::Date::now())
    }
    #[cfg(not(feature = "csr"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
    }
}

#[allow(clippy::cast_possible_truncation)]
#[cfg_attr(not(feature = "csr"), allow(dead_code))]
fn millis_to_secs(millis: f64) -> i64 {
    (millis / 1000.0).floor() as i64
}
