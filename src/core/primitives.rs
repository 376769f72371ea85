use chrono::{DateTime, Utc};

/// Returns `value` when it can be divided by, otherwise `1.0`.
#[must_use]
pub fn safe_divisor(value: f64) -> f64 {
    if value.is_finite() && value != 0.0 {
        value
    } else {
        1.0
    }
}

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> i64 {
    time.timestamp_millis()
}

#[must_use]
pub fn unix_millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

#[must_use]
pub fn now_unix_millis() -> i64 {
    datetime_to_unix_millis(Utc::now())
}

/// Fresh identifier for charts and stats.
#[must_use]
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Parses a `#rrggbb` (or `#rgb`) color string into its byte channels.
#[must_use]
pub fn parse_hex_rgb(input: &str) -> Option<(u8, u8, u8)> {
    let digits = input.strip_prefix('#')?;
    if !digits.is_ascii() {
        return None;
    }
    let channel = |text: &str| u8::from_str_radix(text, 16).ok();
    match digits.len() {
        6 => Some((
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        3 => {
            let expand = |index: usize| channel(&digits[index..=index]).map(|v| v * 17);
            Some((expand(0)?, expand(1)?, expand(2)?))
        }
        _ => None,
    }
}
