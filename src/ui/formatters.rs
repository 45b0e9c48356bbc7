/// Rate suffixes, one step per factor of 1000.
const RATE_SUFFIXES: [&str; 5] = ["", "k", "m", "g", "t"];
const RATE_STEP: f64 = 1000.0;

/// Format a bit rate with a human-scale suffix (k, m, g, t) and one decimal.
///
/// Values at or above 1000 roll over to the next suffix; the scale stops at `t`.
pub fn format_bit_rate(bits_per_sec: f64) -> String {
    let mut value = bits_per_sec.max(0.0);
    let mut idx = 0;

    while value >= RATE_STEP && idx < RATE_SUFFIXES.len() - 1 {
        value /= RATE_STEP;
        idx += 1;
    }

    format!("{:.1}{}", value, RATE_SUFFIXES[idx])
}

/// Format a byte rate as bits per second (bytes are multiplied by 8 first).
pub fn format_byte_rate(bytes_per_sec: u64) -> String {
    format_bit_rate(bytes_per_sec as f64 * 8.0)
}

/// Format a number of minutes as zero-padded `HH:MM`
pub fn format_hours_minutes(total_minutes: u64) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    format!("{:02}:{:02}", hours, minutes)
}
