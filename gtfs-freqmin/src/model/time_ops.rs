//! GTFS times are stored as seconds since midnight of the service day. values
//! may exceed 24 hours for trips that run past midnight.

pub const SECONDS_PER_HOUR: u32 = 3600;
pub const SECONDS_PER_MINUTE: u32 = 60;

/// formats seconds since midnight as `HH:MM:SS`. hours are not wrapped.
pub fn format_gtfs_time(seconds: u32) -> String {
    let hours = seconds / SECONDS_PER_HOUR;
    let minutes = (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let secs = seconds % SECONDS_PER_MINUTE;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// parses `H:MM:SS` or `HH:MM:SS` into seconds since midnight. reading
/// feeds goes through gtfs-structures, this only checks written output.
#[cfg(test)]
pub fn parse_gtfs_time(value: &str) -> Option<u32> {
    let parts = value
        .trim()
        .split(':')
        .map(|p| p.parse::<u32>().ok())
        .collect::<Option<Vec<_>>>()?;
    match parts[..] {
        [h, m, s] if m < 60 && s < 60 => h
            .checked_mul(SECONDS_PER_HOUR)
            .and_then(|hs| hs.checked_add(m * SECONDS_PER_MINUTE + s)),
        _ => None,
    }
}
