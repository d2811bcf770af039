use std::time::{Duration, SystemTime};

/// Formats how long ago a notification was raised, e.g. `just now`, `42s ago`,
/// `3m ago` or `2h ago`.
pub fn format_age(created_at: SystemTime, now: SystemTime) -> String {
    let age = now.duration_since(created_at).unwrap_or(Duration::ZERO);
    let seconds = age.as_secs();

    if seconds < 5 {
        "just now".to_owned()
    } else if seconds < 60 {
        format!("{seconds}s ago")
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else {
        format!("{}h ago", seconds / 3600)
    }
}

/// Formats a percentage for the progress labels, always three columns wide so
/// the label does not jitter while the value grows.
pub fn format_percent(value: u8) -> String {
    format!("{:>3}%", value.min(100))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ages_are_bucketed() {
        let now = SystemTime::now();
        let ago = |seconds| now - Duration::from_secs(seconds);

        assert_eq!(format_age(ago(2), now), "just now");
        assert_eq!(format_age(ago(42), now), "42s ago");
        assert_eq!(format_age(ago(185), now), "3m ago");
        assert_eq!(format_age(ago(7300), now), "2h ago");
    }

    #[test]
    fn future_timestamps_read_as_just_now() {
        let now = SystemTime::now();
        assert_eq!(format_age(now + Duration::from_secs(30), now), "just now");
    }

    #[test]
    fn percent_is_padded_and_clamped() {
        assert_eq!(format_percent(7), "  7%");
        assert_eq!(format_percent(100), "100%");
        assert_eq!(format_percent(250), "100%");
    }
}
