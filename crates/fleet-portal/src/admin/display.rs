use chrono::{DateTime, Utc};

const MISSING: &str = "N/A";

/// `Oct 17, 2026`, or `N/A` when the backend sent no usable timestamp.
pub fn format_date(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|timestamp| timestamp.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

/// Experience column: zero and absent both render as `N/A`.
pub fn format_experience(years: Option<u32>) -> String {
    match years {
        Some(years) if years > 0 => format!("{years} years"),
        _ => MISSING.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn dates_use_short_month_names() {
        let timestamp = Utc.with_ymd_and_hms(2026, 10, 7, 15, 30, 0).single();
        assert_eq!(format_date(timestamp), "Oct 7, 2026");
        assert_eq!(format_date(None), "N/A");
    }

    #[test]
    fn experience_hides_zero_years() {
        assert_eq!(format_experience(Some(5)), "5 years");
        assert_eq!(format_experience(Some(0)), "N/A");
        assert_eq!(format_experience(None), "N/A");
    }
}
