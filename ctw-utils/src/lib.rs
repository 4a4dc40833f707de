//! Shared utility functions for CTW crates.

/// Date and timestamp helpers used for exports and display.
pub mod dates {
    use chrono::{DateTime, Utc};

    /// Format a timestamp the way exported files carry it:
    /// RFC 3339 with millisecond precision and a `Z` suffix,
    /// e.g. "2024-03-05T14:07:09.250Z".
    pub fn export_timestamp(at: &DateTime<Utc>) -> String {
        at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
    }

    /// Format the calendar date part of a timestamp as "YYYY-MM-DD".
    pub fn date_suffix(at: &DateTime<Utc>) -> String {
        at.format("%Y-%m-%d").to_string()
    }

    /// Milliseconds since the Unix epoch.
    pub fn epoch_millis(at: &DateTime<Utc>) -> i64 {
        at.timestamp_millis()
    }

    /// Wall-clock time of day shown next to live alerts ("14:07:09").
    pub fn time_of_day(at: &DateTime<Utc>) -> String {
        at.format("%H:%M:%S").to_string()
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::TimeZone;

        fn sample() -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap()
                + chrono::Duration::milliseconds(250)
        }

        #[test]
        fn test_export_timestamp() {
            assert_eq!(export_timestamp(&sample()), "2024-03-05T14:07:09.250Z");
        }

        #[test]
        fn test_date_suffix_and_millis() {
            let at = sample();
            assert_eq!(date_suffix(&at), "2024-03-05");
            assert_eq!(epoch_millis(&at), 1_709_647_629_250);
            assert_eq!(time_of_day(&at), "14:07:09");
        }
    }
}

/// Numeric rounding and display formatting.
pub mod numbers {
    /// Round half up (toward positive infinity), the rounding used by
    /// browser dashboards: `2.5 -> 3`, `-2.5 -> -2`.
    pub fn round_half_up(value: f64) -> f64 {
        (value + 0.5).floor()
    }

    /// Round to one decimal place.
    pub fn round1(value: f64) -> f64 {
        round_half_up(value * 10.0) / 10.0
    }

    /// Format an integer with comma thousands separators ("2,842").
    pub fn format_thousands(value: i64) -> String {
        let digits = value.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if value < 0 {
            out.push('-');
        }
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_round_half_up() {
            assert_eq!(round_half_up(30.5), 31.0);
            assert_eq!(round_half_up(30.49), 30.0);
            assert_eq!(round_half_up(-2.5), -2.0);
        }

        #[test]
        fn test_round1() {
            assert_eq!(round1(2.431), 2.4);
            assert_eq!(round1(0.0), 0.0);
            assert_eq!(round1(12.96), 13.0);
        }

        #[test]
        fn test_format_thousands() {
            assert_eq!(format_thousands(0), "0");
            assert_eq!(format_thousands(642), "642");
            assert_eq!(format_thousands(2842), "2,842");
            assert_eq!(format_thousands(1234567), "1,234,567");
            assert_eq!(format_thousands(-1500), "-1,500");
        }
    }
}

/// Text helpers for export file names.
pub mod text {
    /// Lowercase a title and collapse each whitespace run into a single
    /// hyphen ("Monthly Emission Report" -> "monthly-emission-report").
    pub fn slugify(title: &str) -> String {
        title
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    }

    #[cfg(test)]
    mod tests {
        use super::slugify;

        #[test]
        fn test_slugify() {
            assert_eq!(slugify("Monthly Emission Report"), "monthly-emission-report");
            assert_eq!(slugify("Zone  Analysis\tQ3"), "zone-analysis-q3");
            assert_eq!(slugify(""), "");
        }
    }
}
