use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Parses the timestamp shapes the pricing backend emits.
///
/// Accepts RFC 3339, naive ISO date-times (with or without seconds and
/// fractions, treated as UTC) and bare dates (midnight UTC).
pub fn parse_flexible(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = s.strip_suffix('Z').unwrap_or(s);
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(DateTime::from_naive_utc_and_offset(dt, Utc));
        }
    }

    NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
}

/// Formats a timestamp the way the dashboard tables show dates.
pub fn display_date(dt: &DateTime<Utc>) -> String {
    dt.format("%d.%m.%Y").to_string()
}

/// Serde adapter for optional `updated_at` style fields.
pub mod optional {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => parse_flexible(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("Failed to parse datetime '{s}'"))),
        }
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_backend_timestamp_shapes() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();

        assert_eq!(parse_flexible("2025-03-14T09:30:00Z"), Some(expected));
        assert_eq!(parse_flexible("2025-03-14T09:30:00"), Some(expected));
        assert_eq!(parse_flexible("2025-03-14T09:30:00.000000"), Some(expected));
        assert_eq!(parse_flexible("2025-03-14 09:30:00"), Some(expected));
        assert_eq!(parse_flexible("2025-03-14T09:30"), Some(expected));
    }

    #[test]
    fn bare_date_is_midnight() {
        assert_eq!(
            parse_flexible("2025-03-14"),
            Some(Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse_flexible("yesterday"), None);
    }
}
