//! Lenient date/time (de)serialization for store records
//!
//! All times in this workspace are naive local time; no timezone
//! conversion anywhere. The external document store renders datetimes in
//! several shapes (`2026-08-31 18:00:00.000Z`, `2026-08-31T18:00:00`,
//! date-only `2026-08-31`), so the deserializers here accept all of them
//! and every caller shares one interpretation.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Parse a datetime string in any of the store's renditions.
///
/// Accepts `YYYY-MM-DD HH:MM:SS[.fff][Z]`, the `T`-separated variant, and
/// a bare `YYYY-MM-DD` (midnight). Trailing `Z`/`UTC` markers are ignored;
/// the value is treated as local wall-clock time.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim().trim_end_matches("UTC").trim_end_matches('Z').trim();
    for fmt in [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    parse_date(s).map(|d| d.and_time(NaiveTime::MIN))
}

/// Parse a calendar day, tolerating a trailing time component.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    let day = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Canonical store rendition of a datetime.
pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// Parse `HH:MM` (24h) into minutes since midnight.
pub fn to_minutes_opt(hhmm: &str) -> Option<i32> {
    let (h, m) = hhmm.trim().split_once(':')?;
    let h: i32 = h.parse().ok()?;
    let m: i32 = m.parse().ok()?;
    if !(0..24).contains(&h) || !(0..60).contains(&m) {
        return None;
    }
    Some(h * 60 + m)
}

/// Serde adapter for required [`NaiveDateTime`] fields.
pub mod naive_dt {
    use super::*;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format_datetime(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse_datetime(&raw).ok_or_else(|| Error::custom(format!("invalid datetime: {raw}")))
    }
}

/// Serde adapter for optional [`NaiveDateTime`] fields.
///
/// The store sends `""` for unset date fields; that maps to `None`.
pub mod naive_dt_opt {
    use super::*;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(
        dt: &Option<NaiveDateTime>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => s.serialize_some(&format_datetime(dt)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(s) => parse_datetime(s)
                .map(Some)
                .ok_or_else(|| Error::custom(format!("invalid datetime: {s}"))),
        }
    }
}

/// Serde adapter for calendar-day fields stored as strings.
pub mod day {
    use super::*;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(d: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&d.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        parse_date(&raw).ok_or_else(|| Error::custom(format!("invalid date: {raw}")))
    }
}
