use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const INVALID_LABEL: &str = "Invalid Date";
const DAY_MILLIS: i64 = 86_400_000;
const NAIVE_DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A schedule instant as handed over by the surrounding application.
///
/// Strings that fail to parse do not produce an error; they become
/// [`Timestamp::Invalid`]. Every ordering query involving an invalid value
/// answers `false`, so such values can never win a critical-path selection
/// or turn a task into a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timestamp {
    Valid(DateTime<Utc>),
    Invalid,
}

impl Timestamp {
    /// Accepts RFC 3339, `YYYY-MM-DD[T| ]HH:MM[:SS[.fff]]` (read as UTC) and
    /// `YYYY-MM-DD`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Self::Valid(dt.with_timezone(&Utc));
        }
        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Self::Valid(naive.and_utc());
            }
        }
        match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Self::from(date),
            Err(_) => Self::Invalid,
        }
    }

    /// Midnight UTC of the given calendar day, or `Invalid` for an impossible date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Self {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self::from)
            .unwrap_or(Self::Invalid)
    }

    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Valid(dt) => Some(*dt),
            Self::Invalid => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn is_later_than(&self, other: &Timestamp) -> bool {
        match (self, other) {
            (Self::Valid(a), Self::Valid(b)) => a > b,
            _ => false,
        }
    }

    pub fn is_earlier_than(&self, other: &Timestamp) -> bool {
        other.is_later_than(self)
    }

    /// True only when both sides are valid and denote the same instant.
    pub fn same_instant(&self, other: &Timestamp) -> bool {
        match (self, other) {
            (Self::Valid(a), Self::Valid(b)) => a == b,
            _ => false,
        }
    }

    /// Whole calendar days from `self` to `end`, partial days rounded up.
    ///
    /// Returns `Some(0)` when `end` is not after `self` and `None` when either
    /// side is invalid.
    pub fn whole_days_until(&self, end: &Timestamp) -> Option<i64> {
        let (start, end) = (self.instant()?, end.instant()?);
        Some(whole_days(end - start).max(0))
    }
}

/// Signed whole days in `delta`, partial days rounded away from zero.
pub(crate) fn whole_days(delta: TimeDelta) -> i64 {
    let millis = delta.num_milliseconds();
    let days = millis / DAY_MILLIS;
    if millis % DAY_MILLIS == 0 {
        days
    } else {
        days + millis.signum()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Valid(value)
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(value: NaiveDate) -> Self {
        value
            .and_hms_opt(0, 0, 0)
            .map(|naive| Self::Valid(naive.and_utc()))
            .unwrap_or(Self::Invalid)
    }
}

impl From<&str> for Timestamp {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Self::Invalid => f.write_str(INVALID_LABEL),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}
