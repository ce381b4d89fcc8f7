use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime};

const SIZE_BACKUPS: u32 = 5;
const TIME_BACKUPS: u32 = 7;
const DEFAULT_MAX_BYTES: u64 = 1_000_000;

/// A rotation spec as supplied by the caller: either a raw byte count or a
/// human-readable string such as `"100 MB"`, `"2 weeks"` or `"12:00"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RotationSpec {
    /// Maximum file size in bytes.
    Bytes(u64),
    /// Human-readable rotation description.
    Text(String),
}

impl From<u64> for RotationSpec {
    fn from(bytes: u64) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&str> for RotationSpec {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for RotationSpec {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Calendar unit for time-based rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    /// Rotate every `interval` hours.
    Hour,
    /// Rotate every `interval` days.
    Day,
    /// Rotate every `interval` weeks, aligned to Monday.
    Week,
    /// Rotate once a day at midnight.
    Midnight,
}

/// Normalized rotation policy for a file handler.
///
/// Produced by [`RotationPolicy::parse`], which accepts anything and never
/// fails: a spec that cannot be understood falls back to daily rotation at
/// midnight rather than surfacing an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotationPolicy {
    /// Rotate when the file would exceed `max_bytes`, keeping numbered
    /// backups `.1` through `.backups`.
    Size {
        /// Maximum file size in bytes before rotation.
        max_bytes: u64,
        /// Number of rotated files to keep.
        backups: u32,
    },
    /// Rotate when the current period ends, keeping the `backups` most
    /// recent period files.
    Time {
        /// Calendar unit of the rotation period.
        unit: TimeUnit,
        /// Period length in units.
        interval: u32,
        /// Number of old period files to keep.
        backups: u32,
    },
}

impl RotationPolicy {
    /// Create a size-based policy.
    pub fn size(max_bytes: u64, backups: u32) -> Self {
        Self::Size { max_bytes, backups }
    }

    /// Create a time-based policy.
    pub fn time(unit: TimeUnit, interval: u32, backups: u32) -> Self {
        Self::Time {
            unit,
            interval,
            backups,
        }
    }

    /// Parse an optional rotation spec into a policy. Total: every input maps
    /// to some policy.
    ///
    /// | Input | Result |
    /// |---|---|
    /// | absent | size, 1 MB, 5 backups |
    /// | byte count `n` | size, `n` bytes, 5 backups |
    /// | `"<n> KB/MB/GB"` | size, scaled, 5 backups |
    /// | `"<n> hour(s)/day(s)/week(s)"` | time, `n` units, 7 backups |
    /// | `"HH:MM"` | midnight, 7 backups |
    /// | anything else | midnight, 7 backups |
    ///
    /// Unit matching is case-insensitive and tolerates a trailing `s`;
    /// surrounding whitespace is ignored.
    pub fn parse(spec: Option<&RotationSpec>) -> Self {
        match spec {
            None => Self::Size {
                max_bytes: DEFAULT_MAX_BYTES,
                backups: SIZE_BACKUPS,
            },
            Some(RotationSpec::Bytes(n)) => Self::Size {
                max_bytes: *n,
                backups: SIZE_BACKUPS,
            },
            Some(RotationSpec::Text(s)) => Self::parse_text(s),
        }
    }

    fn parse_text(spec: &str) -> Self {
        let spec = spec.trim();
        Self::parse_scaled(spec)
            .or_else(|| Self::parse_clock(spec))
            .unwrap_or(Self::Time {
                unit: TimeUnit::Midnight,
                interval: 1,
                backups: TIME_BACKUPS,
            })
    }

    /// `"<n> <unit>"` with a size or calendar unit, e.g. `"100 MB"` or
    /// `"2 weeks"`.
    fn parse_scaled(spec: &str) -> Option<Self> {
        let digits_end = spec.find(|c: char| !c.is_ascii_digit())?;
        if digits_end == 0 {
            return None;
        }
        let (number, rest) = spec.split_at(digits_end);

        let mut unit = rest.trim().to_ascii_lowercase();
        if unit.len() > 1 && unit.ends_with('s') {
            unit.pop();
        }

        let scale = match unit.as_str() {
            "kb" => Some(1024u64),
            "mb" => Some(1024 * 1024),
            "gb" => Some(1024 * 1024 * 1024),
            _ => None,
        };
        if let Some(scale) = scale {
            let n: u64 = number.parse().ok()?;
            return Some(Self::Size {
                max_bytes: n.saturating_mul(scale),
                backups: SIZE_BACKUPS,
            });
        }

        let time_unit = match unit.as_str() {
            "hour" => TimeUnit::Hour,
            "day" => TimeUnit::Day,
            "week" => TimeUnit::Week,
            _ => return None,
        };
        let interval: u32 = number.parse().ok()?;
        Some(Self::Time {
            unit: time_unit,
            interval,
            backups: TIME_BACKUPS,
        })
    }

    /// A wall-clock time of day (`"HH:MM"`, 24-hour). The original semantics
    /// collapse any clock time to daily rotation at midnight.
    fn parse_clock(spec: &str) -> Option<Self> {
        let (hours, minutes) = spec.split_once(':')?;
        if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
            return None;
        }
        let hour: u8 = hours.parse().ok()?;
        let minute: u8 = minutes.parse().ok()?;
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self::Time {
            unit: TimeUnit::Midnight,
            interval: 1,
            backups: TIME_BACKUPS,
        })
    }

    /// Number of rotated files to retain.
    pub fn backups(&self) -> u32 {
        match self {
            Self::Size { backups, .. } | Self::Time { backups, .. } => *backups,
        }
    }

    /// Suffix identifying the rotation period the current instant falls in.
    /// Empty for size-based policies, which keep a fixed file name.
    pub(crate) fn current_suffix(&self) -> String {
        self.suffix_at(OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()))
    }

    /// Suffix for the period `at` falls in. Instants in the same period map
    /// to the same suffix; crossing a period boundary changes it.
    pub(crate) fn suffix_at(&self, at: OffsetDateTime) -> String {
        let Self::Time { unit, interval, .. } = self else {
            return String::new();
        };
        let interval = (*interval).max(1) as i32;

        match unit {
            TimeUnit::Hour => {
                // Hour intervals align within the day.
                let aligned = at.hour() - at.hour() % (interval.min(24) as u8);
                let start = at.replace_hour(aligned).unwrap_or(at);
                start
                    .format(format_description!("[year]-[month]-[day]T[hour]"))
                    .unwrap_or_default()
            }
            TimeUnit::Day => {
                let jd = at.date().to_julian_day();
                let start = Date::from_julian_day(jd - jd.rem_euclid(interval))
                    .unwrap_or_else(|_| at.date());
                start
                    .format(format_description!("[year]-[month]-[day]"))
                    .unwrap_or_default()
            }
            TimeUnit::Week => {
                let monday =
                    at.date() - Duration::days(at.weekday().number_days_from_monday() as i64);
                let jd = monday.to_julian_day();
                let weeks = jd.div_euclid(7);
                let aligned = (weeks - weeks.rem_euclid(interval)) * 7 + jd.rem_euclid(7);
                let start = Date::from_julian_day(aligned).unwrap_or(monday);
                start
                    .format(format_description!("[year]-[month]-[day]"))
                    .unwrap_or_default()
            }
            TimeUnit::Midnight => at
                .date()
                .format(format_description!("[year]-[month]-[day]"))
                .unwrap_or_default(),
        }
    }
}
