//! The resolved interval and the configuration that shapes it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, SecondsFormat, TimeZone, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimeRangeError};
use crate::locale::{LocalePack, MonthRegistry};

/// Which day begins a week for `thisweek`, `lastweek` and `week <n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum WeekStart {
    /// US/Canada convention.
    Sunday,
    #[default]
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// How many days `weekday` is past the start of its week.
    pub(crate) fn days_since(self, weekday: Weekday) -> u32 {
        match self {
            WeekStart::Monday => weekday.num_days_from_monday(),
            WeekStart::Sunday => weekday.num_days_from_sunday(),
        }
    }
}

impl FromStr for WeekStart {
    type Err = TimeRangeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "monday" => Ok(WeekStart::Monday),
            "sunday" => Ok(WeekStart::Sunday),
            _ => Err(TimeRangeError::InvalidWeekStart(s.to_string())),
        }
    }
}

impl TryFrom<String> for WeekStart {
    type Error = TimeRangeError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekStart::Sunday => f.write_str("sunday"),
            WeekStart::Monday => f.write_str("monday"),
        }
    }
}

/// Caller-supplied settings for a [`crate::TimeRangeParser`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub week_start: WeekStart,
    /// Locale pack codes, applied in order. Later packs win on collisions.
    pub locales: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            week_start: WeekStart::Monday,
            locales: vec!["en".to_string(), "de".to_string()],
        }
    }
}

impl Config {
    pub fn with_week_start(week_start: WeekStart) -> Self {
        Self {
            week_start,
            ..Self::default()
        }
    }

    /// Assemble the month registry from `locales`, in list order.
    ///
    /// # Errors
    ///
    /// Returns [`TimeRangeError::UnknownLocale`] for a code with no built-in pack.
    pub fn registry(&self) -> Result<MonthRegistry> {
        let packs = self
            .locales
            .iter()
            .map(|code| LocalePack::by_code(code))
            .collect::<Result<Vec<_>>>()?;
        Ok(MonthRegistry::from_packs(&packs))
    }
}

/// A closed interval `[from, to]` of instants. `from <= to` always holds.
#[derive(Debug, Clone)]
pub struct TimeRange<Tz: TimeZone = Local> {
    from: DateTime<Tz>,
    to: DateTime<Tz>,
}

// Instant equality, independent of whether `Tz` itself is comparable.
impl<Tz: TimeZone> PartialEq for TimeRange<Tz> {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl<Tz: TimeZone> Eq for TimeRange<Tz> {}

impl<Tz: TimeZone> TimeRange<Tz> {
    /// Returns `None` when `from` is after `to`.
    pub(crate) fn new(from: DateTime<Tz>, to: DateTime<Tz>) -> Option<Self> {
        (from <= to).then_some(Self { from, to })
    }

    pub fn from(&self) -> &DateTime<Tz> {
        &self.from
    }

    pub fn to(&self) -> &DateTime<Tz> {
        &self.to
    }

    /// Whether `instant` lies within the range, both ends inclusive.
    pub fn contains<Tz2: TimeZone>(&self, instant: &DateTime<Tz2>) -> bool {
        self.from <= *instant && *instant <= self.to
    }

    /// Number of calendar days the range touches.
    pub fn days(&self) -> i64 {
        (self.to.date_naive() - self.from.date_naive()).num_days() + 1
    }
}

impl<Tz: TimeZone> TimeRange<Tz>
where
    Tz::Offset: fmt::Display,
{
    /// Human-readable bounds, e.g. `"01 Oct 2025 - 31 Oct 2025"`.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.from.format("%d %b %Y"),
            self.to.format("%d %b %Y")
        )
    }

    /// Serializable rendering of the range for reports.
    pub fn summary(&self, spec: &str) -> RangeSummary {
        RangeSummary {
            spec: spec.to_string(),
            from: self.from.to_rfc3339_opts(SecondsFormat::Nanos, false),
            to: self.to.to_rfc3339_opts(SecondsFormat::Nanos, false),
            from_date: self.from.format("%Y-%m-%d").to_string(),
            to_date: self.to.format("%Y-%m-%d").to_string(),
            label: self.label(),
            days: self.days(),
        }
    }
}

/// A [`TimeRange`] rendered in both machine and human formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeSummary {
    /// The spec the range was resolved from.
    pub spec: String,
    /// Start instant (RFC 3339, nanosecond precision).
    pub from: String,
    /// End instant (RFC 3339, nanosecond precision).
    pub to: String,
    /// Start date (`YYYY-MM-DD`).
    pub from_date: String,
    /// End date (`YYYY-MM-DD`).
    pub to_date: String,
    /// e.g. `"01 Oct 2025 - 31 Oct 2025"`.
    pub label: String,
    pub days: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike, Utc};

    fn utc(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_week_start_from_str_case_insensitive() {
        assert_eq!("Monday".parse::<WeekStart>().unwrap(), WeekStart::Monday);
        assert_eq!(" SUNDAY ".parse::<WeekStart>().unwrap(), WeekStart::Sunday);
    }

    #[test]
    fn test_week_start_from_str_rejects_other_days() {
        let err = "tuesday".parse::<WeekStart>().unwrap_err();
        assert_eq!(err, TimeRangeError::InvalidWeekStart("tuesday".to_string()));
        assert!(err.to_string().contains("must be 'monday' or 'sunday'"));
    }

    #[test]
    fn test_week_start_weekday_and_display() {
        assert_eq!(WeekStart::Monday.weekday(), Weekday::Mon);
        assert_eq!(WeekStart::Sunday.weekday(), Weekday::Sun);
        assert_eq!(WeekStart::Sunday.to_string(), "sunday");
        assert_eq!(WeekStart::default(), WeekStart::Monday);
    }

    #[test]
    fn test_days_since_week_start() {
        assert_eq!(WeekStart::Monday.days_since(Weekday::Mon), 0);
        assert_eq!(WeekStart::Monday.days_since(Weekday::Sun), 6);
        assert_eq!(WeekStart::Sunday.days_since(Weekday::Sun), 0);
        assert_eq!(WeekStart::Sunday.days_since(Weekday::Sat), 6);
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: Config = serde_json::from_str(r#"{"week_start": "Sunday"}"#).unwrap();
        assert_eq!(config.week_start, WeekStart::Sunday);
        assert_eq!(config.locales, vec!["en", "de"]);
    }

    #[test]
    fn test_config_rejects_invalid_week_start() {
        let result: std::result::Result<Config, _> =
            serde_json::from_str(r#"{"week_start": "friday"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_registry_follows_locale_order() {
        let config = Config {
            week_start: WeekStart::Monday,
            locales: vec!["de".to_string(), "fr".to_string()],
        };
        let registry = config.registry().unwrap();
        assert_eq!(registry.packs(), &["de", "fr"]);
        assert_eq!(registry.lookup("juillet"), Some(7));
        assert_eq!(registry.lookup("october"), None);
    }

    #[test]
    fn test_config_registry_unknown_locale() {
        let config = Config {
            week_start: WeekStart::Monday,
            locales: vec!["en".to_string(), "klingon".to_string()],
        };
        assert_eq!(
            config.registry().unwrap_err(),
            TimeRangeError::UnknownLocale("klingon".to_string())
        );
    }

    #[test]
    fn test_time_range_rejects_inverted_bounds() {
        assert!(TimeRange::new(utc(2025, 1, 2, 0, 0, 0), utc(2025, 1, 1, 0, 0, 0)).is_none());
        assert!(TimeRange::new(utc(2025, 1, 1, 0, 0, 0), utc(2025, 1, 1, 0, 0, 0)).is_some());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = TimeRange::new(utc(2025, 6, 1, 0, 0, 0), utc(2025, 6, 30, 0, 0, 0)).unwrap();
        assert!(range.contains(&utc(2025, 6, 1, 0, 0, 0)));
        assert!(range.contains(&utc(2025, 6, 30, 0, 0, 0)));
        assert!(range.contains(&utc(2025, 6, 15, 12, 0, 0)));
        assert!(!range.contains(&utc(2025, 7, 1, 0, 0, 0)));
    }

    #[test]
    fn test_contains_across_timezones() {
        let range = TimeRange::new(utc(2025, 6, 1, 0, 0, 0), utc(2025, 6, 1, 23, 0, 0)).unwrap();
        // 01:30 on June 2 in UTC+2 is 23:30 UTC on June 1.
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let instant = tz.with_ymd_and_hms(2025, 6, 2, 0, 30, 0).unwrap();
        assert!(range.contains(&instant));
        let later = tz.with_ymd_and_hms(2025, 6, 2, 1, 30, 0).unwrap();
        assert!(!range.contains(&later));
    }

    #[test]
    fn test_days_counts_touched_calendar_days() {
        let range = TimeRange::new(utc(2025, 6, 1, 0, 0, 0), utc(2025, 6, 7, 23, 59, 59)).unwrap();
        assert_eq!(range.days(), 7);
        let single = TimeRange::new(utc(2025, 6, 1, 0, 0, 0), utc(2025, 6, 1, 1, 0, 0)).unwrap();
        assert_eq!(single.days(), 1);
    }

    #[test]
    fn test_label_and_summary() {
        let from = utc(2025, 10, 1, 0, 0, 0);
        let to = utc(2025, 10, 31, 23, 59, 59)
            .with_nanosecond(999_999_999)
            .unwrap();
        let range = TimeRange::new(from, to).unwrap();
        assert_eq!(range.label(), "01 Oct 2025 - 31 Oct 2025");

        let summary = range.summary("october 2025");
        assert_eq!(summary.spec, "october 2025");
        assert_eq!(summary.from_date, "2025-10-01");
        assert_eq!(summary.to_date, "2025-10-31");
        assert_eq!(summary.from, "2025-10-01T00:00:00.000000000+00:00");
        assert_eq!(summary.to, "2025-10-31T23:59:59.999999999+00:00");
        assert_eq!(summary.days, 31);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["label"], "01 Oct 2025 - 31 Oct 2025");
        assert_eq!(json["days"], 31);
    }
}
