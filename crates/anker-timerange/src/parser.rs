//! Resolution of time specifications into [`TimeRange`]s.
//!
//! A [`TimeRangeParser`] is bound to a fixed "now" and a [`Config`] at
//! construction and is stateless afterwards, so repeated calls give identical
//! results.
//!
//! # Supported Specifications
//!
//! Grammars are tried in this order; the first match wins:
//!
//! 1. **Keywords**: `"today"`, `"yesterday"`, `"thisweek"`, `"lastweek"`
//! 2. **Month and year**: `"october 2025"`, `"2025 oct"`, `"März 2025"` (any
//!    name in the [`MonthRegistry`])
//! 3. **Week number**: `"week 32"`, `"week 32 2024"` (week 1–53)
//! 4. **Date range**: `"2025-12-01..2025-12-31"`
//! 5. **Single date**: `"2025-12-02"`
//! 6. **Relative days**: `"last 7 days"`, `"last 1 day"`
//!
//! Input is trimmed and case-folded first. A grammar that does not match
//! (including an unknown month name or an impossible date) just hands over to
//! the next one; only when all of them decline is
//! [`TimeRangeError::UnsupportedSpec`] returned.
//!
//! ```
//! use anker_timerange::{Config, MonthRegistry, TimeRangeParser, WeekStart};
//! use chrono::{TimeZone, Utc};
//!
//! let registry = MonthRegistry::builtin();
//! let now = Utc.with_ymd_and_hms(2025, 6, 18, 14, 30, 0).unwrap();
//! let config = Config::with_week_start(WeekStart::Monday);
//! let parser = TimeRangeParser::with_now(now, config, &registry);
//!
//! let range = parser.parse("thisweek").unwrap();
//! assert_eq!(range.from().to_rfc3339(), "2025-06-16T00:00:00+00:00");
//! assert!(parser.parse("banana").is_err());
//! ```

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, TimeZone};
use regex::{Captures, Regex};
use tracing::{debug, trace};

use crate::calendar::{
    day_end, day_start, end_of_day, end_of_week, last_n_days, month_bounds, start_of_day,
    start_of_week, week_bounds, week_start_date,
};
use crate::error::{Result, TimeRangeError};
use crate::locale::MonthRegistry;
use crate::range::{Config, TimeRange};

/// Spec used when the caller supplies none.
pub const DEFAULT_SPEC: &str = "today";

// Month tokens use `\p{L}` so names like "märz" or "août" match. Digits are
// ASCII only.
static MONTH_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\p{L}+)\s+([0-9]{4})$").expect("valid regex"));
static YEAR_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})\s+(\p{L}+)$").expect("valid regex"));
static WEEK_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^week\s+([0-9]+)(?:\s+([0-9]{4}))?$").expect("valid regex"));
static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("valid regex"));
static RELATIVE_DAYS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^last\s+([0-9]+)\s+days?$").expect("valid regex"));

/// A grammar either produces a range or declines.
type Grammar<P, Tz> = fn(&P, &str) -> Option<TimeRange<Tz>>;

/// Resolves time specifications relative to a fixed anchor.
#[derive(Debug, Clone)]
pub struct TimeRangeParser<'r, Tz: TimeZone = Local> {
    now: DateTime<Tz>,
    config: Config,
    registry: &'r MonthRegistry,
}

impl<'r> TimeRangeParser<'r, Local> {
    /// A parser anchored at the current local time.
    pub fn new(config: Config, registry: &'r MonthRegistry) -> Self {
        Self::with_now(Local::now(), config, registry)
    }
}

impl<'r, Tz: TimeZone> TimeRangeParser<'r, Tz> {
    const GRAMMARS: [(&'static str, Grammar<Self, Tz>); 6] = [
        ("keyword", Self::try_keyword),
        ("month_year", Self::try_month_year),
        ("week_number", Self::try_week_number),
        ("date_range", Self::try_date_range),
        ("single_date", Self::try_single_date),
        ("relative_days", Self::try_relative_days),
    ];

    /// A parser anchored at `now`. Results are expressed in `now`'s timezone.
    pub fn with_now(now: DateTime<Tz>, config: Config, registry: &'r MonthRegistry) -> Self {
        Self {
            now,
            config,
            registry,
        }
    }

    pub fn now(&self) -> &DateTime<Tz> {
        &self.now
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve `spec` into a closed time range.
    ///
    /// # Errors
    ///
    /// Returns [`TimeRangeError::UnsupportedSpec`] carrying `spec` unchanged if
    /// no grammar accepts it.
    pub fn parse(&self, spec: &str) -> Result<TimeRange<Tz>> {
        let normalized = spec.trim().to_lowercase();

        for (name, grammar) in Self::GRAMMARS {
            if let Some(range) = grammar(self, &normalized) {
                debug!(grammar = name, spec = %normalized, "resolved time specification");
                return Ok(range);
            }
            trace!(grammar = name, spec = %normalized, "grammar declined");
        }

        Err(TimeRangeError::UnsupportedSpec(spec.to_string()))
    }

    /// Like [`parse`](Self::parse), falling back to [`DEFAULT_SPEC`] when `spec` is `None`.
    pub fn parse_or_today(&self, spec: Option<&str>) -> Result<TimeRange<Tz>> {
        self.parse(spec.unwrap_or(DEFAULT_SPEC))
    }

    fn tz(&self) -> Tz {
        self.now.timezone()
    }

    fn day(&self, date: NaiveDate) -> Option<TimeRange<Tz>> {
        let tz = self.tz();
        TimeRange::new(day_start(&tz, date), day_end(&tz, date))
    }

    // ── grammars ────────────────────────────────────────────────────────

    fn try_keyword(&self, spec: &str) -> Option<TimeRange<Tz>> {
        let ws = self.config.week_start;
        match spec {
            "today" => TimeRange::new(start_of_day(&self.now), end_of_day(&self.now)),
            "yesterday" => self.day(self.now.date_naive().pred_opt()?),
            "thisweek" => {
                TimeRange::new(start_of_week(&self.now, ws)?, end_of_week(&self.now, ws)?)
            }
            "lastweek" => {
                let tz = self.tz();
                let week_ago = self.now.date_naive().checked_sub_days(Days::new(7))?;
                let first = week_start_date(week_ago, ws)?;
                let last = first.checked_add_days(Days::new(6))?;
                TimeRange::new(day_start(&tz, first), day_end(&tz, last))
            }
            _ => None,
        }
    }

    /// `"<month> <year>"` or `"<year> <month>"`.
    fn try_month_year(&self, spec: &str) -> Option<TimeRange<Tz>> {
        let (name, year) = if let Some(caps) = MONTH_YEAR.captures(spec) {
            (capture(&caps, 1)?, capture(&caps, 2)?)
        } else {
            let caps = YEAR_MONTH.captures(spec)?;
            (capture(&caps, 2)?, capture(&caps, 1)?)
        };

        let month = self.registry.lookup(name)?;
        let year: i32 = year.parse().ok()?;
        let (from, to) = month_bounds(&self.tz(), year, month)?;
        TimeRange::new(from, to)
    }

    /// `"week <n>"` or `"week <n> <year>"`; the year defaults to now's year.
    fn try_week_number(&self, spec: &str) -> Option<TimeRange<Tz>> {
        let caps = WEEK_NUMBER.captures(spec)?;
        let week: u32 = capture(&caps, 1)?.parse().ok()?;
        let year: i32 = match caps.get(2) {
            Some(year) => year.as_str().parse().ok()?,
            None => self.now.year(),
        };

        let (from, to) = week_bounds(&self.tz(), year, week, self.config.week_start)?;
        TimeRange::new(from, to)
    }

    /// `"<date>..<date>"`. A third dot leaves a stray `.` on the second date,
    /// which then fails to parse.
    fn try_date_range(&self, spec: &str) -> Option<TimeRange<Tz>> {
        let (first, second) = spec.split_once("..")?;
        let from = parse_iso_date(first.trim())?;
        let to = parse_iso_date(second.trim())?;

        let tz = self.tz();
        TimeRange::new(day_start(&tz, from), day_end(&tz, to))
    }

    fn try_single_date(&self, spec: &str) -> Option<TimeRange<Tz>> {
        self.day(parse_iso_date(spec)?)
    }

    /// `"last <n> day(s)"`, ending today. `"last 1 day"` equals `"today"`.
    fn try_relative_days(&self, spec: &str) -> Option<TimeRange<Tz>> {
        let caps = RELATIVE_DAYS.captures(spec)?;
        let days: u32 = capture(&caps, 1)?.parse().ok()?;
        let (from, to) = last_n_days(&self.now, days)?;
        TimeRange::new(from, to)
    }
}

fn capture<'h>(caps: &Captures<'h>, index: usize) -> Option<&'h str> {
    caps.get(index).map(|m| m.as_str())
}

/// Strict `YYYY-MM-DD`; rejects impossible dates such as `2025-02-30`.
fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let caps = ISO_DATE.captures(s)?;
    let year = capture(&caps, 1)?.parse().ok()?;
    let month = capture(&caps, 2)?.parse().ok()?;
    let day = capture(&caps, 3)?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
