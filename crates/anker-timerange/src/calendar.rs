//! Calendar arithmetic: day, week and month boundaries in a given timezone.
//!
//! All functions are pure and generic over [`chrono::TimeZone`]. Production
//! code runs them in [`chrono::Local`]; tests pin a fixed or IANA zone.
//!
//! Date arithmetic is done on [`NaiveDate`] and only turned into an instant at
//! the end, so a DST transition never shifts a boundary onto the wrong day.
//! When a wall time is ambiguous the start of a day takes the earliest
//! instant and the end of a day the latest, so consecutive days stay adjacent.
//! When it falls into a DST gap the nearest wall time on the same side of the
//! gap is used (forward for the start of a day, backward for the end).
//!
//! # Week numbers
//!
//! [`week_bounds`] does **not** implement ISO 8601 week numbering. Week 1 is
//! the first week that starts on or after January 1 of the year, for the
//! configured [`WeekStart`]. Days of January before that week belong to no
//! numbered week of the year.

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use tracing::debug;

use crate::range::WeekStart;

/// `23:59:59.999999999`
const LAST_NANO: NaiveTime = match NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999) {
    Some(time) => time,
    None => panic!("invalid end-of-day time"),
};

/// Largest DST gap we step over, in 15-minute increments (covers a skipped day).
const MAX_GAP_STEPS: i64 = 25 * 4;

/// First instant of `t`'s calendar day.
pub fn start_of_day<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTime<Tz> {
    day_start(&t.timezone(), t.date_naive())
}

/// Last instant (`23:59:59.999999999`) of `t`'s calendar day.
pub fn end_of_day<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTime<Tz> {
    day_end(&t.timezone(), t.date_naive())
}

/// First instant of the week containing `t`.
///
/// Returns `None` when the week begins before the earliest representable date.
pub fn start_of_week<Tz: TimeZone>(
    t: &DateTime<Tz>,
    week_start: WeekStart,
) -> Option<DateTime<Tz>> {
    let first = week_start_date(t.date_naive(), week_start)?;
    Some(day_start(&t.timezone(), first))
}

/// Last instant of the week containing `t`.
///
/// Returns `None` when the week ends after the latest representable date.
pub fn end_of_week<Tz: TimeZone>(
    t: &DateTime<Tz>,
    week_start: WeekStart,
) -> Option<DateTime<Tz>> {
    let first = week_start_date(t.date_naive(), week_start)?;
    let last = first.checked_add_days(Days::new(6))?;
    Some(day_end(&t.timezone(), last))
}

/// The date on which the week containing `date` begins.
pub fn week_start_date(date: NaiveDate, week_start: WeekStart) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(week_start.days_since(date.weekday()))))
}

/// Bounds of week `week` (1–53) of `year`. See the module docs for numbering.
///
/// Returns `None` for a week outside 1–53 or a date chrono cannot represent.
pub fn week_bounds<Tz: TimeZone>(
    tz: &Tz,
    year: i32,
    week: u32,
    week_start: WeekStart,
) -> Option<(DateTime<Tz>, DateTime<Tz>)> {
    if !(1..=53).contains(&week) {
        return None;
    }

    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let mut first_week = week_start_date(jan1, week_start)?;
    if first_week.year() < year {
        first_week = first_week.checked_add_days(Days::new(7))?;
    }

    let start = first_week.checked_add_signed(Duration::weeks(i64::from(week - 1)))?;
    let end = start.checked_add_days(Days::new(6))?;
    Some((day_start(tz, start), day_end(tz, end)))
}

/// First and last instant of `month` (1–12) in `year`.
pub fn month_bounds<Tz: TimeZone>(
    tz: &Tz,
    year: i32,
    month: u32,
) -> Option<(DateTime<Tz>, DateTime<Tz>)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    // Day zero of the following month.
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;
    Some((day_start(tz, first), day_end(tz, last)))
}

/// The `days` calendar days ending with `now`'s day. `days` must be at least 1.
pub fn last_n_days<Tz: TimeZone>(
    now: &DateTime<Tz>,
    days: u32,
) -> Option<(DateTime<Tz>, DateTime<Tz>)> {
    let back = days.checked_sub(1)?;
    let first = now.date_naive().checked_sub_days(Days::new(u64::from(back)))?;
    Some((day_start(&now.timezone(), first), end_of_day(now)))
}

/// First instant of `date` in `tz`.
pub fn day_start<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    localize(tz, date.and_time(NaiveTime::MIN), Edge::Start)
}

/// Last instant of `date` in `tz`.
pub fn day_end<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    localize(tz, date.and_time(LAST_NANO), Edge::End)
}

/// Which side of a day a wall time bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Start,
    End,
}

fn localize<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime, edge: Edge) -> DateTime<Tz> {
    let step = match edge {
        Edge::Start => Duration::minutes(15),
        Edge::End => Duration::minutes(-15),
    };

    let mut wall = naive;
    for _ in 0..MAX_GAP_STEPS {
        let local = tz.from_local_datetime(&wall);
        let resolved = match edge {
            Edge::Start => local.earliest(),
            Edge::End => local.latest(),
        };
        if let Some(dt) = resolved {
            return dt;
        }
        match wall.checked_add_signed(step) {
            Some(next) => wall = next,
            None => break,
        }
    }

    // No wall time near `naive` exists in `tz`; read it as UTC instead.
    debug!(wall = %naive, ?edge, "no local time near boundary, using UTC reading");
    tz.from_utc_datetime(&naive)
}
