//! # anker-timerange
//!
//! Deterministic resolution of human-entered time specifications into closed
//! local-time intervals.
//!
//! Given a reference instant and a week-start convention, a spec such as
//! `"lastweek"`, `"october 2025"`, `"week 32"` or `"2025-12-01..2025-12-31"`
//! becomes a [`TimeRange`] `[from, to]` whose bounds are exact to the
//! nanosecond. Month names resolve through an explicit, ordered
//! [`MonthRegistry`] of locale packs, so `"März 2025"` works as well as
//! `"march 2025"`.
//!
//! ## Modules
//!
//! - [`parser`] — spec string → [`TimeRange`], trying each grammar in a fixed order
//! - [`calendar`] — day, week, month and week-number boundaries
//! - [`locale`] — locale packs and the month-name registry
//! - [`range`] — [`TimeRange`], [`WeekStart`] and [`Config`]
//! - [`error`] — Error types

pub mod calendar;
pub mod error;
pub mod locale;
pub mod parser;
pub mod range;

pub use error::{Result, TimeRangeError};
pub use locale::{LocalePack, MonthRegistry, ENGLISH, FRENCH, GERMAN};
pub use parser::{TimeRangeParser, DEFAULT_SPEC};
pub use range::{Config, RangeSummary, TimeRange, WeekStart};
