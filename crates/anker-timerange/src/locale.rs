//! Multilingual month-name lookup.
//!
//! A [`MonthRegistry`] is assembled from an explicit, ordered list of
//! [`LocalePack`]s before any parsing happens. Packs are plain `const`
//! tables, so adding a language means defining one more table and passing
//! it to [`MonthRegistry::from_packs`]:
//!
//! ```
//! use anker_timerange::locale::{LocalePack, MonthRegistry, ENGLISH};
//!
//! const DUTCH: LocalePack = LocalePack::new("nl", &[("januari", 1), ("maart", 3), ("mrt", 3)]);
//!
//! let registry = MonthRegistry::from_packs(&[ENGLISH, DUTCH]);
//! assert_eq!(registry.lookup("Maart"), Some(3));
//! assert_eq!(registry.lookup("march"), Some(3));
//! ```
//!
//! When two packs register the same key, the pack registered later wins.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{Result, TimeRangeError};

/// A named, immutable table of month names (full or abbreviated) to month numbers 1–12.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalePack {
    code: &'static str,
    months: &'static [(&'static str, u32)],
}

impl LocalePack {
    pub const fn new(code: &'static str, months: &'static [(&'static str, u32)]) -> Self {
        Self { code, months }
    }

    /// Short language code, e.g. `"en"`.
    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn months(&self) -> &'static [(&'static str, u32)] {
        self.months
    }

    /// Look up a built-in pack by its language code (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`TimeRangeError::UnknownLocale`] if no built-in pack has that code.
    pub fn by_code(code: &str) -> Result<LocalePack> {
        let wanted = code.trim().to_lowercase();
        BUILTIN_PACKS
            .iter()
            .find(|pack| pack.code == wanted)
            .copied()
            .ok_or_else(|| TimeRangeError::UnknownLocale(code.to_string()))
    }
}

pub const ENGLISH: LocalePack = LocalePack::new(
    "en",
    &[
        ("january", 1),
        ("february", 2),
        ("march", 3),
        ("april", 4),
        ("may", 5),
        ("june", 6),
        ("july", 7),
        ("august", 8),
        ("september", 9),
        ("october", 10),
        ("november", 11),
        ("december", 12),
        ("jan", 1),
        ("feb", 2),
        ("mar", 3),
        ("apr", 4),
        ("jun", 6),
        ("jul", 7),
        ("aug", 8),
        ("sep", 9),
        ("sept", 9),
        ("oct", 10),
        ("nov", 11),
        ("dec", 12),
    ],
);

pub const GERMAN: LocalePack = LocalePack::new(
    "de",
    &[
        ("januar", 1),
        ("februar", 2),
        ("märz", 3),
        ("april", 4),
        ("mai", 5),
        ("juni", 6),
        ("juli", 7),
        ("august", 8),
        ("september", 9),
        ("oktober", 10),
        ("november", 11),
        ("dezember", 12),
        // Only where the abbreviation differs from the full name
        ("jan", 1),
        ("feb", 2),
        ("mär", 3),
        ("okt", 10),
        ("dez", 12),
    ],
);

pub const FRENCH: LocalePack = LocalePack::new(
    "fr",
    &[
        ("janvier", 1),
        ("février", 2),
        ("mars", 3),
        ("avril", 4),
        ("mai", 5),
        ("juin", 6),
        ("juillet", 7),
        ("août", 8),
        ("septembre", 9),
        ("octobre", 10),
        ("novembre", 11),
        ("décembre", 12),
        ("janv", 1),
        ("févr", 2),
        ("avr", 4),
        ("juil", 7),
        ("sept", 9),
        ("oct", 10),
        ("nov", 11),
        ("déc", 12),
    ],
);

/// Every pack shipped with the crate, addressable through [`LocalePack::by_code`].
pub const BUILTIN_PACKS: &[LocalePack] = &[ENGLISH, GERMAN, FRENCH];

/// Union of registered locale packs, keyed by lowercase month name.
///
/// Built once at startup and then only read. [`crate::TimeRangeParser`] holds a
/// shared borrow of the registry, so it cannot be mutated while parsing.
#[derive(Debug, Clone, Default)]
pub struct MonthRegistry {
    months: HashMap<String, u32>,
    packs: Vec<&'static str>,
}

impl MonthRegistry {
    /// An empty registry. No month name resolves until a pack is registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from packs applied in slice order.
    pub fn from_packs(packs: &[LocalePack]) -> Self {
        let mut registry = Self::new();
        for pack in packs {
            registry.register(pack);
        }
        registry
    }

    /// English followed by German.
    pub fn builtin() -> Self {
        Self::from_packs(&[ENGLISH, GERMAN])
    }

    /// Add every entry of `pack`, overwriting keys registered by earlier packs.
    pub fn register(&mut self, pack: &LocalePack) {
        for &(name, month) in pack.months {
            self.months.insert(name.to_lowercase(), month);
        }
        self.packs.push(pack.code);
        debug!(
            locale = pack.code,
            entries = pack.months.len(),
            total = self.len(),
            "registered locale pack"
        );
    }

    /// Case-insensitive exact match. No prefix or fuzzy matching.
    pub fn lookup(&self, name: &str) -> Option<u32> {
        self.months.get(&name.to_lowercase()).copied()
    }

    /// Codes of the registered packs, in registration order.
    pub fn packs(&self) -> &[&'static str] {
        &self.packs
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}
