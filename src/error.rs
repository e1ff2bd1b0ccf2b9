//! Error types.
//!
//! Container operations never fail: a missing key, a wrong value type or an
//! out-of-range index all come back as `None`. The only fallible step is
//! setting up string collation for a locale.

use thiserror::Error;

/// Failure to install a collator for a locale.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollationError {
    /// The locale string could not be parsed
    #[error("invalid locale '{locale}': {reason}")]
    InvalidLocale { locale: String, reason: String },

    /// No collation data is available for the locale
    #[error("no collation data for locale '{locale}': {reason}")]
    Unavailable { locale: String, reason: String },
}
