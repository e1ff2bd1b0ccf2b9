//! Engine configuration.
//!
//! The only runtime setting is the collation locale used to order string
//! keys. It normally comes from the process environment, the same variables
//! the C library consults for `LC_COLLATE`.

use std::env;

/// Locale used when the environment names none
pub const DEFAULT_LOCALE: &str = "en-US";

/// Variables consulted by [`CollationConfig::from_env`], highest priority first
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_COLLATE", "LANG"];

/// Collation settings for string keys.
///
/// ## Example
///
/// ```
/// use jukebox_collections::config::CollationConfig;
///
/// let config = CollationConfig::with_locale("de_DE.UTF-8");
/// assert_eq!(config.locale, "de-DE");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollationConfig {
    /// BCP-47 locale identifier, e.g. `en-US`
    pub locale: String,
}

impl Default for CollationConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl CollationConfig {
    /// Build a config from a locale in either POSIX (`en_US.UTF-8`) or
    /// BCP-47 (`en-US`) form.
    pub fn with_locale(locale: &str) -> Self {
        Self {
            locale: normalize_locale(locale),
        }
    }

    /// Read the locale from `LC_ALL`, `LC_COLLATE` or `LANG`.
    ///
    /// Falls back to [`DEFAULT_LOCALE`] when none is set.
    pub fn from_env() -> Self {
        let found = LOCALE_VARS
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find(|value| !value.trim().is_empty());

        match found {
            Some(value) => Self::with_locale(&value),
            None => Self::default(),
        }
    }
}

/// Convert a POSIX locale name to BCP-47.
///
/// Drops the codeset and modifier (`.UTF-8`, `@euro`) and swaps `_` for `-`.
/// `C` and `POSIX` map to the root locale `und`.
pub fn normalize_locale(raw: &str) -> String {
    let trimmed = raw.trim();
    let base = trimmed
        .split(['.', '@'])
        .next()
        .unwrap_or_default();

    if base.is_empty() || base == "C" || base == "POSIX" {
        return "und".to_string();
    }
    base.replace('_', "-")
}

// ============================================================================
// Unit Tests
// ============================================================================
