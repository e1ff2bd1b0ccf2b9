//! Locale-aware string collation.
//!
//! String keys are ordered the way a person reading the locale expects
//! ("Ångström" near "Angstrom", case differences as tie-breakers) rather
//! than by raw bytes. One collator is kept per thread, matching the
//! single-caller model of the containers.
//!
//! ## Example
//!
//! ```
//! use std::cmp::Ordering;
//! use jukebox_collections::config::CollationConfig;
//! use jukebox_collections::types::collation;
//!
//! collation::init(&CollationConfig::with_locale("en_US")).unwrap();
//! assert_eq!(collation::compare("apple", "Banana"), Ordering::Less);
//! ```

use std::cell::RefCell;
use std::cmp::Ordering;

use icu::collator::{Collator, CollatorOptions};
use icu::locid::Locale;

use crate::config::CollationConfig;
use crate::error::CollationError;

thread_local! {
    static COLLATOR: RefCell<Option<Collator>> = const { RefCell::new(None) };
}

/// Install the collator for `config.locale` on the current thread.
///
/// Replaces any collator installed earlier.
pub fn init(config: &CollationConfig) -> Result<(), CollationError> {
    let collator = build_collator(&config.locale)?;
    COLLATOR.with(|slot| *slot.borrow_mut() = Some(collator));
    tracing::debug!(locale = %config.locale, "collation initialised");
    Ok(())
}

/// Drop the collator of the current thread.
pub fn cleanup() {
    COLLATOR.with(|slot| slot.borrow_mut().take());
}

/// Check whether a collator is installed on the current thread
pub fn is_initialized() -> bool {
    COLLATOR.with(|slot| slot.borrow().is_some())
}

/// Compare two strings by collation order.
///
/// Uses the root collation if [`init`] was never called on this thread.
pub fn compare(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_none() {
            match build_collator("und") {
                Ok(collator) => *slot = Some(collator),
                Err(err) => {
                    tracing::warn!(error = %err, "root collation unavailable, using byte order");
                    return a.cmp(b);
                }
            }
        }
        match slot.as_ref() {
            Some(collator) => collator.compare(a, b),
            None => a.cmp(b),
        }
    })
}

fn build_collator(locale: &str) -> Result<Collator, CollationError> {
    let parsed: Locale = locale
        .parse()
        .map_err(|err| CollationError::InvalidLocale {
            locale: locale.to_string(),
            reason: format!("{err:?}"),
        })?;

    Collator::try_new(&(&parsed).into(), CollatorOptions::new()).map_err(|err| {
        CollationError::Unavailable {
            locale: locale.to_string(),
            reason: format!("{err:?}"),
        }
    })
}

// ============================================================================
// Unit Tests
// ============================================================================
