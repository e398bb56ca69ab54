//! Error types for the evictkit library.
//!
//! Cache misses are never errors here — every lookup path reports a miss
//! through `Option`/`bool`. The only error surfaces are:
//!
//! - [`ConfigError`]: returned by fallible `try_*` constructors when a
//!   user-tunable parameter is out of range (e.g. an LRU-K threshold below 2).
//! - [`InvariantError`]: returned by debug/test-only `check_invariants`
//!   methods when internal data-structure invariants are violated, which
//!   always indicates a library bug.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::error::ConfigError;
//! use evictkit::policy::lru_k::LrukCache;
//!
//! // Fallible constructor for user-configurable parameters
//! let cache: Result<LrukCache<u64, i32>, ConfigError> =
//!     LrukCache::try_with_k(100, 50, 3);
//! assert!(cache.is_ok());
//!
//! // An admission threshold below 2 is caught without panicking
//! let bad = LrukCache::<u64, i32>::try_with_k(100, 50, 1);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by debug-only `check_invariants` methods on cache types
/// (e.g. [`ArcCache::check_invariants`](crate::policy::arc::ArcCache::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`LrukCache::try_with_k`](crate::policy::lru_k::LrukCache::try_with_k) and
/// [`LfuCache::try_with_max_average`](crate::policy::lfu::LfuCache::try_with_max_average).
/// Carries a human-readable description of which parameter failed validation.
///
/// # Example
///
/// ```
/// use evictkit::policy::lfu::LfuCache;
///
/// let err = LfuCache::<u64, u64>::try_with_max_average(100, 0).unwrap_err();
/// assert!(err.to_string().contains("max_average"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("ghost overlaps real list");
        assert_eq!(err.to_string(), "ghost overlaps real list");
    }

    #[test]
    fn invariant_message_accessor() {
        let err = InvariantError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn invariant_clone_and_eq() {
        let a = InvariantError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("k must be >= 2");
        assert_eq!(err.to_string(), "k must be >= 2");
    }

    #[test]
    fn config_debug_includes_message() {
        let err = ConfigError::new("bad threshold");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("bad threshold"));
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
    }
}
