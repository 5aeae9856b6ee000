//! seqdiff - Longest common subsequence and patch direction detection.
//!
//! This crate aligns two sequences of hashable elements and answers a
//! question about the resulting edit records: given a source sequence and a
//! patchset, was the patchset built from that source (forward) or toward it
//! (reverse)?
//!
//! # Features
//!
//! - **LCS**: Hunt-Szymanski style alignment with prefix/suffix trimming
//! - **Traversal**: hunks of simple changes and balanced context changes
//! - **Normalization**: flattening of nested, typed or raw JSON patchsets
//! - **Direction**: match/miss tallies with an optional early-stop limit
//! - **Configuration**: layered settings via the `config` crate
//!
//! # Example
//!
//! ```rust
//! use seqdiff::{Direction, detect_direction, diff};
//!
//! let old = "the quick fox";
//! let new = "the quack fix";
//!
//! let hunks = diff(old, new);
//! let records: Vec<_> = hunks.iter().flatten().collect();
//!
//! assert_eq!(detect_direction(old, records.iter().copied(), None).unwrap(), Direction::Forward);
//! assert_eq!(detect_direction(new, records.iter().copied(), None).unwrap(), Direction::Reverse);
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod change;
pub mod config;
pub mod direction;
pub mod error;
pub mod lcs;
pub mod patchset;
pub mod sequence;
pub mod traverse;

// Re-export commonly used types
pub use change::{Action, Change, ContextChange, SimpleChange};
pub use config::{DirectionSettings, LoggingSettings, Settings};
pub use direction::{Direction, DirectionDetector, Tally, detect_direction, detect_direction_raw};
pub use error::{DirectionError, ParseActionError, PatchsetError, SeqDiffError, SettingsError};
pub use lcs::{MatchVector, lcs, replace_next_larger};
pub use patchset::{MAX_DEPTH, PatchNode, from_hunks, normalize, normalize_value};
pub use sequence::Sequence;
pub use traverse::{diff, lcs_elements, sdiff};

use tracing_subscriber::EnvFilter;

/// Version of the seqdiff crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes logging for seqdiff consumers.
///
/// `RUST_LOG` takes precedence; `level` is used when it is unset or
/// unparsable. This should be called once at the start of the application.
///
/// # Errors
///
/// Returns an error if the tracing subscriber has already been set.
pub fn init_logging(level: &str) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .finish(),
    )
}

/// Initializes logging at the level carried by loaded settings.
///
/// # Errors
///
/// Returns an error if the tracing subscriber has already been set.
pub fn init_logging_from(
    settings: &LoggingSettings,
) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    init_logging(&settings.level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_init_logging_twice_fails() {
        // Another test may already have installed a subscriber.
        let _ = init_logging("debug");
        assert!(init_logging("debug").is_err());
    }

    #[test]
    fn test_init_logging_from_settings() {
        let settings = Settings::default();
        let _ = init_logging_from(&settings.logging);
        // Whichever call won, a global subscriber is now in place.
        assert!(init_logging_from(&settings.logging).is_err());
    }
}
