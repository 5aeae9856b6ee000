//! Error types for the diff engine.
//!
//! Each component reports its own `thiserror` enum; [`SeqDiffError`] wraps
//! them for callers that drive several components in one flow.

use thiserror::Error;

/// Top-level error type for seqdiff operations.
#[derive(Error, Debug)]
pub enum SeqDiffError {
    /// A patchset could not be normalized.
    #[error("Patchset error: {0}")]
    Patchset(#[from] PatchsetError),

    /// The direction of a patchset could not be established.
    #[error("Direction error: {0}")]
    Direction(#[from] DirectionError),

    /// Settings could not be loaded or failed validation.
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Errors raised while normalizing a patchset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchsetError {
    /// Nesting exceeds "patchset of hunks of changes".
    #[error("Patchset too complex: nesting level {depth} exceeds the maximum of {max}")]
    TooComplex {
        /// The nesting level that was entered.
        depth: usize,
        /// The deepest level allowed.
        max: usize,
    },

    /// An element is neither a change record nor a nested patchset.
    #[error("Cannot normalize a hunk of kind '{kind}'")]
    InvalidInput {
        /// Descriptive kind of the offending element.
        kind: String,
    },

    /// A raw tuple names a valid action but its payload is unusable.
    #[error("Malformed change tuple: {reason}")]
    MalformedChange {
        /// What was wrong with the tuple.
        reason: String,
    },
}

/// Errors raised by the direction detector.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectionError {
    /// Neither side dominates.
    #[error(
        "The patchset does not appear to apply to the source as either its origin or its result \
         (left {left_match}/{left_miss}, right {right_match}/{right_miss} match/miss)"
    )]
    Ambiguous {
        /// Records whose old side matched the source.
        left_match: usize,
        /// Records whose old side did not match the source.
        left_miss: usize,
        /// Records whose new side matched the source.
        right_match: usize,
        /// Records whose new side did not match the source.
        right_miss: usize,
    },

    /// The raw patchset could not be normalized before detection.
    #[error(transparent)]
    Patchset(#[from] PatchsetError),
}

/// Errors raised while loading [`crate::config::Settings`].
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The configuration sources could not be built or deserialized.
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value was loaded but is not acceptable.
    #[error("Invalid configuration for '{key}': {value}")]
    Invalid {
        /// The configuration key.
        key: String,
        /// The rejected value.
        value: String,
    },
}

/// Error when parsing an unknown action symbol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown change action: '{0}'")]
pub struct ParseActionError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_complex_message() {
        let err = PatchsetError::TooComplex { depth: 2, max: 1 };
        assert!(err.to_string().starts_with("Patchset too complex"));
    }

    #[test]
    fn test_wraps_component_errors() {
        let err: SeqDiffError = PatchsetError::InvalidInput {
            kind: "number".to_string(),
        }
        .into();
        assert!(matches!(err, SeqDiffError::Patchset(_)));
        assert!(err.to_string().contains("'number'"));

        let err: SeqDiffError = DirectionError::Ambiguous {
            left_match: 0,
            left_miss: 1,
            right_match: 0,
            right_miss: 1,
        }
        .into();
        assert!(matches!(err, SeqDiffError::Direction(_)));
    }

    #[test]
    fn test_direction_error_is_transparent_for_patchset() {
        let inner = PatchsetError::MalformedChange {
            reason: "missing position".to_string(),
        };
        let err = DirectionError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
    }
}
