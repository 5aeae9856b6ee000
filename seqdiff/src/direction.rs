//! Patch direction detection.
//!
//! Given a candidate source sequence and a patchset, decide whether the
//! patchset turns the source into something else ([`Direction::Forward`]) or
//! was produced from something else and leads to the source
//! ([`Direction::Reverse`]). The evidence is how often each record's old side
//! (left) and new side (right) agree with what the source holds.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::change::{Action, Change, ContextChange, SimpleChange};
use crate::config::DirectionSettings;
use crate::error::DirectionError;
use crate::patchset::{PatchNode, normalize};
use crate::sequence::Sequence;

/// Which way a patchset applies to a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// The source is the patchset's origin.
    Forward,
    /// The source is the patchset's result; apply it in reverse.
    Reverse,
}

/// Match/miss counters for both sides of a patchset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Records whose old side agrees with the source.
    pub left_match: usize,
    /// Records whose old side disagrees with the source.
    pub left_miss: usize,
    /// Records whose new side agrees with the source.
    pub right_match: usize,
    /// Records whose new side disagrees with the source.
    pub right_miss: usize,
}

impl Tally {
    /// Counts the evidence of one record against `source`.
    pub fn record<T: PartialEq>(&mut self, source: &[T], change: &Change<T>) {
        match change {
            Change::Context(change) => self.record_context(source, change),
            Change::Simple(change) => self.record_simple(source, change),
        }
    }

    fn record_context<T: PartialEq>(&mut self, source: &[T], change: &ContextChange<T>) {
        let left = source.get(change.old_position) == change.old_element.as_ref();
        let right = source.get(change.new_position) == change.new_element.as_ref();
        match change.action {
            Action::Delete => self.left(left),
            Action::Insert => self.right(right),
            Action::Unchanged => {
                self.left_miss += usize::from(!left);
                self.right_miss += usize::from(!right);
            }
            Action::Replace => {
                if left {
                    self.left_match += 1;
                } else if right {
                    self.right_match += 1;
                } else {
                    self.left_miss += 1;
                    self.right_miss += 1;
                }
            }
        }
    }

    fn record_simple<T: PartialEq>(&mut self, source: &[T], change: &SimpleChange<T>) {
        let found = source.get(change.position) == Some(&change.element);
        match change.action {
            Action::Delete => self.left(found),
            Action::Insert => self.right(found),
            // A simple record cannot tell which side is wrong.
            Action::Unchanged if !found => {
                self.left_miss += 1;
                self.right_miss += 1;
            }
            Action::Unchanged | Action::Replace => {}
        }
    }

    fn left(&mut self, matched: bool) {
        if matched {
            self.left_match += 1;
        } else {
            self.left_miss += 1;
        }
    }

    fn right(&mut self, matched: bool) {
        if matched {
            self.right_match += 1;
        } else {
            self.right_miss += 1;
        }
    }

    /// Decides the direction from the counters.
    ///
    /// A side that only ever missed means the source plays the other role.
    /// When neither or both sides are like that, the side with more matches
    /// wins.
    ///
    /// # Errors
    ///
    /// Returns [`DirectionError::Ambiguous`] when the match counts tie.
    pub fn verdict(&self) -> Result<Direction, DirectionError> {
        let no_left = self.left_match == 0 && self.left_miss > 0;
        let no_right = self.right_match == 0 && self.right_miss > 0;
        match (no_left, no_right) {
            (false, true) => Ok(Direction::Forward),
            (true, false) => Ok(Direction::Reverse),
            _ if self.left_match > self.right_match => Ok(Direction::Forward),
            _ if self.left_match < self.right_match => Ok(Direction::Reverse),
            _ => Err(DirectionError::Ambiguous {
                left_match: self.left_match,
                left_miss: self.left_miss,
                right_match: self.right_match,
                right_miss: self.right_miss,
            }),
        }
    }
}

/// Direction detector with an optional record limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionDetector {
    limit: Option<usize>,
}

impl DirectionDetector {
    /// Creates a detector that examines every record.
    #[must_use]
    pub const fn new() -> Self {
        Self { limit: None }
    }

    /// Stops once more than `limit` records have been examined.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Creates a detector from loaded settings.
    #[must_use]
    pub const fn from_settings(settings: &DirectionSettings) -> Self {
        Self {
            limit: settings.limit,
        }
    }

    /// The configured limit.
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Counts evidence for `patchset` against `source`.
    ///
    /// Iteration stops after the record that takes the count past the limit,
    /// so with a limit of `n` at most `n + 1` records are examined.
    pub fn tally<'a, S, I>(&self, source: &S, patchset: I) -> Tally
    where
        S: Sequence + ?Sized,
        S::Element: PartialEq + 'a,
        I: IntoIterator<Item = &'a Change<S::Element>>,
    {
        let source = source.elements();
        let mut tally = Tally::default();
        for (count, change) in (1..).zip(patchset) {
            tally.record(&source, change);
            if self.limit.is_some_and(|limit| count > limit) {
                break;
            }
        }
        tally
    }

    /// Decides whether `patchset` applies to `source` forward or in reverse.
    ///
    /// # Errors
    ///
    /// Returns [`DirectionError::Ambiguous`] when the evidence is inconclusive.
    pub fn detect<'a, S, I>(&self, source: &S, patchset: I) -> Result<Direction, DirectionError>
    where
        S: Sequence + ?Sized,
        S::Element: PartialEq + 'a,
        I: IntoIterator<Item = &'a Change<S::Element>>,
    {
        let tally = self.tally(source, patchset);
        debug!(
            "direction evidence: left {}/{} right {}/{} (match/miss)",
            tally.left_match, tally.left_miss, tally.right_match, tally.right_miss
        );
        tally.verdict()
    }

    /// Normalizes a raw patchset, then detects its direction.
    ///
    /// # Errors
    ///
    /// Returns [`DirectionError::Patchset`] if normalization fails, otherwise
    /// the same errors as [`DirectionDetector::detect`].
    pub fn detect_raw<S>(
        &self,
        source: &S,
        patchset: &[PatchNode<S::Element>],
    ) -> Result<Direction, DirectionError>
    where
        S: Sequence + ?Sized,
        S::Element: PartialEq + DeserializeOwned,
    {
        let (_, flat) = normalize(patchset)?;
        self.detect(source, &flat)
    }
}

/// Decides whether `patchset` applies to `source` forward or in reverse.
///
/// `limit` stops iteration after the record that takes the count past it.
///
/// # Errors
///
/// Returns [`DirectionError::Ambiguous`] when the evidence is inconclusive.
///
/// # Examples
///
/// ```
/// use seqdiff::{Action, Change, Direction, detect_direction};
///
/// let patchset = vec![Change::simple(Action::Insert, 3, 'd')];
/// assert_eq!(detect_direction("abc", &patchset, None).unwrap(), Direction::Forward);
/// assert_eq!(detect_direction("abcd", &patchset, None).unwrap(), Direction::Reverse);
/// ```
pub fn detect_direction<'a, S, I>(
    source: &S,
    patchset: I,
    limit: Option<usize>,
) -> Result<Direction, DirectionError>
where
    S: Sequence + ?Sized,
    S::Element: PartialEq + 'a,
    I: IntoIterator<Item = &'a Change<S::Element>>,
{
    DirectionDetector { limit }.detect(source, patchset)
}

/// Normalizes a raw patchset, then detects its direction.
///
/// # Errors
///
/// Returns [`DirectionError::Patchset`] if normalization fails, or
/// [`DirectionError::Ambiguous`] when the evidence is inconclusive.
pub fn detect_direction_raw<S>(
    source: &S,
    patchset: &[PatchNode<S::Element>],
    limit: Option<usize>,
) -> Result<Direction, DirectionError>
where
    S: Sequence + ?Sized,
    S::Element: PartialEq + DeserializeOwned,
{
    DirectionDetector { limit }.detect_raw(source, patchset)
}
