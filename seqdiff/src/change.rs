//! Change records.
//!
//! A change is one elementary edit. [`SimpleChange`] carries a single
//! position, [`ContextChange`] carries its alignment in both the old and the
//! new sequence. Both can be built from, and turned back into, the raw tuple
//! encodings used by serialized patchsets:
//!
//! - simple: `[action, position, element]`
//! - context: `[action, [old_position, old_element], [new_position, new_element]]`

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ParseActionError, PatchsetError};

/// The edit a change record performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// `-`: the element is removed from the old sequence.
    #[serde(rename = "-")]
    Delete,
    /// `+`: the element is added to the new sequence.
    #[serde(rename = "+")]
    Insert,
    /// `=`: the element is the same on both sides.
    #[serde(rename = "=")]
    Unchanged,
    /// `!`: the old element is replaced by the new one.
    #[serde(rename = "!")]
    Replace,
}

impl Action {
    /// The one-character symbol for this action.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Delete => '-',
            Self::Insert => '+',
            Self::Unchanged => '=',
            Self::Replace => '!',
        }
    }

    /// Parses a recognized action symbol.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "-" => Some(Self::Delete),
            "+" => Some(Self::Insert),
            "=" => Some(Self::Unchanged),
            "!" => Some(Self::Replace),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s).ok_or_else(|| ParseActionError(s.to_string()))
    }
}

/// A change at a single position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimpleChange<T> {
    /// What the change does.
    pub action: Action,
    /// Index in the sequence the action applies to.
    pub position: usize,
    /// The element at that position.
    pub element: T,
}

impl<T> SimpleChange<T> {
    /// Creates a new simple change.
    #[must_use]
    pub const fn new(action: Action, position: usize, element: T) -> Self {
        Self {
            action,
            position,
            element,
        }
    }
}

/// A change aligned in both the old and the new sequence.
///
/// An element is `None` when the change sits past the end of that side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextChange<T> {
    /// What the change does.
    pub action: Action,
    /// Index in the old sequence.
    pub old_position: usize,
    /// Element of the old sequence at `old_position`.
    pub old_element: Option<T>,
    /// Index in the new sequence.
    pub new_position: usize,
    /// Element of the new sequence at `new_position`.
    pub new_element: Option<T>,
}

impl<T> ContextChange<T> {
    /// Creates a new context change.
    #[must_use]
    pub const fn new(
        action: Action,
        old_position: usize,
        old_element: Option<T>,
        new_position: usize,
        new_element: Option<T>,
    ) -> Self {
        Self {
            action,
            old_position,
            old_element,
            new_position,
            new_element,
        }
    }
}

/// A typed change record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Change<T> {
    /// A change with a single position.
    Simple(SimpleChange<T>),
    /// A change with old and new positions.
    Context(ContextChange<T>),
}

impl<T> Change<T> {
    /// Shorthand for a [`SimpleChange`].
    #[must_use]
    pub const fn simple(action: Action, position: usize, element: T) -> Self {
        Self::Simple(SimpleChange::new(action, position, element))
    }

    /// Shorthand for a [`ContextChange`].
    #[must_use]
    pub const fn context(
        action: Action,
        old_position: usize,
        old_element: Option<T>,
        new_position: usize,
        new_element: Option<T>,
    ) -> Self {
        Self::Context(ContextChange::new(
            action,
            old_position,
            old_element,
            new_position,
            new_element,
        ))
    }

    /// The action of this change.
    #[must_use]
    pub const fn action(&self) -> Action {
        match self {
            Self::Simple(change) => change.action,
            Self::Context(change) => change.action,
        }
    }

    /// True only for `=`.
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        matches!(self.action(), Action::Unchanged)
    }

    /// True for `+`.
    #[must_use]
    pub const fn is_adding(&self) -> bool {
        matches!(self.action(), Action::Insert)
    }

    /// True for `-`.
    #[must_use]
    pub const fn is_deleting(&self) -> bool {
        matches!(self.action(), Action::Delete)
    }

    /// True for `!`.
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        matches!(self.action(), Action::Replace)
    }
}

impl<T: DeserializeOwned> Change<T> {
    /// Builds a change from its raw tuple encoding.
    ///
    /// # Errors
    ///
    /// Returns [`PatchsetError::MalformedChange`] if the tuple does not have
    /// three slots, the action is not recognized, a position is not a
    /// non-negative integer, or an element does not deserialize as `T`.
    pub fn from_raw(tuple: &[Value]) -> Result<Self, PatchsetError> {
        let [action, first, second] = tuple else {
            return Err(malformed(format!(
                "expected 3 slots, found {}",
                tuple.len()
            )));
        };
        let action = action
            .as_str()
            .and_then(Action::from_symbol)
            .ok_or_else(|| malformed(format!("unrecognized action {action}")))?;

        match (first, second) {
            (Value::Array(old), Value::Array(new)) => {
                let (old_position, old_element) = side(old, "old")?;
                let (new_position, new_element) = side(new, "new")?;
                Ok(Self::context(
                    action,
                    old_position,
                    old_element,
                    new_position,
                    new_element,
                ))
            }
            (position, element) => Ok(Self::simple(
                action,
                position_of(position)?,
                element_of(element)?,
            )),
        }
    }
}

impl<T: Serialize> Change<T> {
    /// Encodes this change as its raw tuple.
    ///
    /// # Errors
    ///
    /// Returns an error if an element cannot be serialized.
    pub fn to_raw(&self) -> Result<Value, serde_json::Error> {
        let symbol = Value::from(self.action().symbol().to_string());
        Ok(match self {
            Self::Simple(change) => Value::Array(vec![
                symbol,
                Value::from(change.position),
                serde_json::to_value(&change.element)?,
            ]),
            Self::Context(change) => Value::Array(vec![
                symbol,
                Value::Array(vec![
                    Value::from(change.old_position),
                    serde_json::to_value(&change.old_element)?,
                ]),
                Value::Array(vec![
                    Value::from(change.new_position),
                    serde_json::to_value(&change.new_element)?,
                ]),
            ]),
        })
    }
}

impl<T> From<SimpleChange<T>> for Change<T> {
    fn from(change: SimpleChange<T>) -> Self {
        Self::Simple(change)
    }
}

impl<T> From<ContextChange<T>> for Change<T> {
    fn from(change: ContextChange<T>) -> Self {
        Self::Context(change)
    }
}

fn malformed(reason: String) -> PatchsetError {
    PatchsetError::MalformedChange { reason }
}

fn position_of(value: &Value) -> Result<usize, PatchsetError> {
    value
        .as_u64()
        .and_then(|p| usize::try_from(p).ok())
        .ok_or_else(|| malformed(format!("position {value} is not a non-negative integer")))
}

fn element_of<T: DeserializeOwned>(value: &Value) -> Result<T, PatchsetError> {
    serde_json::from_value(value.clone()).map_err(|e| malformed(format!("element {value}: {e}")))
}

fn side<T: DeserializeOwned>(
    pair: &[Value],
    name: &str,
) -> Result<(usize, Option<T>), PatchsetError> {
    let [position, element] = pair else {
        return Err(malformed(format!(
            "{name} side must be [position, element], found {} slots",
            pair.len()
        )));
    };
    Ok((position_of(position)?, element_of(element)?))
}
