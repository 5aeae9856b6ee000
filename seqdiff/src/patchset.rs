//! Patchset normalization.
//!
//! A patchset arrives as a tree at most two levels deep (a patchset of hunks
//! of changes) whose leaves are typed [`Change`] records or raw JSON
//! encodings of them. [`normalize`] flattens it by one level, validates every
//! leaf, and reports whether anything other than `=` records is present.

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use crate::change::{Action, Change};
use crate::error::PatchsetError;

/// Deepest nesting level accepted: 0 is the patchset, 1 a hunk.
pub const MAX_DEPTH: usize = 1;

/// One element of a patchset.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchNode<T> {
    /// A typed change record.
    Change(Change<T>),
    /// A group of nodes, one nesting level down.
    Hunk(Vec<PatchNode<T>>),
    /// An untyped JSON encoding: a raw change tuple, a serialized change
    /// object, or a nested array.
    Raw(Value),
}

impl<T> From<Change<T>> for PatchNode<T> {
    fn from(change: Change<T>) -> Self {
        Self::Change(change)
    }
}

impl<T> From<Vec<Change<T>>> for PatchNode<T> {
    fn from(hunk: Vec<Change<T>>) -> Self {
        Self::Hunk(hunk.into_iter().map(Self::Change).collect())
    }
}

impl<T> From<Value> for PatchNode<T> {
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

/// Converts a list of hunks, such as the output of [`crate::diff`], into a
/// patchset.
#[must_use]
pub fn from_hunks<T>(hunks: Vec<Vec<Change<T>>>) -> Vec<PatchNode<T>> {
    hunks.into_iter().map(PatchNode::from).collect()
}

/// A node reached during traversal, typed or raw.
enum NodeRef<'a, T> {
    Node(&'a PatchNode<T>),
    Value(&'a Value),
}

/// The children of a nested level.
enum Level<'a, T> {
    Nodes(&'a [PatchNode<T>]),
    Values(&'a [Value]),
}

impl<'a, T> Level<'a, T> {
    fn refs(self) -> Vec<NodeRef<'a, T>> {
        match self {
            Self::Nodes(nodes) => nodes.iter().map(NodeRef::Node).collect(),
            Self::Values(values) => values.iter().map(NodeRef::Value).collect(),
        }
    }
}

/// What a node turned out to be.
enum Element<'a, T: Clone> {
    Record(Cow<'a, Change<T>>),
    RawTuple(&'a [Value]),
    Nested(Level<'a, T>),
}

fn classify<T>(node: NodeRef<'_, T>) -> Result<Element<'_, T>, PatchsetError>
where
    T: Clone + DeserializeOwned,
{
    match node {
        NodeRef::Node(PatchNode::Change(change)) => Ok(Element::Record(Cow::Borrowed(change))),
        NodeRef::Node(PatchNode::Hunk(nodes)) => Ok(Element::Nested(Level::Nodes(nodes))),
        NodeRef::Node(PatchNode::Raw(value)) | NodeRef::Value(value) => classify_value(value),
    }
}

fn classify_value<T>(value: &Value) -> Result<Element<'_, T>, PatchsetError>
where
    T: Clone + DeserializeOwned,
{
    match value {
        Value::Array(items) if is_raw_tuple(items) => Ok(Element::RawTuple(items)),
        Value::Array(items) => Ok(Element::Nested(Level::Values(items))),
        Value::Object(_) => serde_json::from_value(value.clone())
            .map(|change| Element::Record(Cow::Owned(change)))
            .map_err(|_| invalid(value)),
        _ => Err(invalid(value)),
    }
}

fn is_raw_tuple(items: &[Value]) -> bool {
    items
        .first()
        .and_then(Value::as_str)
        .and_then(Action::from_symbol)
        .is_some()
}

fn invalid(value: &Value) -> PatchsetError {
    PatchsetError::InvalidInput {
        kind: kind_of(value).to_string(),
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn normalize_level<T>(
    level: Level<'_, T>,
    depth: usize,
) -> Result<(bool, Vec<Change<T>>), PatchsetError>
where
    T: Clone + DeserializeOwned,
{
    if depth > MAX_DEPTH {
        return Err(PatchsetError::TooComplex {
            depth,
            max: MAX_DEPTH,
        });
    }

    let mut has_changes = false;
    let mut flat = Vec::new();
    for node in level.refs() {
        match classify(node)? {
            Element::Record(change) => {
                has_changes |= !change.is_unchanged();
                flat.push(change.into_owned());
            }
            Element::RawTuple(tuple) => {
                let change = Change::from_raw(tuple)?;
                has_changes |= !change.is_unchanged();
                flat.push(change);
            }
            Element::Nested(inner) => {
                let (inner_changes, inner_flat) = normalize_level(inner, depth + 1)?;
                trace!("spliced {} records from level {}", inner_flat.len(), depth + 1);
                has_changes |= inner_changes;
                flat.extend(inner_flat);
            }
        }
    }
    Ok((has_changes, flat))
}

/// Flattens and validates a patchset.
///
/// Returns whether any record is a real change (anything but `=`) together
/// with the records in traversal order, one nesting level removed.
///
/// # Errors
///
/// - [`PatchsetError::TooComplex`] when nesting goes deeper than hunks of
///   changes.
/// - [`PatchsetError::InvalidInput`] for a leaf that is neither a change nor a
///   sequence.
/// - [`PatchsetError::MalformedChange`] for a raw tuple with a recognized
///   action and an unusable payload.
///
/// # Examples
///
/// ```
/// use seqdiff::{Action, Change, PatchNode, normalize};
///
/// let patchset: Vec<PatchNode<char>> = vec![
///     vec![Change::simple(Action::Unchanged, 0, 'a')].into(),
///     vec![Change::simple(Action::Insert, 1, 'b')].into(),
/// ];
/// let (has_changes, flat) = normalize(&patchset).unwrap();
/// assert!(has_changes);
/// assert_eq!(flat.len(), 2);
/// ```
pub fn normalize<T>(patchset: &[PatchNode<T>]) -> Result<(bool, Vec<Change<T>>), PatchsetError>
where
    T: Clone + DeserializeOwned,
{
    let result = normalize_level(Level::Nodes(patchset), 0)?;
    debug!(
        "normalized patchset into {} records (has_changes={})",
        result.1.len(),
        result.0
    );
    Ok(result)
}

/// Flattens and validates a patchset given as a JSON document.
///
/// # Errors
///
/// Returns [`PatchsetError::InvalidInput`] if `document` is not an array,
/// otherwise the same errors as [`normalize`].
pub fn normalize_value<T>(document: &Value) -> Result<(bool, Vec<Change<T>>), PatchsetError>
where
    T: Clone + DeserializeOwned,
{
    match document {
        Value::Array(items) => normalize_level(Level::Values(items), 0),
        other => Err(invalid(other)),
    }
}
