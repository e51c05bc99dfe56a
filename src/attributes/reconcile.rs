//! Consensus of attribute values over a selection, and bulk write-back.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{AttributeError, Result};

use super::value::{parse_literal, AttributeValue};
use super::AttributeMap;

/// Anything that stores named attribute values.
pub trait AttributeBearing {
    /// The element's attributes.
    fn attributes(&self) -> &AttributeMap;

    /// Mutable access to the element's attributes.
    fn attributes_mut(&mut self) -> &mut AttributeMap;
}

impl AttributeBearing for AttributeMap {
    fn attributes(&self) -> &AttributeMap {
        self
    }

    fn attributes_mut(&mut self) -> &mut AttributeMap {
        self
    }
}

/// The value shared by every element of a selection, or `Mixed` when they disagree.
#[derive(Debug, Clone, PartialEq)]
pub enum Consensus<T> {
    Value(T),
    Mixed,
}

impl<T> Consensus<T> {
    /// Returns the shared value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Mixed => None,
        }
    }

    /// Whether the elements disagreed.
    #[must_use]
    pub fn is_mixed(&self) -> bool {
        matches!(self, Self::Mixed)
    }

    /// Maps the shared value, keeping `Mixed` as is.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Consensus<U> {
        match self {
            Self::Value(v) => Consensus::Value(f(v)),
            Self::Mixed => Consensus::Mixed,
        }
    }
}

/// Computes the consensus value of each attribute in `names` over `elements`.
///
/// Each name is read from the first element and compared against the
/// remaining elements in order; the first mismatch marks the name `Mixed`
/// and stops comparing it.
///
/// # Errors
///
/// Returns [`AttributeError::EmptySelection`] if `elements` is empty, and
/// [`AttributeError::MissingAttribute`] if a compared element lacks a name.
pub fn summarize<'a, E, I, S>(
    elements: I,
    names: &[S],
) -> Result<BTreeMap<String, Consensus<AttributeValue>>>
where
    E: AttributeBearing + ?Sized + 'a,
    I: IntoIterator<Item = &'a E>,
    S: AsRef<str>,
{
    let elements: Vec<&E> = elements.into_iter().collect();
    let (first, rest) = elements
        .split_first()
        .ok_or(AttributeError::EmptySelection)?;

    let mut summary = BTreeMap::new();
    for name in names {
        let name = name.as_ref();
        let value = lookup(*first, name)?;
        let mut consensus = Consensus::Value(value.clone());
        for other in rest {
            if lookup(*other, name)? != value {
                consensus = Consensus::Mixed;
                break;
            }
        }
        summary.insert(name.to_owned(), consensus);
    }
    Ok(summary)
}

fn lookup<'e, E>(element: &'e E, name: &str) -> Result<&'e AttributeValue>
where
    E: AttributeBearing + ?Sized,
{
    element.attributes().get(name).ok_or_else(|| {
        AttributeError::MissingAttribute {
            name: name.to_owned(),
        }
        .into()
    })
}

/// Writes `edits` to every element, returning whether anything was written.
///
/// `Mixed` edits are skipped so divergent per-element values survive. Other
/// edits are coerced with [`parse_literal`] and stored identically on each
/// element.
pub fn apply<'a, E, I>(elements: I, edits: &BTreeMap<String, Consensus<String>>) -> bool
where
    E: AttributeBearing + ?Sized + 'a,
    I: IntoIterator<Item = &'a mut E>,
{
    let resolved: Vec<(&str, AttributeValue)> = edits
        .iter()
        .filter_map(|(name, edit)| edit.value().map(|raw| (name.as_str(), parse_literal(raw))))
        .collect();
    if resolved.is_empty() {
        return false;
    }

    let mut written = 0usize;
    for element in elements {
        let attributes = element.attributes_mut();
        for (name, value) in &resolved {
            attributes.insert((*name).to_owned(), value.clone());
        }
        written += 1;
    }
    debug!(
        attributes = resolved.len(),
        elements = written,
        "applied attribute edits"
    );
    written > 0
}
