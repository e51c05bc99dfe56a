//! Per-element attribute values and their bulk reconciliation.

pub mod reconcile;
pub mod value;

pub use reconcile::{apply, summarize, AttributeBearing, Consensus};
pub use value::{parse_literal, AttributeValue};

use std::collections::BTreeMap;

/// Named attribute values of one element, ordered by name.
pub type AttributeMap = BTreeMap<String, AttributeValue>;
