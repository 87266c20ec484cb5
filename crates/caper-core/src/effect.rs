//! State changes attached to a choice.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scene::{lenient_deltas, lenient_names};

/// Inventory and stat changes applied when a choice is taken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    /// Items to put in the inventory.
    #[serde(
        default,
        deserialize_with = "lenient_names",
        skip_serializing_if = "Option::is_none"
    )]
    pub add: Option<Vec<String>>,
    /// Items to take out of the inventory.
    #[serde(
        default,
        deserialize_with = "lenient_names",
        skip_serializing_if = "Option::is_none"
    )]
    pub remove: Option<Vec<String>>,
    /// Signed deltas added to stats.
    #[serde(
        default,
        deserialize_with = "lenient_deltas",
        skip_serializing_if = "Option::is_none"
    )]
    pub stats: Option<BTreeMap<String, i64>>,
}

impl Effect {
    /// Add an item.
    pub fn with_add(mut self, item: impl Into<String>) -> Self {
        self.add.get_or_insert_with(Vec::new).push(item.into());
        self
    }

    /// Remove an item.
    pub fn with_remove(mut self, item: impl Into<String>) -> Self {
        self.remove.get_or_insert_with(Vec::new).push(item.into());
        self
    }

    /// Adjust a stat by `delta`.
    pub fn with_stat(mut self, stat: impl Into<String>, delta: i64) -> Self {
        self.stats
            .get_or_insert_with(BTreeMap::new)
            .insert(stat.into(), delta);
        self
    }

    /// Whether applying this effect would change nothing.
    pub fn is_noop(&self) -> bool {
        self.add.as_ref().is_none_or(Vec::is_empty)
            && self.remove.as_ref().is_none_or(Vec::is_empty)
            && self.stats.as_ref().is_none_or(BTreeMap::is_empty)
    }
}
