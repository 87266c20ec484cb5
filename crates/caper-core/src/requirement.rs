//! Preconditions gating a choice's visibility.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scene::{lenient_names, lenient_thresholds};

/// A precondition attached to a choice.
///
/// Authored content may fill in either field. Only one kind is ever checked:
/// an inventory requirement takes precedence over a stats requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Items that must all be held.
    #[serde(
        default,
        deserialize_with = "lenient_names",
        skip_serializing_if = "Option::is_none"
    )]
    pub inventory: Option<Vec<String>>,
    /// Minimum value for each listed stat.
    #[serde(
        default,
        deserialize_with = "lenient_thresholds",
        skip_serializing_if = "Option::is_none"
    )]
    pub stats: Option<BTreeMap<String, i64>>,
}

/// Which check a requirement resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementKind<'a> {
    /// Every listed item must be in the inventory.
    Inventory(&'a [String]),
    /// Every listed stat must meet its threshold.
    Stats(&'a BTreeMap<String, i64>),
    /// Neither field is present.
    Unspecified,
}

impl Requirement {
    /// A requirement on held items.
    pub fn inventory<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inventory: Some(items.into_iter().map(Into::into).collect()),
            stats: None,
        }
    }

    /// A requirement on minimum stat values.
    pub fn stats<I, S>(thresholds: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        Self {
            inventory: None,
            stats: Some(
                thresholds
                    .into_iter()
                    .map(|(k, v)| (k.into(), v))
                    .collect(),
            ),
        }
    }

    /// Classify the requirement. Inventory wins when both fields are set.
    pub fn kind(&self) -> RequirementKind<'_> {
        if let Some(items) = &self.inventory {
            RequirementKind::Inventory(items)
        } else if let Some(stats) = &self.stats {
            RequirementKind::Stats(stats)
        } else {
            RequirementKind::Unspecified
        }
    }
}
