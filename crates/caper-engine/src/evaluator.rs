//! Requirement evaluation.
//!
//! Requirements gate whether a choice is *offered*, not whether selecting it
//! succeeds: a choice that fails its gate is never shown.

use caper_core::{PlayerState, Requirement, RequirementKind};

/// Outcome of checking a choice's requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// The choice has no requirement.
    Open,
    /// The requirement is met.
    Met,
    /// The requirement is not met.
    Unmet,
    /// The requirement names neither inventory nor stats; let it through.
    Permissive,
}

impl Gate {
    /// Whether the choice should be offered.
    pub fn allows(self) -> bool {
        !matches!(self, Gate::Unmet)
    }
}

/// Check `requirement` against the player.
///
/// An inventory requirement is checked in preference to a stats requirement;
/// only one of the two is ever consulted. Missing stats count as 0.
pub fn evaluate(requirement: Option<&Requirement>, player: &PlayerState) -> Gate {
    let Some(requirement) = requirement else {
        return Gate::Open;
    };

    let met = match requirement.kind() {
        RequirementKind::Inventory(items) => items.iter().all(|item| player.has_item(item)),
        RequirementKind::Stats(thresholds) => thresholds
            .iter()
            .all(|(stat, min)| player.stat(stat) >= *min),
        RequirementKind::Unspecified => {
            log::warn!("requirement names no inventory or stats; allowing");
            return Gate::Permissive;
        }
    };

    if met { Gate::Met } else { Gate::Unmet }
}

/// Shorthand for `evaluate(..).allows()`.
pub fn satisfies(requirement: Option<&Requirement>, player: &PlayerState) -> bool {
    evaluate(requirement, player).allows()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn player_with(items: &[&str]) -> PlayerState {
        let mut player = PlayerState::default();
        for item in items {
            player.add_item(*item);
        }
        player
    }

    #[test]
    fn absent_requirement_is_open() {
        assert_eq!(evaluate(None, &PlayerState::default()), Gate::Open);
    }

    #[test]
    fn empty_requirement_is_permissive() {
        let gate = evaluate(Some(&Requirement::default()), &PlayerState::default());
        assert_eq!(gate, Gate::Permissive);
        assert!(gate.allows());
    }

    #[test]
    fn empty_item_list_is_met() {
        let req = Requirement::inventory(Vec::<String>::new());
        assert_eq!(evaluate(Some(&req), &PlayerState::default()), Gate::Met);
    }

    #[test]
    fn inventory_needs_every_item() {
        let req = Requirement::inventory(["a", "b"]);
        assert!(!satisfies(Some(&req), &player_with(&["a"])));
        assert!(satisfies(Some(&req), &player_with(&["b", "a"])));
        assert!(satisfies(Some(&req), &player_with(&["a", "b", "c"])));
    }

    #[test]
    fn stats_threshold() {
        let req = Requirement::stats([("stealth", 5)]);
        let mut player = PlayerState::default();
        assert!(satisfies(Some(&req), &player));

        player.adjust_stat("stealth", -1);
        assert!(!satisfies(Some(&req), &player));
    }

    #[test]
    fn missing_stat_reads_as_zero() {
        let player = PlayerState::default();
        assert!(!satisfies(Some(&Requirement::stats([("charm", 1)])), &player));
        assert!(satisfies(Some(&Requirement::stats([("charm", 0)])), &player));
        assert!(satisfies(Some(&Requirement::stats([("charm", -2)])), &player));
    }

    #[test]
    fn inventory_short_circuits_stats() {
        let req = Requirement {
            inventory: Some(vec!["badge".into()]),
            stats: Some([("stealth".to_string(), 99)].into()),
        };
        assert_eq!(evaluate(Some(&req), &player_with(&["badge"])), Gate::Met);
    }

    proptest! {
        #[test]
        fn inventory_gate_matches_membership(
            held in proptest::collection::vec("[a-e]", 0..5),
            wanted in proptest::collection::vec("[a-e]", 0..4),
        ) {
            let mut player = PlayerState::default();
            for item in &held {
                player.add_item(item.clone());
            }
            let expected = wanted.iter().all(|w| held.contains(w));
            let req = Requirement::inventory(wanted);
            prop_assert_eq!(satisfies(Some(&req), &player), expected);
        }

        #[test]
        fn stats_gate_matches_threshold(value in -20i64..20, min in -20i64..20) {
            let mut player = PlayerState::default();
            player.stats.insert("stealth".into(), value);
            let req = Requirement::stats([("stealth", min)]);
            prop_assert_eq!(satisfies(Some(&req), &player), value >= min);
        }
    }
}
