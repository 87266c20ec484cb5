//! Effect application.

use caper_core::{Effect, PlayerState};

/// A stat that an effect changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatChange {
    /// Stat name.
    pub stat: String,
    /// Amount added.
    pub delta: i64,
    /// Value after the change.
    pub value: i64,
}

/// What applying an effect actually changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Applied {
    /// Items newly put in the inventory.
    pub added: Vec<String>,
    /// Items that were held and are now gone.
    pub removed: Vec<String>,
    /// Stat adjustments, in stat-name order.
    pub stats: Vec<StatChange>,
}

impl Applied {
    /// Whether nothing changed.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.stats.is_empty()
    }
}

/// Apply `effect` to the player: add, then remove, then adjust stats.
///
/// Adding a held item is a no-op, removing an absent one is a no-op, and stat
/// deltas are unbounded in both directions.
pub fn apply(effect: &Effect, player: &mut PlayerState) -> Applied {
    let mut applied = Applied::default();

    for item in effect.add.iter().flatten() {
        if player.add_item(item.as_str()) {
            applied.added.push(item.clone());
        }
    }

    for item in effect.remove.iter().flatten() {
        if player.remove_item(item) {
            applied.removed.push(item.clone());
        }
    }

    for (stat, delta) in effect.stats.iter().flatten() {
        let value = player.adjust_stat(stat.as_str(), *delta);
        applied.stats.push(StatChange {
            stat: stat.clone(),
            delta: *delta,
            value,
        });
    }

    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn add_remove_and_stats() {
        let mut player = PlayerState::default();
        player.add_item("lockpick");

        let effect = Effect::default()
            .with_add("gem")
            .with_remove("lockpick")
            .with_stat("notoriety", 2);
        let applied = apply(&effect, &mut player);

        assert_eq!(player.inventory, vec!["gem".to_string()]);
        assert_eq!(player.stat("notoriety"), 2);
        assert_eq!(applied.added, vec!["gem".to_string()]);
        assert_eq!(applied.removed, vec!["lockpick".to_string()]);
        assert_eq!(
            applied.stats,
            vec![StatChange {
                stat: "notoriety".into(),
                delta: 2,
                value: 2
            }]
        );
    }

    #[test]
    fn add_then_remove_same_item() {
        let mut player = PlayerState::default();
        let effect = Effect::default().with_add("decoy").with_remove("decoy");
        apply(&effect, &mut player);
        assert!(!player.has_item("decoy"));
    }

    #[test]
    fn duplicate_adds_in_one_effect() {
        let mut player = PlayerState::default();
        let effect = Effect::default().with_add("gem").with_add("gem");
        let applied = apply(&effect, &mut player);
        assert_eq!(player.inventory.len(), 1);
        assert_eq!(applied.added.len(), 1);
    }

    #[test]
    fn stealth_goes_negative() {
        let mut player = PlayerState::default();
        apply(&Effect::default().with_stat("stealth", -10), &mut player);
        assert_eq!(player.stat("stealth"), -5);
    }

    #[test]
    fn empty_effect_changes_nothing() {
        let mut player = PlayerState::default();
        let before = player.clone();
        let applied = apply(&Effect::default(), &mut player);
        assert!(applied.is_empty());
        assert_eq!(player, before);
    }

    proptest! {
        #[test]
        fn add_is_idempotent(
            held in proptest::collection::vec("[a-f]", 0..6),
            added in proptest::collection::vec("[a-f]", 0..4),
        ) {
            let mut player = PlayerState::default();
            for item in &held {
                player.add_item(item.clone());
            }
            let effect = Effect { add: Some(added), ..Effect::default() };

            apply(&effect, &mut player);
            let once = player.clone();
            apply(&effect, &mut player);
            prop_assert_eq!(player, once);
        }

        #[test]
        fn removing_absent_item_is_noop(held in proptest::collection::vec("[a-f]", 0..6)) {
            let mut player = PlayerState::default();
            for item in &held {
                player.add_item(item.clone());
            }
            let before = player.clone();
            let applied = apply(&Effect::default().with_remove("zz"), &mut player);
            prop_assert!(applied.removed.is_empty());
            prop_assert_eq!(player, before);
        }

        #[test]
        fn stat_deltas_add_up(start in -50i64..50, a in -50i64..50, b in -50i64..50) {
            let mut player = PlayerState::default();
            player.stats.insert("notoriety".into(), start);
            apply(&Effect::default().with_stat("notoriety", a), &mut player);
            apply(&Effect::default().with_stat("notoriety", b), &mut player);
            prop_assert_eq!(player.stat("notoriety"), start + a + b);
        }
    }
}
