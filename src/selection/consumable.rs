//! Consumable selector: a two-phase greedy picker for one wand, scroll, or
//! potion sub-budget.
//!
//! Pass 1 guarantees minimum stock of the top-priority entries. Pass 2 buys
//! one unit per pass of the first affordable un-capped entry, restarting the
//! scan after every purchase so priority order, not item order, governs
//! growth. A fixed pass ceiling bounds worst-case iteration; with sane caps
//! it is never hit.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalog::{ConsumableKind, ConsumablePriority};
use crate::config;
use crate::loadout::{DecisionEvent, LoadoutObserver};

/// Recommended stock of one consumable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumableRecommendation {
    pub id: String,
    pub cost_per_unit: u32,
    pub quantity: u32,
}

/// Result of filling one consumable sub-budget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumableFill {
    /// Entries with non-zero quantity, in priority order
    pub items: Vec<ConsumableRecommendation>,
    pub total_cost: u32,
    pub remaining: u32,
    /// True when the pass ceiling stopped the fill (diagnostic, not failure)
    pub hit_pass_ceiling: bool,
}

fn per_item_cap(kind: ConsumableKind) -> u32 {
    match kind {
        ConsumableKind::Healing => config::HEALING_ITEM_CAP,
        ConsumableKind::Utility => config::UTILITY_ITEM_CAP,
    }
}

/// Fills `budget` against a priority list, best first.
///
/// Quantities never exceed the per-item caps, healing entries never exceed
/// the shared aggregate cap, and the fill always terminates within the pass
/// ceiling. Budget insufficiency is silent: entries that don't fit are simply
/// left at zero.
pub fn select_consumables(
    budget: u32,
    priorities: &[ConsumablePriority],
    observer: &mut dyn LoadoutObserver,
) -> ConsumableFill {
    let mut remaining = budget;
    let mut quantities = vec![0u32; priorities.len()];
    let mut healing_total = 0u32;

    // Pass 1: guarantee minimum stock in priority order
    for (index, entry) in priorities.iter().enumerate() {
        let mut quantity = entry.min_quantity.min(per_item_cap(entry.kind));
        if entry.kind == ConsumableKind::Healing {
            quantity = quantity.min(config::HEALING_AGGREGATE_CAP - healing_total);
        }
        if quantity == 0 {
            continue;
        }
        let cost = entry.unit_cost * quantity;
        if cost > remaining {
            continue;
        }
        remaining -= cost;
        quantities[index] = quantity;
        if entry.kind == ConsumableKind::Healing {
            healing_total += quantity;
        }
        observer.on_decision(&DecisionEvent::ConsumableCommitted {
            id: entry.id.clone(),
            quantity,
            cost,
        });
    }

    // Pass 2: one unit per pass of the first affordable un-capped entry
    let mut hit_pass_ceiling = false;
    let mut passes = 0;
    loop {
        if passes == config::MAX_FILL_PASSES {
            hit_pass_ceiling = can_still_buy(priorities, &quantities, healing_total, remaining);
            if hit_pass_ceiling {
                debug!("consumable fill stopped at the pass ceiling ({passes} passes)");
                observer.on_decision(&DecisionEvent::PassCeilingReached { passes });
            }
            break;
        }
        passes += 1;

        let mut bought = false;
        for (index, entry) in priorities.iter().enumerate() {
            if entry.unit_cost > remaining {
                continue;
            }
            if quantities[index] >= per_item_cap(entry.kind) {
                continue;
            }
            if entry.kind == ConsumableKind::Healing
                && healing_total >= config::HEALING_AGGREGATE_CAP
            {
                continue;
            }
            remaining -= entry.unit_cost;
            quantities[index] += 1;
            if entry.kind == ConsumableKind::Healing {
                healing_total += 1;
            }
            observer.on_decision(&DecisionEvent::ConsumableCommitted {
                id: entry.id.clone(),
                quantity: 1,
                cost: entry.unit_cost,
            });
            bought = true;
            break;
        }
        if !bought {
            break;
        }
    }

    let items: Vec<ConsumableRecommendation> = priorities
        .iter()
        .zip(&quantities)
        .filter(|(_, quantity)| **quantity > 0)
        .map(|(entry, quantity)| ConsumableRecommendation {
            id: entry.id.clone(),
            cost_per_unit: entry.unit_cost,
            quantity: *quantity,
        })
        .collect();

    ConsumableFill {
        items,
        total_cost: budget - remaining,
        remaining,
        hit_pass_ceiling,
    }
}

fn can_still_buy(
    priorities: &[ConsumablePriority],
    quantities: &[u32],
    healing_total: u32,
    remaining: u32,
) -> bool {
    priorities.iter().enumerate().any(|(index, entry)| {
        entry.unit_cost <= remaining
            && quantities[index] < per_item_cap(entry.kind)
            && (entry.kind != ConsumableKind::Healing
                || healing_total < config::HEALING_AGGREGATE_CAP)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loadout::{NullObserver, RecordingObserver};

    fn entry(id: &str, unit_cost: u32, min_quantity: u32, kind: ConsumableKind) -> ConsumablePriority {
        ConsumablePriority {
            id: id.to_string(),
            unit_cost,
            min_quantity,
            kind,
        }
    }

    #[test]
    fn test_empty_list_spends_nothing() {
        let fill = select_consumables(5_000, &[], &mut NullObserver);
        assert!(fill.items.is_empty());
        assert_eq!(fill.remaining, 5_000);
        assert!(!fill.hit_pass_ceiling);
    }

    #[test]
    fn test_minimums_exactly_consume_the_budget() {
        // min_quantity × unit_cost equals the budget: pass 1 buys it all and
        // pass 2 never purchases
        let priorities = [entry("wand-of-cure-light-wounds", 750, 4, ConsumableKind::Healing)];
        let mut observer = RecordingObserver::new();
        let fill = select_consumables(3_000, &priorities, &mut observer);
        assert_eq!(fill.items.len(), 1);
        assert_eq!(fill.items[0].quantity, 4);
        assert_eq!(fill.remaining, 0);
        assert_eq!(fill.total_cost, 3_000);
        // One committed event: the single pass-1 purchase
        assert_eq!(observer.events.len(), 1);
    }

    #[test]
    fn test_unaffordable_minimum_is_skipped_whole() {
        let priorities = [
            entry("expensive", 4_000, 2, ConsumableKind::Utility),
            entry("cheap", 100, 1, ConsumableKind::Utility),
        ];
        let fill = select_consumables(5_000, &priorities, &mut NullObserver);
        // Pass 1 skips the 8,000 minimum but commits the cheap one; pass 2
        // then grows the top-priority entry first
        let expensive = fill.items.iter().find(|item| item.id == "expensive").unwrap();
        assert!(expensive.quantity >= 1);
    }

    #[test]
    fn test_priority_order_governs_growth() {
        let priorities = [
            entry("first", 100, 0, ConsumableKind::Utility),
            entry("second", 100, 0, ConsumableKind::Utility),
        ];
        let fill = select_consumables(300, &priorities, &mut NullObserver);
        // The first entry caps out before the second sees a single unit
        assert_eq!(fill.items[0].id, "first");
        assert_eq!(fill.items[0].quantity, 3.min(crate::config::UTILITY_ITEM_CAP));
    }

    #[test]
    fn test_healing_aggregate_cap_holds() {
        let priorities = [
            entry("potion-a", 50, 8, ConsumableKind::Healing),
            entry("potion-b", 50, 8, ConsumableKind::Healing),
        ];
        let fill = select_consumables(100_000, &priorities, &mut NullObserver);
        let healing_total: u32 = fill.items.iter().map(|item| item.quantity).sum();
        assert_eq!(healing_total, crate::config::HEALING_AGGREGATE_CAP);
        for item in &fill.items {
            assert!(item.quantity <= crate::config::HEALING_ITEM_CAP);
        }
        assert!(!fill.hit_pass_ceiling);
    }

    #[test]
    fn test_per_item_caps_hold_with_surplus_budget() {
        let priorities = [
            entry("utility-a", 10, 0, ConsumableKind::Utility),
            entry("utility-b", 10, 0, ConsumableKind::Utility),
        ];
        let fill = select_consumables(1_000_000, &priorities, &mut NullObserver);
        for item in &fill.items {
            assert_eq!(item.quantity, crate::config::UTILITY_ITEM_CAP);
        }
    }

    #[test]
    fn test_pass_ceiling_is_a_stop_not_an_error() {
        // More purchasable units than passes: the ceiling fires
        let priorities: Vec<ConsumablePriority> = (0..20)
            .map(|index| entry(&format!("item-{index}"), 1, 0, ConsumableKind::Utility))
            .collect();
        let mut observer = RecordingObserver::new();
        let fill = select_consumables(1_000_000, &priorities, &mut observer);
        assert!(fill.hit_pass_ceiling);
        assert_eq!(fill.total_cost, crate::config::MAX_FILL_PASSES);
        assert!(observer
            .events
            .iter()
            .any(|event| matches!(event, DecisionEvent::PassCeilingReached { .. })));
    }

    #[test]
    fn test_never_overspends() {
        let priorities = [
            entry("wand", 750, 1, ConsumableKind::Healing),
            entry("scroll", 375, 1, ConsumableKind::Utility),
        ];
        for budget in [0, 100, 750, 1_125, 2_000, 9_999] {
            let fill = select_consumables(budget, &priorities, &mut NullObserver);
            assert!(fill.total_cost <= budget);
            assert_eq!(fill.total_cost + fill.remaining, budget);
        }
    }
}
