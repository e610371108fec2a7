//! Wondrous item selector: fills the big-six slots first, then spends the
//! pooled leftovers on the utility priority list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, ClassArchetype, StatItemDefinition, SLOTLESS};
use crate::loadout::{DecisionEvent, LoadoutObserver, SkipReason};
use crate::config;

/// One wondrous item placed in the loadout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChosenWondrous {
    pub id: String,
    pub name: String,
    pub slot: String,
    pub price: u32,
    /// Bonus tier for big-six items; utility items have none
    pub bonus: Option<u8>,
}

/// The complete wondrous phase result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WondrousSelection {
    pub items: Vec<ChosenWondrous>,
    pub total_cost: u32,
}

/// Fills the big-six wondrous slots and then the utility list.
///
/// `stat_variant` is the cosmetic pick the assembler already made among the
/// archetype's equally valid stat-booster variants; the selector itself stays
/// deterministic. Leftover gold from all three phase-1 categories is pooled
/// for phase 2. At most one item ever occupies a non-slotless slot.
#[allow(clippy::too_many_arguments)]
pub fn select_wondrous(
    level: u8,
    _archetype: ClassArchetype,
    stat_budget: u32,
    resistance_budget: u32,
    ring_budget: u32,
    amulet_budget: u32,
    stat_variant: Option<&StatItemDefinition>,
    catalog: &Catalog,
    observer: &mut dyn LoadoutObserver,
) -> WondrousSelection {
    let mut selection = WondrousSelection::default();
    let mut occupied: HashSet<String> = HashSet::new();
    let mut leftover: u32 = 0;

    // Phase 1: the big six. Each slot buys the highest bonus it can afford
    // within its own sub-budget; unspent gold rolls into the utility pool.
    let mut spent_on_stat = 0;
    if stat_budget >= config::STAT_ITEM_FLOOR {
        if let Some(variant) = stat_variant {
            if let Some(tier) = variant.best_affordable(stat_budget) {
                spent_on_stat = tier.price;
                occupied.insert(variant.slot.clone());
                push_chosen(
                    &mut selection,
                    variant.id.clone(),
                    variant.name.clone(),
                    variant.slot.clone(),
                    tier.price,
                    Some(tier.bonus),
                    observer,
                );
            }
        }
    }
    leftover += stat_budget - spent_on_stat;

    for (definition, budget) in [
        (&catalog.resistance_cloak, resistance_budget),
        (&catalog.protection_ring, ring_budget),
        (&catalog.natural_armor_amulet, amulet_budget),
    ] {
        let mut spent = 0;
        if let Some(tier) = definition.best_affordable(budget) {
            spent = tier.price;
            occupied.insert(definition.slot.clone());
            push_chosen(
                &mut selection,
                definition.id.clone(),
                definition.name.clone(),
                definition.slot.clone(),
                tier.price,
                Some(tier.bonus),
                observer,
            );
        }
        leftover += budget - spent;
    }

    // Every character with enough leftover gets basic portable storage,
    // independent of the priority list.
    let container = &catalog.bottomless_container;
    if leftover >= container.price {
        leftover -= container.price;
        push_chosen(
            &mut selection,
            container.id.clone(),
            container.name.clone(),
            container.slot.clone(),
            container.price,
            None,
            observer,
        );
    }

    // Phase 2: utility list in priority order.
    let mut families: HashSet<String> = HashSet::new();
    let mut bought = 0usize;
    for item in &catalog.utility_items {
        if leftover < config::UTILITY_TERMINAL_THRESHOLD || bought >= config::MAX_UTILITY_ITEMS {
            break;
        }
        if level < item.min_level {
            observer.on_decision(&DecisionEvent::WondrousSkipped {
                id: item.id.clone(),
                reason: SkipReason::BelowLevelGate,
            });
            continue;
        }
        if item.slot != SLOTLESS && occupied.contains(&item.slot) {
            observer.on_decision(&DecisionEvent::WondrousSkipped {
                id: item.id.clone(),
                reason: SkipReason::SlotOccupied,
            });
            continue;
        }
        if let Some(family) = &item.family {
            if families.contains(family) {
                observer.on_decision(&DecisionEvent::WondrousSkipped {
                    id: item.id.clone(),
                    reason: SkipReason::FamilyAlreadyChosen,
                });
                continue;
            }
        }
        if item.price > leftover {
            observer.on_decision(&DecisionEvent::WondrousSkipped {
                id: item.id.clone(),
                reason: SkipReason::InsufficientBudget,
            });
            continue;
        }

        leftover -= item.price;
        bought += 1;
        if item.slot != SLOTLESS {
            occupied.insert(item.slot.clone());
        }
        if let Some(family) = &item.family {
            families.insert(family.clone());
        }
        push_chosen(
            &mut selection,
            item.id.clone(),
            item.name.clone(),
            item.slot.clone(),
            item.price,
            None,
            observer,
        );
    }

    selection
}

fn push_chosen(
    selection: &mut WondrousSelection,
    id: String,
    name: String,
    slot: String,
    price: u32,
    bonus: Option<u8>,
    observer: &mut dyn LoadoutObserver,
) {
    observer.on_decision(&DecisionEvent::WondrousChosen {
        id: id.clone(),
        slot: slot.clone(),
        price,
    });
    selection.total_cost += price;
    selection.items.push(ChosenWondrous {
        id,
        name,
        slot,
        price,
        bonus,
    });
}
