//! Enhancement selector: picks the best affordable bundle of numeric bonus
//! plus special abilities for one equipment slot.
//!
//! The candidate space is every `(bonus 1..=5) × (ability subset)` whose total
//! bonus levels stay within the price curve and whose full item cost fits the
//! budget. The selector maximizes total bonus levels, then the numeric bonus,
//! then a fixed per-archetype ability preference; it contains no randomness
//! and is bit-identical for identical inputs.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::budget::item_enhancement_total_cost;
use crate::catalog::{
    ability_preference, AbilityCost, AbilityRestriction, Catalog, ChosenAbility, ClassArchetype,
    EnhancementSlot,
};
use crate::{config, OutfitterResult};

/// The enhancement bundle chosen for one equipment slot. Computed once per
/// loadout generation and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancementSelection {
    /// Numeric enhancement bonus, +1..+5
    pub bonus: u8,
    /// Special abilities on the item, in catalog order
    pub abilities: Vec<ChosenAbility>,
    /// Numeric bonus plus summed ability costs
    pub total_bonus_levels: u8,
    /// Full item price, masterwork fee included
    pub cost: u32,
}

/// One buyable form of an ability: a flat ability, or one tier of a
/// variable-strength one.
struct AbilityOption {
    id: String,
    tier: Option<u8>,
    levels: u8,
    conflicts_with: Vec<String>,
    preference_rank: u32,
}

impl AbilityOption {
    fn chosen(&self) -> ChosenAbility {
        match self.tier {
            None => ChosenAbility::Named(self.id.clone()),
            Some(tier) => ChosenAbility::Leveled {
                key: self.id.clone(),
                tier,
            },
        }
    }
}

/// An ability subset reachable within the bonus-level ceiling.
struct Composition {
    levels: u8,
    preference_score: u32,
    abilities: Vec<ChosenAbility>,
    /// Sorted ids, the final determinism tie-break
    sorted_ids: Vec<String>,
}

/// Picks the best affordable enhancement for `slot`, or `None` when the slot
/// is below its level gate or nothing is affordable. The budget is never
/// exceeded; an unaffordable slot is a normal outcome, not an error.
///
/// `exclusions` removes ability ids already granted elsewhere (e.g. a paired
/// armor's abilities when selecting a shield) before the search runs.
pub fn select_best_enhancement(
    slot: EnhancementSlot,
    level: u8,
    archetype: ClassArchetype,
    budget: u32,
    exclusions: &HashSet<String>,
    catalog: &Catalog,
) -> OutfitterResult<Option<EnhancementSelection>> {
    if level < slot.min_level() {
        return Ok(None);
    }

    let category = slot.pricing();

    // Largest total bonus levels the budget can pay for on this curve
    let mut max_levels = None;
    for levels in (1..=config::MAX_TOTAL_BONUS_LEVELS).rev() {
        if item_enhancement_total_cost(category, levels)? <= budget {
            max_levels = Some(levels);
            break;
        }
    }
    let max_levels = match max_levels {
        Some(levels) => levels,
        None => return Ok(None),
    };

    let options = build_options(slot, archetype, exclusions, catalog);
    let compositions = enumerate_compositions(&options, config::MAX_TOTAL_BONUS_LEVELS - 1);

    // Highest achievable total wins; the numeric bonus makes 1..=5 of it
    for total in (1..=max_levels).rev() {
        let mut best: Option<(&Composition, u8)> = None;
        for composition in &compositions {
            if composition.levels >= total {
                continue;
            }
            let bonus = total - composition.levels;
            if bonus > config::MAX_NUMERIC_BONUS {
                continue;
            }
            let better = match best {
                None => true,
                Some((current, current_bonus)) => {
                    (
                        std::cmp::Reverse(bonus),
                        composition.preference_score,
                        &composition.sorted_ids,
                    ) < (
                        std::cmp::Reverse(current_bonus),
                        current.preference_score,
                        &current.sorted_ids,
                    )
                }
            };
            if better {
                best = Some((composition, bonus));
            }
        }
        if let Some((composition, bonus)) = best {
            return Ok(Some(EnhancementSelection {
                bonus,
                abilities: composition.abilities.clone(),
                total_bonus_levels: total,
                cost: item_enhancement_total_cost(category, total)?,
            }));
        }
    }

    Ok(None)
}

/// Expands the catalog into buyable options for one slot, dropping excluded
/// and slot-restricted abilities up front.
fn build_options(
    slot: EnhancementSlot,
    archetype: ClassArchetype,
    exclusions: &HashSet<String>,
    catalog: &Catalog,
) -> Vec<Vec<AbilityOption>> {
    let category = slot.pricing();
    let preference = ability_preference(archetype, category);
    let rank_of = |id: &str, catalog_index: usize| -> u32 {
        preference
            .iter()
            .position(|preferred| *preferred == id)
            .map(|rank| rank as u32)
            .unwrap_or(preference.len() as u32 + catalog_index as u32)
    };

    catalog
        .abilities(category)
        .iter()
        .enumerate()
        .filter(|(_, ability)| match ability.restriction {
            AbilityRestriction::None => true,
            AbilityRestriction::ArmorOnly => slot == EnhancementSlot::Armor,
            AbilityRestriction::ShieldOnly => slot == EnhancementSlot::Shield,
        })
        .filter(|(_, ability)| !exclusions.contains(&ability.id))
        .map(|(index, ability)| {
            let rank = rank_of(&ability.id, index);
            match &ability.cost {
                AbilityCost::Flat(levels) => vec![AbilityOption {
                    id: ability.id.clone(),
                    tier: None,
                    levels: *levels,
                    conflicts_with: ability.conflicts_with.clone(),
                    preference_rank: rank,
                }],
                AbilityCost::Tiered(costs) => costs
                    .iter()
                    .enumerate()
                    .map(|(tier_index, levels)| AbilityOption {
                        id: ability.id.clone(),
                        tier: Some(tier_index as u8 + 1),
                        levels: *levels,
                        conflicts_with: ability.conflicts_with.clone(),
                        preference_rank: rank,
                    })
                    .collect(),
            }
        })
        .collect()
}

/// Depth-first enumeration of conflict-free ability subsets with total cost
/// at most `ceiling`. At most one tier of any ability is taken. The catalog
/// is small, so exhaustive enumeration stays cheap.
fn enumerate_compositions(options: &[Vec<AbilityOption>], ceiling: u8) -> Vec<Composition> {
    let mut compositions = Vec::new();
    let mut chosen: Vec<&AbilityOption> = Vec::new();
    walk(options, 0, ceiling, &mut chosen, &mut compositions);
    compositions
}

fn walk<'a>(
    options: &'a [Vec<AbilityOption>],
    index: usize,
    ceiling: u8,
    chosen: &mut Vec<&'a AbilityOption>,
    out: &mut Vec<Composition>,
) {
    if index == options.len() {
        let mut sorted_ids: Vec<String> =
            chosen.iter().map(|option| option.id.clone()).collect();
        sorted_ids.sort();
        out.push(Composition {
            levels: chosen.iter().map(|option| option.levels).sum(),
            preference_score: chosen
                .iter()
                .map(|option| option.preference_rank + 1)
                .sum(),
            abilities: chosen.iter().map(|option| option.chosen()).collect(),
            sorted_ids,
        });
        return;
    }

    // Skip this ability entirely
    walk(options, index + 1, ceiling, chosen, out);

    let used: u8 = chosen.iter().map(|option| option.levels).sum();
    for option in &options[index] {
        if used + option.levels > ceiling {
            continue;
        }
        let conflicted = chosen.iter().any(|picked| {
            picked.conflicts_with.contains(&option.id)
                || option.conflicts_with.contains(&picked.id)
        });
        if conflicted {
            continue;
        }
        chosen.push(option);
        walk(options, index + 1, ceiling, chosen, out);
        chosen.pop();
    }
}
