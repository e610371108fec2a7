//! Loadout assembler: orchestrates the partitioner and the selectors in a
//! fixed sequence and aggregates the result.
//!
//! The sequence (weapon → shield → secondary weapon → armor → wondrous →
//! consumables) governs conflict exclusions, not budget contention: every
//! budget was already fixed by the partitioner. The armor bundle is computed
//! before the shield so its abilities can be excluded from the shield search.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::budget::{partition, CategoryBudgets, PercentOverrides};
use crate::catalog::{
    Catalog, ChosenAbility, ClassArchetype, ConsumableArchetype, ConsumableForm, EnhancementSlot,
    StatItemDefinition,
};
use crate::loadout::{DecisionEvent, LoadoutObserver};
use crate::selection::{
    select_best_enhancement, select_consumables, select_wondrous, ChosenWondrous,
    ConsumableRecommendation, EnhancementSelection,
};
use crate::{config, OutfitterResult};

/// Everything needed to compute one loadout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadoutRequest {
    pub level: u8,
    pub class: String,
    /// Total gold-piece wealth, from the external wealth-by-level table
    pub wealth: u32,
    #[serde(default)]
    pub overrides: PercentOverrides,
    /// Seed for cosmetic variety (stat-item variant choice). The same seed
    /// always produces the same loadout.
    #[serde(default)]
    pub cosmetic_seed: u64,
}

impl LoadoutRequest {
    pub fn new(level: u8, class: impl Into<String>, wealth: u32) -> Self {
        Self {
            level,
            class: class.into(),
            wealth,
            overrides: PercentOverrides::default(),
            cosmetic_seed: 0,
        }
    }
}

/// The complete, immutable loadout for one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadoutResult {
    pub level: u8,
    pub archetype: ClassArchetype,
    pub budgets: CategoryBudgets,
    pub weapon: Option<EnhancementSelection>,
    pub shield: Option<EnhancementSelection>,
    pub secondary_weapon: Option<EnhancementSelection>,
    pub armor: Option<EnhancementSelection>,
    pub wondrous: Vec<ChosenWondrous>,
    pub consumables: Vec<ConsumableRecommendation>,
    pub total_cost: u32,
    pub remaining_budget: u32,
}

impl LoadoutResult {
    /// The all-empty, zero-cost result returned below the magic-item floor.
    fn empty(level: u8, archetype: ClassArchetype, wealth: u32) -> Self {
        Self {
            level,
            archetype,
            budgets: CategoryBudgets::default(),
            weapon: None,
            shield: None,
            secondary_weapon: None,
            armor: None,
            wondrous: Vec::new(),
            consumables: Vec::new(),
            total_cost: 0,
            remaining_budget: wealth,
        }
    }

    /// True when nothing was selected at all.
    pub fn is_empty(&self) -> bool {
        self.weapon.is_none()
            && self.shield.is_none()
            && self.secondary_weapon.is_none()
            && self.armor.is_none()
            && self.wondrous.is_empty()
            && self.consumables.is_empty()
    }
}

/// Computes a complete loadout for one character.
///
/// Configuration-shape problems (malformed catalog, out-of-range overrides)
/// fail fast before any budget math; budget insufficiency never errors.
///
/// # Examples
///
/// ```
/// use outfitter::{assemble, Catalog, LoadoutRequest, NullObserver};
///
/// let catalog = Catalog::srd_default();
/// let result = assemble(
///     &LoadoutRequest::new(8, "fighter", 33_000),
///     &catalog,
///     &mut NullObserver,
/// )
/// .unwrap();
/// assert!(result.total_cost <= 33_000);
/// assert_eq!(result.remaining_budget, 33_000 - result.total_cost);
/// ```
pub fn assemble(
    request: &LoadoutRequest,
    catalog: &Catalog,
    observer: &mut dyn LoadoutObserver,
) -> OutfitterResult<LoadoutResult> {
    catalog.validate()?;
    request.overrides.validate()?;

    if ClassArchetype::try_from_class(&request.class).is_none() {
        observer.on_decision(&DecisionEvent::UnknownClassFallback {
            class: request.class.clone(),
        });
    }
    let archetype = ClassArchetype::from_class(&request.class);
    let consumable_archetype = ConsumableArchetype::from_class(&request.class);

    if request.level < config::MIN_MAGIC_ITEM_LEVEL {
        return Ok(LoadoutResult::empty(request.level, archetype, request.wealth));
    }

    let budgets = partition(
        request.wealth,
        archetype,
        consumable_archetype,
        request.level,
        &request.overrides,
    )?;
    for (category, amount) in [
        ("weapon", budgets.weapon),
        ("armor", budgets.armor),
        ("stat_item", budgets.stat_item),
        ("resistance", budgets.resistance),
        ("protection", budgets.protection),
        ("consumables", budgets.consumables),
    ] {
        observer.on_decision(&DecisionEvent::CategoryBudgeted { category, amount });
    }

    let no_exclusions = HashSet::new();
    let weapon = pick_enhancement(
        EnhancementSlot::Weapon,
        budgets.primary_weapon,
        &no_exclusions,
        request,
        archetype,
        catalog,
        observer,
    )?;

    // Armor precedes the shield internally so its abilities can be excluded
    let armor = pick_enhancement(
        EnhancementSlot::Armor,
        budgets.armor_only,
        &no_exclusions,
        request,
        archetype,
        catalog,
        observer,
    )?;
    let armor_abilities: HashSet<String> = armor
        .iter()
        .flat_map(|selection| selection.abilities.iter())
        .map(|ability: &ChosenAbility| ability.id().to_string())
        .collect();
    let shield = pick_enhancement(
        EnhancementSlot::Shield,
        budgets.shield,
        &armor_abilities,
        request,
        archetype,
        catalog,
        observer,
    )?;
    let secondary_weapon = pick_enhancement(
        EnhancementSlot::SecondaryWeapon,
        budgets.secondary_weapon,
        &no_exclusions,
        request,
        archetype,
        catalog,
        observer,
    )?;

    let mut cosmetic_rng = StdRng::seed_from_u64(request.cosmetic_seed);
    let stat_variant = pick_stat_variant(archetype, catalog, &mut cosmetic_rng);
    let wondrous = select_wondrous(
        request.level,
        archetype,
        budgets.stat_item,
        budgets.resistance,
        budgets.ring,
        budgets.amulet,
        stat_variant,
        catalog,
        observer,
    );

    let mut consumables: Vec<ConsumableRecommendation> = Vec::new();
    let mut consumable_cost_total = 0u32;
    for (form, budget) in [
        (ConsumableForm::Wand, budgets.consumable.wand),
        (ConsumableForm::Scroll, budgets.consumable.scroll),
        (ConsumableForm::Potion, budgets.consumable.potion),
    ] {
        let fill = select_consumables(
            budget,
            catalog.consumable_priorities(form, consumable_archetype),
            observer,
        );
        consumable_cost_total += fill.total_cost;
        consumables.extend(fill.items);
    }

    let enhancement_cost_total: u32 = [&weapon, &shield, &secondary_weapon, &armor]
        .iter()
        .filter_map(|selection| selection.as_ref().map(|s| s.cost))
        .sum();
    let total_cost = enhancement_cost_total + wondrous.total_cost + consumable_cost_total;

    Ok(LoadoutResult {
        level: request.level,
        archetype,
        budgets,
        weapon,
        shield,
        secondary_weapon,
        armor,
        wondrous: wondrous.items,
        consumables,
        total_cost,
        // Category budgets may legally sum past the total (front-loaded
        // tables); actual spend per category never exceeds its budget, so
        // this stays non-negative in any sane configuration
        remaining_budget: request.wealth.saturating_sub(total_cost),
    })
}

fn pick_enhancement(
    slot: EnhancementSlot,
    budget: u32,
    exclusions: &HashSet<String>,
    request: &LoadoutRequest,
    archetype: ClassArchetype,
    catalog: &Catalog,
    observer: &mut dyn LoadoutObserver,
) -> OutfitterResult<Option<EnhancementSelection>> {
    let selection = select_best_enhancement(
        slot,
        request.level,
        archetype,
        budget,
        exclusions,
        catalog,
    )?;
    match &selection {
        Some(chosen) => observer.on_decision(&DecisionEvent::EnhancementChosen {
            slot: slot.name(),
            bonus: chosen.bonus,
            total_bonus_levels: chosen.total_bonus_levels,
            cost: chosen.cost,
        }),
        None => observer.on_decision(&DecisionEvent::EnhancementSkipped { slot: slot.name() }),
    }
    Ok(selection)
}

/// Cosmetic pick among the archetype's equally valid stat-item variants.
/// Randomness lives here, behind an explicit seed, never in the selectors.
fn pick_stat_variant<'a>(
    archetype: ClassArchetype,
    catalog: &'a Catalog,
    rng: &mut StdRng,
) -> Option<&'a StatItemDefinition> {
    let variants: Vec<&StatItemDefinition> = catalog
        .stat_items
        .iter()
        .filter(|item| item.suits(archetype))
        .collect();
    if variants.is_empty() {
        return None;
    }
    Some(variants[rng.gen_range(0..variants.len())])
}
