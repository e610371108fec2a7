//! Property tests for the engine's budget and selection invariants.

use std::collections::HashSet;

use proptest::prelude::*;

use outfitter::{
    assemble, config, partition, select_best_enhancement, select_consumables, Catalog,
    ClassArchetype, ConsumableArchetype, ConsumableKind, ConsumablePriority, EnhancementSlot,
    LoadoutRequest, NullObserver, PercentOverrides,
};

fn archetype_strategy() -> impl Strategy<Value = ClassArchetype> {
    prop_oneof![
        Just(ClassArchetype::Martial),
        Just(ClassArchetype::Caster),
        Just(ClassArchetype::HybridMartialCaster),
    ]
}

fn consumable_archetype_strategy() -> impl Strategy<Value = ConsumableArchetype> {
    prop_oneof![
        Just(ConsumableArchetype::FullCaster),
        Just(ConsumableArchetype::PartialCaster),
        Just(ConsumableArchetype::Martial),
    ]
}

proptest! {
    /// Every category budget is non-negative and bounded by the total, and
    /// children never sum past their parent.
    #[test]
    fn prop_partition_is_well_formed(
        total in 0u32..=2_000_000,
        archetype in archetype_strategy(),
        consumable_archetype in consumable_archetype_strategy(),
        level in 1u8..=20,
    ) {
        let budgets = partition(
            total,
            archetype,
            consumable_archetype,
            level,
            &PercentOverrides::default(),
        )
        .unwrap();

        for amount in [
            budgets.weapon,
            budgets.armor,
            budgets.stat_item,
            budgets.resistance,
            budgets.protection,
            budgets.consumables,
        ] {
            prop_assert!(amount <= total);
        }
        prop_assert!(budgets.primary_weapon + budgets.secondary_weapon <= budgets.weapon);
        prop_assert!(budgets.shield + budgets.armor_only <= budgets.armor);
        prop_assert!(budgets.ring + budgets.amulet <= budgets.protection);
        let consumable = budgets.consumable;
        prop_assert!(
            consumable.wand + consumable.scroll + consumable.potion <= budgets.consumables
        );
    }

    /// The enhancement selector never overspends and never exceeds the
    /// bonus-level ceiling, for any budget.
    #[test]
    fn prop_enhancement_never_overspends(
        budget in 0u32..=400_000,
        level in 1u8..=20,
        archetype in archetype_strategy(),
    ) {
        let catalog = Catalog::srd_default();
        for slot in [
            EnhancementSlot::Weapon,
            EnhancementSlot::SecondaryWeapon,
            EnhancementSlot::Armor,
            EnhancementSlot::Shield,
        ] {
            let selection = select_best_enhancement(
                slot,
                level,
                archetype,
                budget,
                &HashSet::new(),
                &catalog,
            )
            .unwrap();
            if let Some(selection) = selection {
                prop_assert!(selection.cost <= budget);
                prop_assert!(
                    selection.total_bonus_levels <= config::MAX_TOTAL_BONUS_LEVELS
                );
                prop_assert!(selection.bonus >= 1);
                prop_assert!(selection.bonus <= config::MAX_NUMERIC_BONUS);
            }
        }
    }

    /// The enhancement selector is deterministic.
    #[test]
    fn prop_enhancement_is_deterministic(
        budget in 0u32..=400_000,
        level in 1u8..=20,
        archetype in archetype_strategy(),
    ) {
        let catalog = Catalog::srd_default();
        let run = || {
            select_best_enhancement(
                EnhancementSlot::Weapon,
                level,
                archetype,
                budget,
                &HashSet::new(),
                &catalog,
            )
            .unwrap()
        };
        prop_assert_eq!(run(), run());
    }

    /// The consumable fill respects every cap and accounts for every coin.
    #[test]
    fn prop_consumable_fill_respects_caps(
        budget in 0u32..=100_000,
        unit_costs in prop::collection::vec(1u32..=2_000, 1..=8),
    ) {
        let priorities: Vec<ConsumablePriority> = unit_costs
            .iter()
            .enumerate()
            .map(|(index, unit_cost)| ConsumablePriority {
                id: format!("consumable-{index}"),
                unit_cost: *unit_cost,
                min_quantity: (index % 3) as u32,
                kind: if index % 2 == 0 {
                    ConsumableKind::Healing
                } else {
                    ConsumableKind::Utility
                },
            })
            .collect();

        let fill = select_consumables(budget, &priorities, &mut NullObserver);
        prop_assert!(fill.total_cost <= budget);
        prop_assert_eq!(fill.total_cost + fill.remaining, budget);

        let mut healing_total = 0;
        for item in &fill.items {
            let entry = priorities.iter().find(|entry| entry.id == item.id).unwrap();
            match entry.kind {
                ConsumableKind::Healing => {
                    prop_assert!(item.quantity <= config::HEALING_ITEM_CAP);
                    healing_total += item.quantity;
                }
                ConsumableKind::Utility => {
                    prop_assert!(item.quantity <= config::UTILITY_ITEM_CAP);
                }
            }
        }
        prop_assert!(healing_total <= config::HEALING_AGGREGATE_CAP);
    }

    /// The assembled loadout never costs more than the wealth that paid for
    /// it, for any class string.
    #[test]
    fn prop_assemble_never_overspends(
        level in 1u8..=20,
        wealth in 0u32..=1_000_000,
        class in "[a-z]{3,12}",
        seed in any::<u64>(),
    ) {
        let catalog = Catalog::srd_default();
        let result = assemble(
            &LoadoutRequest {
                cosmetic_seed: seed,
                ..LoadoutRequest::new(level, class, wealth)
            },
            &catalog,
            &mut NullObserver,
        )
        .unwrap();
        prop_assert!(result.total_cost <= wealth);
        prop_assert_eq!(result.remaining_budget, wealth - result.total_cost);
    }
}
