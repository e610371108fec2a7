//! Consumable priority lists.
//!
//! Which wands, scrolls, and potions a character stocks is configuration
//! data, not engine logic: the selector works against any well-formed list.
//! This module defines the list entry type and the built-in per-archetype
//! defaults, priced through [`crate::budget::consumable_cost`].

use serde::{Deserialize, Serialize};

use crate::budget::{consumable_cost, POTION_MULTIPLIER, SCROLL_MULTIPLIER, WAND_MULTIPLIER};

/// Cap class of a consumable. Healing items share one aggregate quantity cap
/// across a fill in addition to a per-item cap; utility items only have a
/// (lower) per-item cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsumableKind {
    Healing,
    Utility,
}

/// Physical form of a consumable, each with its own sub-budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsumableForm {
    Wand,
    Scroll,
    Potion,
}

impl ConsumableForm {
    /// Pricing multiplier for this form (spell level × caster level × this).
    pub fn multiplier(self) -> u32 {
        match self {
            ConsumableForm::Wand => WAND_MULTIPLIER,
            ConsumableForm::Scroll => SCROLL_MULTIPLIER,
            ConsumableForm::Potion => POTION_MULTIPLIER,
        }
    }
}

/// One entry of a consumable priority list, best first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumablePriority {
    pub id: String,
    pub unit_cost: u32,
    /// Quantity pass 1 guarantees when the full minimum stock is affordable
    pub min_quantity: u32,
    pub kind: ConsumableKind,
}

impl ConsumablePriority {
    /// Builds an entry priced from its spell and caster level.
    pub fn from_spell(
        id: &str,
        form: ConsumableForm,
        spell_level: u8,
        caster_level: u8,
        min_quantity: u32,
        kind: ConsumableKind,
    ) -> Self {
        Self {
            id: id.to_string(),
            unit_cost: consumable_cost(spell_level, caster_level, form.multiplier()),
            min_quantity,
            kind,
        }
    }
}

/// Default wand priorities per consumable archetype.
pub(crate) fn default_wand_priorities(
    archetype: crate::catalog::ConsumableArchetype,
) -> Vec<ConsumablePriority> {
    use crate::catalog::ConsumableArchetype::*;
    use ConsumableForm::Wand;
    use ConsumableKind::*;
    match archetype {
        FullCaster => vec![
            ConsumablePriority::from_spell("wand-of-cure-light-wounds", Wand, 1, 1, 1, Healing),
            ConsumablePriority::from_spell("wand-of-magic-missile", Wand, 1, 1, 0, Utility),
            ConsumablePriority::from_spell("wand-of-shield", Wand, 1, 1, 0, Utility),
        ],
        PartialCaster => vec![
            ConsumablePriority::from_spell("wand-of-cure-light-wounds", Wand, 1, 1, 1, Healing),
            ConsumablePriority::from_spell("wand-of-bless", Wand, 1, 1, 0, Utility),
        ],
        // Martials stock a healing wand for whoever in the party can use it
        Martial => vec![ConsumablePriority::from_spell(
            "wand-of-cure-light-wounds",
            Wand,
            1,
            1,
            1,
            Healing,
        )],
    }
}

/// Default scroll priorities per consumable archetype.
pub(crate) fn default_scroll_priorities(
    archetype: crate::catalog::ConsumableArchetype,
) -> Vec<ConsumablePriority> {
    use crate::catalog::ConsumableArchetype::*;
    use ConsumableForm::Scroll;
    use ConsumableKind::*;
    match archetype {
        FullCaster => vec![
            ConsumablePriority::from_spell("scroll-of-lesser-restoration", Scroll, 2, 3, 1, Healing),
            ConsumablePriority::from_spell("scroll-of-dispel-magic", Scroll, 3, 5, 1, Utility),
            ConsumablePriority::from_spell("scroll-of-fireball", Scroll, 3, 5, 0, Utility),
            ConsumablePriority::from_spell("scroll-of-teleport", Scroll, 5, 9, 0, Utility),
        ],
        PartialCaster => vec![
            ConsumablePriority::from_spell("scroll-of-lesser-restoration", Scroll, 2, 3, 1, Healing),
            ConsumablePriority::from_spell("scroll-of-remove-paralysis", Scroll, 2, 3, 0, Utility),
        ],
        // Scrolls are useless without a caster level; the martial scroll
        // budget is zero so this list is never reached in practice
        Martial => Vec::new(),
    }
}

/// Default potion priorities per consumable archetype.
pub(crate) fn default_potion_priorities(
    archetype: crate::catalog::ConsumableArchetype,
) -> Vec<ConsumablePriority> {
    use crate::catalog::ConsumableArchetype::*;
    use ConsumableForm::Potion;
    use ConsumableKind::*;
    match archetype {
        FullCaster => vec![
            ConsumablePriority::from_spell("potion-of-cure-light-wounds", Potion, 1, 1, 2, Healing),
            ConsumablePriority::from_spell("potion-of-invisibility", Potion, 2, 3, 0, Utility),
        ],
        PartialCaster => vec![
            ConsumablePriority::from_spell("potion-of-cure-light-wounds", Potion, 1, 1, 2, Healing),
            ConsumablePriority::from_spell("potion-of-cure-moderate-wounds", Potion, 2, 3, 0, Healing),
            ConsumablePriority::from_spell("potion-of-barkskin", Potion, 2, 3, 0, Utility),
        ],
        Martial => vec![
            ConsumablePriority::from_spell("potion-of-cure-light-wounds", Potion, 1, 1, 2, Healing),
            ConsumablePriority::from_spell("potion-of-cure-moderate-wounds", Potion, 2, 3, 1, Healing),
            ConsumablePriority::from_spell("potion-of-haste", Potion, 3, 5, 0, Utility),
            ConsumablePriority::from_spell("potion-of-barkskin", Potion, 2, 3, 0, Utility),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ConsumableArchetype;

    #[test]
    fn test_from_spell_pricing() {
        let wand = ConsumablePriority::from_spell(
            "wand-of-cure-light-wounds",
            ConsumableForm::Wand,
            1,
            1,
            1,
            ConsumableKind::Healing,
        );
        assert_eq!(wand.unit_cost, 750);

        let potion = ConsumablePriority::from_spell(
            "potion-of-cure-moderate-wounds",
            ConsumableForm::Potion,
            2,
            3,
            0,
            ConsumableKind::Healing,
        );
        assert_eq!(potion.unit_cost, 300);
    }

    #[test]
    fn test_every_archetype_guarantees_some_healing() {
        use ConsumableArchetype::*;
        for archetype in [FullCaster, PartialCaster, Martial] {
            let guaranteed_healing = default_wand_priorities(archetype)
                .into_iter()
                .chain(default_potion_priorities(archetype))
                .any(|entry| entry.kind == ConsumableKind::Healing && entry.min_quantity > 0);
            assert!(guaranteed_healing, "{archetype:?}");
        }
    }

    #[test]
    fn test_lists_are_well_formed() {
        use ConsumableArchetype::*;
        for archetype in [FullCaster, PartialCaster, Martial] {
            for list in [
                default_wand_priorities(archetype),
                default_scroll_priorities(archetype),
                default_potion_priorities(archetype),
            ] {
                for entry in list {
                    assert!(entry.unit_cost > 0);
                    assert!(!entry.id.is_empty());
                }
            }
        }
    }
}
