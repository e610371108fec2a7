//! Wondrous item catalog types.
//!
//! The "big six" slots (stat booster, resistance cloak, protection ring,
//! natural-armor amulet) are tiered items whose price grows with the bonus;
//! everything else is a flat-priced utility item on a fixed priority list.

use serde::{Deserialize, Serialize};

use crate::catalog::ClassArchetype;

/// Slot name for items that do not occupy a body slot.
pub const SLOTLESS: &str = "slotless";

/// A concrete wondrous item: id, display name, body slot, and price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WondrousItemDefinition {
    pub id: String,
    pub name: String,
    pub slot: String,
    pub price: u32,
}

/// One purchasable tier of a big-six item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusTier {
    pub bonus: u8,
    pub price: u32,
}

/// A big-six item family with one entry per bonus tier, sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieredItemDefinition {
    pub id: String,
    pub name: String,
    pub slot: String,
    pub tiers: Vec<BonusTier>,
}

impl TieredItemDefinition {
    /// Highest tier whose price fits the budget, if any.
    pub fn best_affordable(&self, budget: u32) -> Option<BonusTier> {
        self.tiers.iter().rev().find(|tier| tier.price <= budget).copied()
    }
}

/// A stat-boosting item variant. Several variants can be equally valid for an
/// archetype (e.g. strength vs. dexterity belts for a martial character); the
/// assembler picks one cosmetically with its seeded RNG.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatItemDefinition {
    pub id: String,
    pub name: String,
    pub slot: String,
    /// Archetypes this variant suits
    pub archetypes: Vec<ClassArchetype>,
    pub tiers: Vec<BonusTier>,
}

impl StatItemDefinition {
    pub fn suits(&self, archetype: ClassArchetype) -> bool {
        self.archetypes.contains(&archetype)
    }

    pub fn best_affordable(&self, budget: u32) -> Option<BonusTier> {
        self.tiers.iter().rev().find(|tier| tier.price <= budget).copied()
    }
}

/// A discretionary utility item on the phase-2 priority list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilityItemDefinition {
    pub id: String,
    pub name: String,
    pub slot: String,
    pub price: u32,
    /// Minimum character level before this item is considered
    pub min_level: u8,
    /// Single-instance family: once one member is bought, the rest are skipped
    #[serde(default)]
    pub family: Option<String>,
}

fn stat_tiers() -> Vec<BonusTier> {
    // bonus² × 1000 for the even stat bonuses
    vec![
        BonusTier { bonus: 2, price: 4_000 },
        BonusTier { bonus: 4, price: 16_000 },
        BonusTier { bonus: 6, price: 36_000 },
    ]
}

pub(crate) fn default_stat_items() -> Vec<StatItemDefinition> {
    use ClassArchetype::*;
    let variant = |id: &str, name: &str, slot: &str, archetypes: &[ClassArchetype]| {
        StatItemDefinition {
            id: id.to_string(),
            name: name.to_string(),
            slot: slot.to_string(),
            archetypes: archetypes.to_vec(),
            tiers: stat_tiers(),
        }
    };
    vec![
        variant(
            "belt-of-giant-strength",
            "Belt of Giant Strength",
            "belt",
            &[Martial, HybridMartialCaster],
        ),
        variant(
            "belt-of-incredible-dexterity",
            "Belt of Incredible Dexterity",
            "belt",
            &[Martial, HybridMartialCaster],
        ),
        variant(
            "belt-of-mighty-constitution",
            "Belt of Mighty Constitution",
            "belt",
            &[Martial],
        ),
        variant(
            "headband-of-vast-intelligence",
            "Headband of Vast Intelligence",
            "headband",
            &[Caster],
        ),
        variant(
            "headband-of-inspired-wisdom",
            "Headband of Inspired Wisdom",
            "headband",
            &[Caster],
        ),
        variant(
            "headband-of-alluring-charisma",
            "Headband of Alluring Charisma",
            "headband",
            &[Caster, HybridMartialCaster],
        ),
    ]
}

pub(crate) fn default_resistance_cloak() -> TieredItemDefinition {
    // bonus² × 1000
    TieredItemDefinition {
        id: "cloak-of-resistance".to_string(),
        name: "Cloak of Resistance".to_string(),
        slot: "shoulders".to_string(),
        tiers: (1..=5)
            .map(|bonus: u32| BonusTier {
                bonus: bonus as u8,
                price: bonus * bonus * 1_000,
            })
            .collect(),
    }
}

pub(crate) fn default_protection_ring() -> TieredItemDefinition {
    // bonus² × 2000
    TieredItemDefinition {
        id: "ring-of-protection".to_string(),
        name: "Ring of Protection".to_string(),
        slot: "ring".to_string(),
        tiers: (1..=5)
            .map(|bonus: u32| BonusTier {
                bonus: bonus as u8,
                price: bonus * bonus * 2_000,
            })
            .collect(),
    }
}

pub(crate) fn default_natural_armor_amulet() -> TieredItemDefinition {
    TieredItemDefinition {
        id: "amulet-of-natural-armor".to_string(),
        name: "Amulet of Natural Armor".to_string(),
        slot: "neck".to_string(),
        tiers: (1..=5)
            .map(|bonus: u32| BonusTier {
                bonus: bonus as u8,
                price: bonus * bonus * 2_000,
            })
            .collect(),
    }
}

/// Default utility priority list, best first. Storage containers form a
/// single-instance family: only the highest affordable tier is ever granted.
pub(crate) fn default_utility_items() -> Vec<UtilityItemDefinition> {
    let item = |id: &str, name: &str, slot: &str, price: u32, min_level: u8| {
        UtilityItemDefinition {
            id: id.to_string(),
            name: name.to_string(),
            slot: slot.to_string(),
            price,
            min_level,
            family: None,
        }
    };
    let storage = |id: &str, name: &str, price: u32, min_level: u8| UtilityItemDefinition {
        family: Some("storage".to_string()),
        ..item(id, name, SLOTLESS, price, min_level)
    };
    vec![
        storage("bag-of-holding-iv", "Bag of Holding (Type IV)", 10_000, 11),
        storage("bag-of-holding-iii", "Bag of Holding (Type III)", 7_400, 9),
        storage("bag-of-holding-ii", "Bag of Holding (Type II)", 5_000, 7),
        storage("bag-of-holding-i", "Bag of Holding (Type I)", 2_500, 5),
        item("boots-of-speed", "Boots of Speed", "feet", 12_000, 11),
        item("ioun-stone-dusty-rose", "Dusty Rose Ioun Stone", SLOTLESS, 5_000, 8),
        item("eyes-of-the-eagle", "Eyes of the Eagle", "eyes", 2_500, 4),
        item("boots-of-elvenkind", "Boots of Elvenkind", "feet", 2_500, 4),
        item("cloak-of-elvenkind", "Cloak of Elvenkind", "shoulders", 2_500, 4),
        item("ring-of-feather-falling", "Ring of Feather Falling", "ring", 2_200, 4),
    ]
}

/// The always-granted bottomless container: every character with enough
/// leftover budget gets basic portable storage, independent of the
/// priority list.
pub(crate) fn default_bottomless_container() -> WondrousItemDefinition {
    WondrousItemDefinition {
        id: "handy-haversack".to_string(),
        name: "Handy Haversack".to_string(),
        slot: SLOTLESS.to_string(),
        price: crate::config::BOTTOMLESS_CONTAINER_PRICE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiered_best_affordable() {
        let cloak = default_resistance_cloak();
        assert_eq!(cloak.best_affordable(999), None);
        assert_eq!(cloak.best_affordable(1_000).unwrap().bonus, 1);
        assert_eq!(cloak.best_affordable(8_999).unwrap().bonus, 2);
        assert_eq!(cloak.best_affordable(100_000).unwrap().bonus, 5);
    }

    #[test]
    fn test_stat_item_floor_matches_first_tier() {
        for item in default_stat_items() {
            assert_eq!(item.tiers.first().unwrap().price, crate::config::STAT_ITEM_FLOOR);
        }
    }

    #[test]
    fn test_every_archetype_has_a_stat_variant() {
        use ClassArchetype::*;
        for archetype in [Martial, Caster, HybridMartialCaster] {
            assert!(default_stat_items().iter().any(|item| item.suits(archetype)));
        }
    }

    #[test]
    fn test_storage_family_is_priced_descending() {
        let storage: Vec<_> = default_utility_items()
            .into_iter()
            .filter(|item| item.family.as_deref() == Some("storage"))
            .collect();
        assert!(storage.windows(2).all(|pair| pair[0].price > pair[1].price));
    }
}
