//! Enhancement ability catalog types.
//!
//! Weapons, armor, and shields are enhanced with a numeric bonus (+1..+5) plus
//! special abilities, each of which consumes "bonus levels". One item carries
//! at most 10 total bonus levels; the price curve in [`crate::budget`] has no
//! entries beyond that.

use serde::{Deserialize, Serialize};

use crate::config;

/// Pricing category for an enhanced piece of equipment.
///
/// Shields share the armor price curve and ability catalog; they are
/// distinguished at the slot level, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipCategory {
    Weapon,
    Armor,
}

/// Equipment slot an enhancement bundle is selected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnhancementSlot {
    Weapon,
    SecondaryWeapon,
    Armor,
    Shield,
}

impl EnhancementSlot {
    /// The price curve and ability catalog this slot draws from.
    pub fn pricing(self) -> EquipCategory {
        match self {
            EnhancementSlot::Weapon | EnhancementSlot::SecondaryWeapon => EquipCategory::Weapon,
            EnhancementSlot::Armor | EnhancementSlot::Shield => EquipCategory::Armor,
        }
    }

    /// Hard minimum character level before this slot is considered at all.
    /// These are level gates, not budget-derived thresholds.
    pub fn min_level(self) -> u8 {
        match self {
            EnhancementSlot::Weapon | EnhancementSlot::Armor => config::MIN_MAGIC_ITEM_LEVEL,
            EnhancementSlot::Shield => config::MIN_SHIELD_LEVEL,
            EnhancementSlot::SecondaryWeapon => config::MIN_SECONDARY_WEAPON_LEVEL,
        }
    }

    /// Stable name used in decision events.
    pub fn name(self) -> &'static str {
        match self {
            EnhancementSlot::Weapon => "weapon",
            EnhancementSlot::SecondaryWeapon => "secondary_weapon",
            EnhancementSlot::Armor => "armor",
            EnhancementSlot::Shield => "shield",
        }
    }
}

/// Bonus-level cost of a special ability, decided at data-load time.
///
/// Most abilities cost a flat number of bonus levels. Variable-strength
/// abilities (e.g. a three-tier fortification) carry one cost per tier;
/// `costs[i]` is the cost of tier `i + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "levels")]
pub enum AbilityCost {
    Flat(u8),
    Tiered(Vec<u8>),
}

/// Which equipment an armor-catalog ability may appear on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AbilityRestriction {
    #[default]
    None,
    ArmorOnly,
    ShieldOnly,
}

/// One special ability in the enhancement catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancementAbility {
    /// Stable identifier, unique within its pricing category
    pub id: String,
    /// Pricing category whose catalog this ability belongs to
    pub category: EquipCategory,
    /// Bonus-level cost (flat or per-tier)
    pub cost: AbilityCost,
    /// Slot restriction within the armor catalog
    #[serde(default)]
    pub restriction: AbilityRestriction,
    /// Ability ids that can never share an item with this one
    #[serde(default)]
    pub conflicts_with: Vec<String>,
}

impl EnhancementAbility {
    fn flat(id: &str, category: EquipCategory, cost: u8) -> Self {
        Self {
            id: id.to_string(),
            category,
            cost: AbilityCost::Flat(cost),
            restriction: AbilityRestriction::None,
            conflicts_with: Vec::new(),
        }
    }

    fn tiered(id: &str, category: EquipCategory, costs: &[u8]) -> Self {
        Self {
            id: id.to_string(),
            category,
            cost: AbilityCost::Tiered(costs.to_vec()),
            restriction: AbilityRestriction::None,
            conflicts_with: Vec::new(),
        }
    }

    fn restricted(mut self, restriction: AbilityRestriction) -> Self {
        self.restriction = restriction;
        self
    }

    fn conflicts(mut self, ids: &[&str]) -> Self {
        self.conflicts_with = ids.iter().map(|id| id.to_string()).collect();
        self
    }
}

/// One ability chosen for a concrete item. Tiered abilities record the tier
/// that was bought; flat abilities are referenced by id alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChosenAbility {
    Named(String),
    Leveled { key: String, tier: u8 },
}

impl ChosenAbility {
    /// The catalog id of the underlying ability.
    pub fn id(&self) -> &str {
        match self {
            ChosenAbility::Named(id) => id,
            ChosenAbility::Leveled { key, .. } => key,
        }
    }
}

/// Default weapon ability catalog.
pub(crate) fn default_weapon_abilities() -> Vec<EnhancementAbility> {
    use EquipCategory::Weapon;
    vec![
        EnhancementAbility::flat("flaming", Weapon, 1).conflicts(&["frost"]),
        EnhancementAbility::flat("frost", Weapon, 1).conflicts(&["flaming"]),
        EnhancementAbility::flat("shock", Weapon, 1),
        EnhancementAbility::flat("keen", Weapon, 1),
        EnhancementAbility::flat("defending", Weapon, 1),
        EnhancementAbility::flat("ghost-touch", Weapon, 1),
        EnhancementAbility::flat("spell-storing", Weapon, 1),
        EnhancementAbility::flat("holy", Weapon, 2).conflicts(&["unholy"]),
        EnhancementAbility::flat("unholy", Weapon, 2).conflicts(&["holy"]),
        EnhancementAbility::flat("wounding", Weapon, 2),
        EnhancementAbility::flat("speed", Weapon, 3),
        EnhancementAbility::flat("brilliant-energy", Weapon, 4),
    ]
}

/// Default armor/shield ability catalog.
pub(crate) fn default_armor_abilities() -> Vec<EnhancementAbility> {
    use EquipCategory::Armor;
    vec![
        EnhancementAbility::tiered("fortification", Armor, &[1, 3, 5])
            .conflicts(&["invulnerability"]),
        EnhancementAbility::tiered("spell-resistance", Armor, &[2, 3, 4, 5]),
        EnhancementAbility::flat("ghost-touch", Armor, 3),
        EnhancementAbility::flat("invulnerability", Armor, 3).conflicts(&["fortification"]),
        EnhancementAbility::flat("slick", Armor, 1).restricted(AbilityRestriction::ArmorOnly),
        EnhancementAbility::flat("shadow", Armor, 1).restricted(AbilityRestriction::ArmorOnly),
        EnhancementAbility::flat("bashing", Armor, 1).restricted(AbilityRestriction::ShieldOnly),
        EnhancementAbility::flat("animated", Armor, 2).restricted(AbilityRestriction::ShieldOnly),
        EnhancementAbility::flat("arrow-deflection", Armor, 2)
            .restricted(AbilityRestriction::ShieldOnly),
    ]
}

/// Fixed per-archetype ability preference used to break ties between
/// candidate bundles of equal total bonus levels. Earlier is better; abilities
/// absent from the list rank behind every listed one.
pub fn ability_preference(
    archetype: crate::catalog::ClassArchetype,
    category: EquipCategory,
) -> &'static [&'static str] {
    use crate::catalog::ClassArchetype::*;
    match (archetype, category) {
        (Martial, EquipCategory::Weapon) => &[
            "speed",
            "holy",
            "keen",
            "flaming",
            "shock",
            "frost",
            "wounding",
            "brilliant-energy",
        ],
        (Martial, EquipCategory::Armor) => &[
            "fortification",
            "invulnerability",
            "arrow-deflection",
            "bashing",
            "spell-resistance",
        ],
        (Caster, EquipCategory::Weapon) => &[
            "defending",
            "spell-storing",
            "ghost-touch",
            "keen",
            "shock",
            "frost",
        ],
        (Caster, EquipCategory::Armor) => &[
            "spell-resistance",
            "fortification",
            "ghost-touch",
            "shadow",
            "slick",
        ],
        (HybridMartialCaster, EquipCategory::Weapon) => &[
            "holy",
            "speed",
            "spell-storing",
            "keen",
            "flaming",
            "shock",
        ],
        (HybridMartialCaster, EquipCategory::Armor) => &[
            "fortification",
            "spell-resistance",
            "invulnerability",
            "ghost-touch",
        ],
    }
}
