//! # Catalog Module
//!
//! Caller-owned configuration for the loadout engine: class archetypes,
//! enhancement ability tables, wondrous item definitions, and consumable
//! priority lists.
//!
//! The engine never loads or caches configuration itself; the caller builds a
//! [`Catalog`] (or takes [`Catalog::srd_default`]), validates it eagerly, and
//! passes it into every computation. Shape problems fail fast, before any
//! budget math happens.

pub mod consumable;
pub mod enhancement;
pub mod wondrous;

pub use consumable::*;
pub use enhancement::*;
pub use wondrous::*;

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::{config, OutfitterError, OutfitterResult};

/// Coarse classification of a character class, selecting which budget
/// percentage table applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassArchetype {
    Martial,
    Caster,
    HybridMartialCaster,
}

impl ClassArchetype {
    /// Maps a recognized class name to its archetype.
    pub fn try_from_class(class: &str) -> Option<Self> {
        match class.to_lowercase().as_str() {
            "fighter" | "barbarian" | "rogue" | "monk" | "cavalier" | "gunslinger"
            | "brawler" | "slayer" | "swashbuckler" => Some(ClassArchetype::Martial),
            "wizard" | "sorcerer" | "cleric" | "druid" | "witch" | "oracle" | "arcanist"
            | "shaman" | "psychic" => Some(ClassArchetype::Caster),
            "paladin" | "ranger" | "bard" | "alchemist" | "magus" | "inquisitor"
            | "summoner" | "warpriest" | "bloodrager" | "skald" => {
                Some(ClassArchetype::HybridMartialCaster)
            }
            _ => None,
        }
    }

    /// Maps a class name to its archetype. Unknown classes fall back to
    /// [`ClassArchetype::Martial`] with a warning: one misconfigured class
    /// must not block an otherwise valid loadout.
    pub fn from_class(class: &str) -> Self {
        Self::try_from_class(class).unwrap_or_else(|| {
            warn!("unknown class '{class}', falling back to martial archetype");
            ClassArchetype::Martial
        })
    }
}

/// Finer-grained casting classification, selecting the wand/scroll/potion
/// split table and the consumable priority lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsumableArchetype {
    FullCaster,
    PartialCaster,
    Martial,
}

impl ConsumableArchetype {
    /// Maps a class name to its consumable archetype. Unknown classes fall
    /// back to [`ConsumableArchetype::Martial`]; the class-archetype lookup
    /// already warned about them.
    pub fn from_class(class: &str) -> Self {
        match class.to_lowercase().as_str() {
            "wizard" | "sorcerer" | "cleric" | "druid" | "witch" | "oracle" | "arcanist"
            | "shaman" | "psychic" | "summoner" => ConsumableArchetype::FullCaster,
            "bard" | "paladin" | "ranger" | "magus" | "inquisitor" | "alchemist"
            | "warpriest" | "bloodrager" | "skald" => ConsumableArchetype::PartialCaster,
            _ => ConsumableArchetype::Martial,
        }
    }
}

/// The complete, immutable configuration the engine computes against.
///
/// # Examples
///
/// ```
/// use outfitter::Catalog;
///
/// let catalog = Catalog::srd_default();
/// assert!(catalog.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub weapon_abilities: Vec<EnhancementAbility>,
    pub armor_abilities: Vec<EnhancementAbility>,
    pub stat_items: Vec<StatItemDefinition>,
    pub resistance_cloak: TieredItemDefinition,
    pub protection_ring: TieredItemDefinition,
    pub natural_armor_amulet: TieredItemDefinition,
    /// Utility purchase list in priority order, best first
    pub utility_items: Vec<UtilityItemDefinition>,
    pub bottomless_container: WondrousItemDefinition,
    pub wand_priorities: HashMap<ConsumableArchetype, Vec<ConsumablePriority>>,
    pub scroll_priorities: HashMap<ConsumableArchetype, Vec<ConsumablePriority>>,
    pub potion_priorities: HashMap<ConsumableArchetype, Vec<ConsumablePriority>>,
}

impl Catalog {
    /// Builds the complete built-in catalog so the engine is usable without
    /// any external data.
    pub fn srd_default() -> Self {
        use ConsumableArchetype::*;
        let per_archetype = |builder: fn(ConsumableArchetype) -> Vec<ConsumablePriority>| {
            [FullCaster, PartialCaster, Martial]
                .into_iter()
                .map(|archetype| (archetype, builder(archetype)))
                .collect()
        };
        Self {
            weapon_abilities: default_weapon_abilities(),
            armor_abilities: default_armor_abilities(),
            stat_items: default_stat_items(),
            resistance_cloak: default_resistance_cloak(),
            protection_ring: default_protection_ring(),
            natural_armor_amulet: default_natural_armor_amulet(),
            utility_items: default_utility_items(),
            bottomless_container: default_bottomless_container(),
            wand_priorities: per_archetype(default_wand_priorities),
            scroll_priorities: per_archetype(default_scroll_priorities),
            potion_priorities: per_archetype(default_potion_priorities),
        }
    }

    /// Abilities for one pricing category.
    pub fn abilities(&self, category: EquipCategory) -> &[EnhancementAbility] {
        match category {
            EquipCategory::Weapon => &self.weapon_abilities,
            EquipCategory::Armor => &self.armor_abilities,
        }
    }

    /// Priority list for one consumable form and archetype. A missing entry
    /// is treated as an intentionally empty list.
    pub fn consumable_priorities(
        &self,
        form: ConsumableForm,
        archetype: ConsumableArchetype,
    ) -> &[ConsumablePriority] {
        let table = match form {
            ConsumableForm::Wand => &self.wand_priorities,
            ConsumableForm::Scroll => &self.scroll_priorities,
            ConsumableForm::Potion => &self.potion_priorities,
        };
        table.get(&archetype).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Validates the catalog shape. Called by the assembler before any budget
    /// math; malformed entries are fatal to the computation.
    pub fn validate(&self) -> OutfitterResult<()> {
        for (label, expected_category, abilities) in [
            ("weapon", EquipCategory::Weapon, &self.weapon_abilities),
            ("armor", EquipCategory::Armor, &self.armor_abilities),
        ] {
            let mut seen = HashSet::new();
            for ability in abilities.iter() {
                if ability.id.is_empty() {
                    return Err(OutfitterError::InvalidCatalog(format!(
                        "{label} ability with empty id"
                    )));
                }
                if ability.category != expected_category {
                    return Err(OutfitterError::InvalidCatalog(format!(
                        "{label} ability '{}' declares category {:?}",
                        ability.id, ability.category
                    )));
                }
                if !seen.insert(ability.id.as_str()) {
                    return Err(OutfitterError::InvalidCatalog(format!(
                        "duplicate {label} ability '{}'",
                        ability.id
                    )));
                }
                validate_ability_cost(label, ability)?;
            }
            for ability in abilities.iter() {
                for conflict in &ability.conflicts_with {
                    if !abilities.iter().any(|other| &other.id == conflict) {
                        return Err(OutfitterError::InvalidCatalog(format!(
                            "{label} ability '{}' conflicts with unknown '{conflict}'",
                            ability.id
                        )));
                    }
                }
            }
        }

        for item in &self.stat_items {
            validate_tiers(&item.id, &item.tiers)?;
            if item.archetypes.is_empty() {
                return Err(OutfitterError::InvalidCatalog(format!(
                    "stat item '{}' suits no archetype",
                    item.id
                )));
            }
        }
        for item in [
            &self.resistance_cloak,
            &self.protection_ring,
            &self.natural_armor_amulet,
        ] {
            validate_tiers(&item.id, &item.tiers)?;
        }

        for item in &self.utility_items {
            if item.price == 0 || item.slot.is_empty() {
                return Err(OutfitterError::InvalidCatalog(format!(
                    "utility item '{}' has a zero price or empty slot",
                    item.id
                )));
            }
        }
        if self.bottomless_container.price == 0 {
            return Err(OutfitterError::InvalidCatalog(
                "bottomless container has a zero price".to_string(),
            ));
        }

        for table in [
            &self.wand_priorities,
            &self.scroll_priorities,
            &self.potion_priorities,
        ] {
            for list in table.values() {
                for entry in list {
                    if entry.id.is_empty() || entry.unit_cost == 0 {
                        return Err(OutfitterError::InvalidCatalog(format!(
                            "consumable priority '{}' has an empty id or zero cost",
                            entry.id
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

fn validate_ability_cost(label: &str, ability: &EnhancementAbility) -> OutfitterResult<()> {
    let max = config::MAX_TOTAL_BONUS_LEVELS;
    match &ability.cost {
        AbilityCost::Flat(cost) => {
            if *cost == 0 || *cost > max {
                return Err(OutfitterError::InvalidCatalog(format!(
                    "{label} ability '{}' has bonus level cost {cost} outside 1..={max}",
                    ability.id
                )));
            }
        }
        AbilityCost::Tiered(costs) => {
            if costs.is_empty() {
                return Err(OutfitterError::InvalidCatalog(format!(
                    "{label} ability '{}' has no tiers",
                    ability.id
                )));
            }
            if costs.iter().any(|cost| *cost == 0 || *cost > max) {
                return Err(OutfitterError::InvalidCatalog(format!(
                    "{label} ability '{}' has a tier cost outside 1..={max}",
                    ability.id
                )));
            }
            if costs.windows(2).any(|pair| pair[0] >= pair[1]) {
                return Err(OutfitterError::InvalidCatalog(format!(
                    "{label} ability '{}' tier costs are not strictly increasing",
                    ability.id
                )));
            }
        }
    }
    Ok(())
}

fn validate_tiers(id: &str, tiers: &[BonusTier]) -> OutfitterResult<()> {
    if tiers.is_empty() {
        return Err(OutfitterError::InvalidCatalog(format!(
            "tiered item '{id}' has no tiers"
        )));
    }
    if tiers
        .windows(2)
        .any(|pair| pair[0].bonus >= pair[1].bonus || pair[0].price >= pair[1].price)
    {
        return Err(OutfitterError::InvalidCatalog(format!(
            "tiered item '{id}' tiers are not strictly increasing"
        )));
    }
    if tiers.iter().any(|tier| tier.price == 0 || tier.bonus == 0) {
        return Err(OutfitterError::InvalidCatalog(format!(
            "tiered item '{id}' has a zero bonus or price tier"
        )));
    }
    Ok(())
}
