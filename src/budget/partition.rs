//! Budget partitioner: splits a wealth pool into nested category budgets
//! using per-archetype percentage tables with level-bracket overrides.
//!
//! All shares are floored to integer gold; rounding error accumulates as
//! unspent budget and is never borrowed back from another category.

use serde::{Deserialize, Serialize};

use crate::catalog::{ClassArchetype, ConsumableArchetype};
use crate::{config, OutfitterError, OutfitterResult};

/// Top-level percentage table for one class archetype.
#[derive(Debug, Clone, Copy)]
struct BasePercents {
    weapon: u32,
    armor: u32,
    stat_item: u32,
    resistance: u32,
    protection: u32,
    consumables: u32,
}

/// Martial characters front-load weapons; the table deliberately sums to 102
/// so early levels over-allocate combat categories rather than hoard gold.
const MARTIAL_PERCENTS: BasePercents = BasePercents {
    weapon: 42,
    armor: 25,
    stat_item: 12,
    resistance: 8,
    protection: 5,
    consumables: 10,
};

const CASTER_PERCENTS: BasePercents = BasePercents {
    weapon: 10,
    armor: 10,
    stat_item: 30,
    resistance: 10,
    protection: 10,
    consumables: 30,
};

const HYBRID_PERCENTS: BasePercents = BasePercents {
    weapon: 25,
    armor: 20,
    stat_item: 20,
    resistance: 10,
    protection: 5,
    consumables: 20,
};

/// Level window in which martial and hybrid characters shift budget from
/// armor to weapon ("can't afford a magic weapon yet" pressure).
const WEAPON_SHIFT_LEVELS: std::ops::RangeInclusive<u8> = 4..=7;
const WEAPON_SHIFT_POINTS: u32 = 10;

/// Wand/scroll/potion split per consumable archetype.
#[derive(Debug, Clone, Copy)]
struct ConsumableSplit {
    wand: u32,
    scroll: u32,
    potion: u32,
}

const FULL_CASTER_SPLIT: ConsumableSplit = ConsumableSplit {
    wand: 40,
    scroll: 40,
    potion: 20,
};
const PARTIAL_CASTER_SPLIT: ConsumableSplit = ConsumableSplit {
    wand: 50,
    scroll: 20,
    potion: 30,
};
const MARTIAL_SPLIT: ConsumableSplit = ConsumableSplit {
    wand: 50,
    scroll: 0,
    potion: 50,
};

/// Default shield share of the armor budget, and the high-level override
/// (expensive defensive shield abilities become worth buying).
const SHIELD_SHARE_DEFAULT: u32 = 30;
const SHIELD_SHARE_HIGH_LEVEL: u32 = 40;
const SHIELD_HIGH_LEVEL_FLOOR: u8 = 16;

/// Default ring share of the protection budget (the amulet gets the rest).
const RING_SHARE_DEFAULT: u32 = 60;

/// Default secondary-weapon share of the weapon budget once the level gate
/// is passed.
const SECONDARY_WEAPON_SHARE_DEFAULT: u32 = 25;

/// Caller-supplied percentage overrides, taking precedence over every table
/// lookup. Each is a 0..=100 share of its parent category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentOverrides {
    /// Shield share of the armor budget
    #[serde(default)]
    pub shield: Option<u8>,
    /// Ring share of the protection budget; the amulet takes the complement
    #[serde(default)]
    pub ring: Option<u8>,
    /// Secondary-weapon share of the weapon budget
    #[serde(default)]
    pub secondary_weapon: Option<u8>,
}

impl PercentOverrides {
    /// Validates every supplied override to the 0..=100 range.
    pub fn validate(&self) -> OutfitterResult<()> {
        for (name, value) in [
            ("shield", self.shield),
            ("ring", self.ring),
            ("secondary_weapon", self.secondary_weapon),
        ] {
            if let Some(value) = value {
                if value > 100 {
                    return Err(OutfitterError::InvalidOverride {
                        name,
                        value: value as u32,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Second-level consumable budgets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumableBudgets {
    pub wand: u32,
    pub scroll: u32,
    pub potion: u32,
}

/// The full category budget tree produced by [`partition`].
///
/// Invariant: every amount is ≥ 0 and ≤ the total, and the direct children
/// of a parent never sum to more than the parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBudgets {
    pub total: u32,
    pub weapon: u32,
    pub primary_weapon: u32,
    pub secondary_weapon: u32,
    pub armor: u32,
    pub shield: u32,
    pub armor_only: u32,
    pub stat_item: u32,
    pub resistance: u32,
    pub protection: u32,
    pub ring: u32,
    pub amulet: u32,
    pub consumables: u32,
    pub consumable: ConsumableBudgets,
}

/// Floored integer share of a parent budget.
fn share(parent: u32, percent: u32) -> u32 {
    ((parent as u64 * percent as u64) / 100) as u32
}

/// Splits `total` wealth into the category budget tree for one character.
///
/// A zero total produces a valid all-zero tree; the downstream selectors then
/// select nothing rather than erroring.
///
/// # Examples
///
/// ```
/// use outfitter::{partition, PercentOverrides};
/// use outfitter::{ClassArchetype, ConsumableArchetype};
///
/// let budgets = partition(
///     10_000,
///     ClassArchetype::Caster,
///     ConsumableArchetype::FullCaster,
///     5,
///     &PercentOverrides::default(),
/// )
/// .unwrap();
/// assert_eq!(budgets.stat_item, 3_000);
/// assert!(budgets.shield + budgets.armor_only <= budgets.armor);
/// ```
pub fn partition(
    total: u32,
    archetype: ClassArchetype,
    consumable_archetype: ConsumableArchetype,
    level: u8,
    overrides: &PercentOverrides,
) -> OutfitterResult<CategoryBudgets> {
    overrides.validate()?;

    let mut base = match archetype {
        ClassArchetype::Martial => MARTIAL_PERCENTS,
        ClassArchetype::Caster => CASTER_PERCENTS,
        ClassArchetype::HybridMartialCaster => HYBRID_PERCENTS,
    };

    if archetype != ClassArchetype::Caster && WEAPON_SHIFT_LEVELS.contains(&level) {
        base.weapon += WEAPON_SHIFT_POINTS;
        base.armor = base.armor.saturating_sub(WEAPON_SHIFT_POINTS);
    }

    let weapon = share(total, base.weapon);
    let armor = share(total, base.armor);
    let stat_item = share(total, base.stat_item);
    let resistance = share(total, base.resistance);
    let protection = share(total, base.protection);
    let consumables = share(total, base.consumables);

    let secondary_share = if level >= config::MIN_SECONDARY_WEAPON_LEVEL {
        overrides
            .secondary_weapon
            .map(u32::from)
            .unwrap_or(SECONDARY_WEAPON_SHARE_DEFAULT)
    } else {
        0
    };
    let secondary_weapon = share(weapon, secondary_share);
    let primary_weapon = weapon - secondary_weapon;

    let shield_share = overrides.shield.map(u32::from).unwrap_or({
        if level >= SHIELD_HIGH_LEVEL_FLOOR {
            SHIELD_SHARE_HIGH_LEVEL
        } else {
            SHIELD_SHARE_DEFAULT
        }
    });
    let shield = share(armor, shield_share);
    let armor_only = share(armor, 100 - shield_share);

    let ring_share = overrides.ring.map(u32::from).unwrap_or(RING_SHARE_DEFAULT);
    let ring = share(protection, ring_share);
    let amulet = share(protection, 100 - ring_share);

    let split = match consumable_archetype {
        ConsumableArchetype::FullCaster => FULL_CASTER_SPLIT,
        ConsumableArchetype::PartialCaster => PARTIAL_CASTER_SPLIT,
        ConsumableArchetype::Martial => MARTIAL_SPLIT,
    };
    let consumable = ConsumableBudgets {
        wand: share(consumables, split.wand),
        scroll: share(consumables, split.scroll),
        potion: share(consumables, split.potion),
    };

    Ok(CategoryBudgets {
        total,
        weapon,
        primary_weapon,
        secondary_weapon,
        armor,
        shield,
        armor_only,
        stat_item,
        resistance,
        protection,
        ring,
        amulet,
        consumables,
        consumable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> PercentOverrides {
        PercentOverrides::default()
    }

    #[test]
    fn test_zero_total_gives_zero_tree() {
        let budgets = partition(
            0,
            ClassArchetype::Martial,
            ConsumableArchetype::Martial,
            10,
            &defaults(),
        )
        .unwrap();
        assert_eq!(budgets, CategoryBudgets::default());
    }

    #[test]
    fn test_children_never_exceed_parent() {
        let budgets = partition(
            62_000,
            ClassArchetype::HybridMartialCaster,
            ConsumableArchetype::PartialCaster,
            10,
            &defaults(),
        )
        .unwrap();
        assert!(budgets.shield + budgets.armor_only <= budgets.armor);
        assert!(budgets.primary_weapon + budgets.secondary_weapon <= budgets.weapon);
        assert!(budgets.ring + budgets.amulet <= budgets.protection);
        let consumable = budgets.consumable;
        assert!(consumable.wand + consumable.scroll + consumable.potion <= budgets.consumables);
    }

    #[test]
    fn test_weapon_shift_window() {
        let inside = partition(
            10_000,
            ClassArchetype::Martial,
            ConsumableArchetype::Martial,
            5,
            &defaults(),
        )
        .unwrap();
        let outside = partition(
            10_000,
            ClassArchetype::Martial,
            ConsumableArchetype::Martial,
            9,
            &defaults(),
        )
        .unwrap();
        assert_eq!(inside.weapon, outside.weapon + 1_000);
        assert_eq!(inside.armor, outside.armor - 1_000);

        // Casters never shift
        let caster = partition(
            10_000,
            ClassArchetype::Caster,
            ConsumableArchetype::FullCaster,
            5,
            &defaults(),
        )
        .unwrap();
        assert_eq!(caster.weapon, 1_000);
    }

    #[test]
    fn test_caster_favors_stat_items_and_consumables() {
        let caster = partition(
            9_000,
            ClassArchetype::Caster,
            ConsumableArchetype::FullCaster,
            5,
            &defaults(),
        )
        .unwrap();
        let martial = partition(
            9_000,
            ClassArchetype::Martial,
            ConsumableArchetype::Martial,
            5,
            &defaults(),
        )
        .unwrap();
        assert!(
            caster.stat_item + caster.consumables > martial.stat_item + martial.consumables
        );
    }

    #[test]
    fn test_secondary_weapon_is_level_gated() {
        let low = partition(
            50_000,
            ClassArchetype::Martial,
            ConsumableArchetype::Martial,
            7,
            &defaults(),
        )
        .unwrap();
        assert_eq!(low.secondary_weapon, 0);
        assert_eq!(low.primary_weapon, low.weapon);

        let high = partition(
            50_000,
            ClassArchetype::Martial,
            ConsumableArchetype::Martial,
            8,
            &defaults(),
        )
        .unwrap();
        assert!(high.secondary_weapon > 0);
    }

    #[test]
    fn test_shield_share_grows_at_high_level() {
        let mid = partition(
            100_000,
            ClassArchetype::Martial,
            ConsumableArchetype::Martial,
            12,
            &defaults(),
        )
        .unwrap();
        let high = partition(
            100_000,
            ClassArchetype::Martial,
            ConsumableArchetype::Martial,
            16,
            &defaults(),
        )
        .unwrap();
        assert!(high.shield * mid.armor > mid.shield * high.armor);
    }

    #[test]
    fn test_overrides_win_over_tables() {
        let overridden = partition(
            100_000,
            ClassArchetype::Martial,
            ConsumableArchetype::Martial,
            16,
            &PercentOverrides {
                shield: Some(10),
                ring: Some(100),
                secondary_weapon: Some(0),
            },
        )
        .unwrap();
        assert_eq!(overridden.shield, share(overridden.armor, 10));
        assert_eq!(overridden.ring, overridden.protection);
        assert_eq!(overridden.amulet, 0);
        assert_eq!(overridden.secondary_weapon, 0);
    }

    #[test]
    fn test_out_of_range_override_is_rejected() {
        let result = partition(
            1_000,
            ClassArchetype::Martial,
            ConsumableArchetype::Martial,
            5,
            &PercentOverrides {
                shield: Some(101),
                ..Default::default()
            },
        );
        assert!(matches!(
            result,
            Err(OutfitterError::InvalidOverride { name: "shield", .. })
        ));
    }

    #[test]
    fn test_martial_scrolls_are_zero() {
        let budgets = partition(
            33_000,
            ClassArchetype::Martial,
            ConsumableArchetype::Martial,
            8,
            &defaults(),
        )
        .unwrap();
        assert_eq!(budgets.consumable.scroll, 0);
        assert!(budgets.consumable.potion > 0);
    }
}
