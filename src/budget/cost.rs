//! Cost model: the enhancement price curve, masterwork fees, and
//! wand/scroll/potion pricing.
//!
//! Everything here is a pure function over fixed tables. The curves
//! approximate the official pricing formulas closely enough to build
//! believable loadouts; they are not meant to be audited against a rulebook.

use crate::catalog::EquipCategory;
use crate::{config, OutfitterError, OutfitterResult};

/// Weapon enhancement price by total bonus levels (2000 × n²).
const WEAPON_ENHANCEMENT_COSTS: [u32; 11] = [
    0, 2_000, 8_000, 18_000, 32_000, 50_000, 72_000, 98_000, 128_000, 162_000, 200_000,
];

/// Armor and shield enhancement price by total bonus levels (1000 × n²).
const ARMOR_ENHANCEMENT_COSTS: [u32; 11] = [
    0, 1_000, 4_000, 9_000, 16_000, 25_000, 36_000, 49_000, 64_000, 81_000, 100_000,
];

/// Flat masterwork fee added once per enhanced item.
const WEAPON_MASTERWORK_FEE: u32 = 300;
const ARMOR_MASTERWORK_FEE: u32 = 150;

/// Pricing multiplier per consumable form.
pub const WAND_MULTIPLIER: u32 = 750;
pub const SCROLL_MULTIPLIER: u32 = 25;
pub const POTION_MULTIPLIER: u32 = 50;

/// Price of an enhancement totalling `total_bonus_levels` on the given
/// category's curve.
///
/// Levels above [`config::MAX_TOTAL_BONUS_LEVELS`] are invalid input: the
/// table simply has no entries beyond that.
///
/// # Examples
///
/// ```
/// use outfitter::{enhancement_cost, EquipCategory};
///
/// assert_eq!(enhancement_cost(EquipCategory::Weapon, 1).unwrap(), 2_000);
/// assert_eq!(enhancement_cost(EquipCategory::Armor, 3).unwrap(), 9_000);
/// assert!(enhancement_cost(EquipCategory::Weapon, 11).is_err());
/// ```
pub fn enhancement_cost(category: EquipCategory, total_bonus_levels: u8) -> OutfitterResult<u32> {
    if total_bonus_levels > config::MAX_TOTAL_BONUS_LEVELS {
        return Err(OutfitterError::InvalidBonusLevel(total_bonus_levels as u32));
    }
    let table = match category {
        EquipCategory::Weapon => &WEAPON_ENHANCEMENT_COSTS,
        EquipCategory::Armor => &ARMOR_ENHANCEMENT_COSTS,
    };
    Ok(table[total_bonus_levels as usize])
}

/// Full price of an enhanced item: the category's flat masterwork fee plus
/// the enhancement cost.
pub fn item_enhancement_total_cost(
    category: EquipCategory,
    total_bonus_levels: u8,
) -> OutfitterResult<u32> {
    let fee = match category {
        EquipCategory::Weapon => WEAPON_MASTERWORK_FEE,
        EquipCategory::Armor => ARMOR_MASTERWORK_FEE,
    };
    Ok(fee + enhancement_cost(category, total_bonus_levels)?)
}

/// Price of one consumable charge:
/// `round(effective_spell_level × caster_level × multiplier)`, where a
/// spell level of 0 is priced as one half.
///
/// # Examples
///
/// ```
/// use outfitter::{consumable_cost, WAND_MULTIPLIER, POTION_MULTIPLIER};
///
/// // Wand of a 1st-level spell at caster level 1
/// assert_eq!(consumable_cost(1, 1, WAND_MULTIPLIER), 750);
/// // Cantrip potions price at half a spell level
/// assert_eq!(consumable_cost(0, 1, POTION_MULTIPLIER), 25);
/// ```
pub fn consumable_cost(spell_level: u8, caster_level: u8, multiplier: u32) -> u32 {
    let effective_level = if spell_level == 0 {
        0.5
    } else {
        spell_level as f64
    };
    (effective_level * caster_level as f64 * multiplier as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhancement_curves_are_monotonic() {
        for category in [EquipCategory::Weapon, EquipCategory::Armor] {
            let mut previous = 0;
            for levels in 1..=config::MAX_TOTAL_BONUS_LEVELS {
                let cost = enhancement_cost(category, levels).unwrap();
                assert!(cost > previous);
                previous = cost;
            }
        }
    }

    #[test]
    fn test_zero_levels_cost_nothing_on_the_curve() {
        assert_eq!(enhancement_cost(EquipCategory::Weapon, 0).unwrap(), 0);
        assert_eq!(enhancement_cost(EquipCategory::Armor, 0).unwrap(), 0);
    }

    #[test]
    fn test_levels_above_ten_are_invalid() {
        for levels in [11, 12, 200] {
            assert!(matches!(
                enhancement_cost(EquipCategory::Weapon, levels),
                Err(OutfitterError::InvalidBonusLevel(_))
            ));
        }
    }

    #[test]
    fn test_masterwork_fee_is_added_once() {
        assert_eq!(
            item_enhancement_total_cost(EquipCategory::Weapon, 1).unwrap(),
            2_300
        );
        assert_eq!(
            item_enhancement_total_cost(EquipCategory::Armor, 1).unwrap(),
            1_150
        );
        // A masterwork item with no enhancement still pays the fee
        assert_eq!(
            item_enhancement_total_cost(EquipCategory::Weapon, 0).unwrap(),
            300
        );
    }

    #[test]
    fn test_consumable_cost_rounds() {
        // 0.5 × 1 × 25 = 12.5 rounds to 13
        assert_eq!(consumable_cost(0, 1, SCROLL_MULTIPLIER), 13);
        assert_eq!(consumable_cost(3, 5, POTION_MULTIPLIER), 750);
        assert_eq!(consumable_cost(5, 9, SCROLL_MULTIPLIER), 1_125);
    }
}
