//! # Outfitter
//!
//! A budget-allocation and priority-constrained selection engine that builds a
//! complete magic item loadout for a d20-style character from its level,
//! class, and gold-piece wealth.
//!
//! ## Architecture Overview
//!
//! The engine is a pipeline of pure components:
//!
//! - **Catalog**: caller-owned, eagerly validated tables of enhancement
//!   abilities, wondrous items, and consumable priorities
//! - **Budget**: cost model (enhancement price curve, consumable pricing) and
//!   the partitioner that splits wealth into nested category budgets
//! - **Selection**: per-category selectors that pick the best affordable
//!   enhancement bundle, wondrous items, and consumable stocks
//! - **Loadout**: the assembler that runs the selectors in a fixed sequence
//!   and aggregates everything into one immutable result
//!
//! The core is single-threaded, synchronous, and side-effect-free: it performs
//! no I/O, holds no state across calls, and is deterministic for a fixed
//! request. Fetching item documents and writing the result onto a character
//! record belong to the surrounding application, not to this crate.

pub mod budget;
pub mod catalog;
pub mod loadout;
pub mod selection;

pub use budget::{
    consumable_cost, enhancement_cost, item_enhancement_total_cost, partition, CategoryBudgets,
    ConsumableBudgets, PercentOverrides, POTION_MULTIPLIER, SCROLL_MULTIPLIER, WAND_MULTIPLIER,
};
pub use catalog::{
    AbilityCost, AbilityRestriction, BonusTier, Catalog, ChosenAbility, ClassArchetype,
    ConsumableArchetype, ConsumableForm, ConsumableKind, ConsumablePriority, EnhancementAbility,
    EnhancementSlot, EquipCategory, StatItemDefinition, TieredItemDefinition,
    UtilityItemDefinition, WondrousItemDefinition,
};
pub use loadout::{
    assemble, DecisionEvent, LoadoutObserver, LoadoutRequest, LoadoutResult, NullObserver,
    RecordingObserver, SkipReason,
};
pub use selection::{
    select_best_enhancement, select_consumables, select_wondrous, ChosenWondrous, ConsumableFill,
    ConsumableRecommendation, EnhancementSelection, WondrousSelection,
};

/// Core error type for the Outfitter engine.
///
/// Configuration-shape problems are detected eagerly, before any budget math,
/// and propagate to the caller. An unaffordable category is never an error:
/// selectors signal it by returning nothing selected.
#[derive(thiserror::Error, Debug)]
pub enum OutfitterError {
    /// A total bonus level outside the 0..=10 range was priced
    #[error("invalid total bonus level {0}: the enhancement cost table ends at 10")]
    InvalidBonusLevel(u32),

    /// Malformed catalog entry detected during eager validation
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// A percentage override outside the 0..=100 range
    #[error("invalid override {name}={value}: percentages must be within 0..=100")]
    InvalidOverride { name: &'static str, value: u32 },

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type used throughout the Outfitter codebase.
pub type OutfitterResult<T> = Result<T, OutfitterError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine tuning constants.
pub mod config {
    /// Minimum character level before any magic item is worth buying.
    /// Below this the assembler returns an all-empty, zero-cost result.
    pub const MIN_MAGIC_ITEM_LEVEL: u8 = 3;

    /// Minimum character level before a shield enhancement is considered
    pub const MIN_SHIELD_LEVEL: u8 = 4;

    /// Minimum character level before a secondary weapon is considered
    pub const MIN_SECONDARY_WEAPON_LEVEL: u8 = 8;

    /// Maximum total bonus levels (numeric bonus + ability costs) on one item
    pub const MAX_TOTAL_BONUS_LEVELS: u8 = 10;

    /// Maximum numeric enhancement bonus (+1..+5)
    pub const MAX_NUMERIC_BONUS: u8 = 5;

    /// Minimum budget before a stat-boosting item is worth considering
    pub const STAT_ITEM_FLOOR: u32 = 4_000;

    /// Utility spending stops once remaining budget drops below this
    pub const UTILITY_TERMINAL_THRESHOLD: u32 = 250;

    /// Maximum number of discretionary utility items per loadout
    pub const MAX_UTILITY_ITEMS: usize = 8;

    /// Fixed price of the always-granted bottomless container
    pub const BOTTOMLESS_CONTAINER_PRICE: u32 = 2_000;

    /// Aggregate quantity cap shared by all healing consumables in one fill
    pub const HEALING_AGGREGATE_CAP: u32 = 10;

    /// Per-item quantity cap for healing consumables
    pub const HEALING_ITEM_CAP: u32 = 8;

    /// Per-item quantity cap for non-healing utility consumables
    pub const UTILITY_ITEM_CAP: u32 = 4;

    /// Pass ceiling for the consumable greedy fill. Exists only to bound
    /// worst-case iteration; sane caps make it unreachable.
    pub const MAX_FILL_PASSES: u32 = 24;
}
