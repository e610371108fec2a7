//! Injectable decision observer.
//!
//! The engine reports every meaningful choice and skip as a structured
//! [`DecisionEvent`] instead of logging text, so tests and callers can assert
//! on decisions directly. The default [`NullObserver`] discards everything.

use serde::Serialize;

/// Why a candidate was passed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    BelowLevelGate,
    InsufficientBudget,
    SlotOccupied,
    FamilyAlreadyChosen,
}

/// One decision made while assembling a loadout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DecisionEvent {
    UnknownClassFallback {
        class: String,
    },
    CategoryBudgeted {
        category: &'static str,
        amount: u32,
    },
    EnhancementChosen {
        slot: &'static str,
        bonus: u8,
        total_bonus_levels: u8,
        cost: u32,
    },
    EnhancementSkipped {
        slot: &'static str,
    },
    WondrousChosen {
        id: String,
        slot: String,
        price: u32,
    },
    WondrousSkipped {
        id: String,
        reason: SkipReason,
    },
    ConsumableCommitted {
        id: String,
        quantity: u32,
        cost: u32,
    },
    /// The greedy-fill pass ceiling was reached. Diagnostic, not a failure.
    PassCeilingReached {
        passes: u32,
    },
}

/// Receives decision events during one loadout computation.
pub trait LoadoutObserver {
    fn on_decision(&mut self, event: &DecisionEvent);
}

/// Observer that discards every event.
#[derive(Debug, Default)]
pub struct NullObserver;

impl LoadoutObserver for NullObserver {
    fn on_decision(&mut self, _event: &DecisionEvent) {}
}

/// Observer that records every event, for tests and diagnostics.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub events: Vec<DecisionEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events matching a predicate.
    pub fn filtered<'a>(
        &'a self,
        predicate: impl Fn(&DecisionEvent) -> bool + 'a,
    ) -> impl Iterator<Item = &'a DecisionEvent> {
        self.events.iter().filter(move |event| predicate(event))
    }
}

impl LoadoutObserver for RecordingObserver {
    fn on_decision(&mut self, event: &DecisionEvent) {
        self.events.push(event.clone());
    }
}
