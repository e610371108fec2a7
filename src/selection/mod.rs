//! # Selection Module
//!
//! The per-category selectors. Each is a pure function over its budget, the
//! character context, and the catalog: it either picks the best affordable
//! option or signals "nothing selected" by returning `None`/empty, never by
//! erroring. Budget insufficiency is the dominant, expected outcome at low
//! wealth and stays cheap and silent.

pub mod consumable;
pub mod enhancement;
pub mod wondrous;

pub use consumable::*;
pub use enhancement::*;
pub use wondrous::*;
