//! # Budget Module
//!
//! The cost model and the wealth partitioner.
//!
//! [`cost`] holds the fixed pricing tables: the non-linear enhancement curve
//! per equipment category, masterwork fees, and the spell-level × caster-level
//! consumable formula. [`partition`] turns a wealth pool into the nested
//! category budget tree every selector draws from.

pub mod cost;
pub mod partition;

pub use cost::*;
pub use partition::*;
