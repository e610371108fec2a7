//! # Loadout Module
//!
//! The assembler that runs the partitioner and selectors in their fixed
//! sequence, the immutable result it returns, and the injectable decision
//! observer the whole pipeline reports into.

pub mod assembler;
pub mod observer;

pub use assembler::*;
pub use observer::*;
