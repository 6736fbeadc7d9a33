//! Domain layer for planet synchronization.
//!
//! Holds the planet value types, the filler-data generator, and the
//! contracts (source, store, statistics) the sync engine is built on.
//! Nothing in this crate performs I/O.

pub mod error;
pub mod generator;
pub mod planet;
pub mod sync;
pub mod types;
