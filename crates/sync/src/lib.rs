//! Planet synchronization engine.
//!
//! [`PlanetSyncEngine`] pulls the upstream planet list through a
//! [`PlanetSource`](planetsync_core::sync::PlanetSource), fills missing
//! fields with generated data and reconciles every item against a
//! [`PlanetStore`](planetsync_core::sync::PlanetStore) inside one scope.

pub mod engine;
pub mod error;

pub use engine::PlanetSyncEngine;
pub use error::SyncError;
