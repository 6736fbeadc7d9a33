//! Repository layer: one zero-sized struct per table with associated query
//! functions.

pub mod planet_repo;

pub use planet_repo::PlanetRepo;
