pub mod planets;
pub mod sync;
