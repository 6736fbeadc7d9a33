//! External data client for the Star Wars GraphQL API.
//!
//! [`client::GraphqlClient`] is a generic GraphQL-over-HTTP client; the
//! [`planets`] module supplies the planet query and adapts the client to the
//! core `PlanetSource` contract.

pub mod client;
pub mod config;
pub mod planets;

pub use client::{GraphqlClient, GraphqlRequest};
pub use config::GraphqlConfig;
pub use planets::StarWarsPlanets;
