//! The planet query and its [`PlanetSource`] adapter.

use async_trait::async_trait;
use planetsync_core::planet::RawPlanetItem;
use planetsync_core::sync::{FetchError, PlanetSource};
use serde::Deserialize;

use crate::client::{GraphqlClient, GraphqlRequest};
use crate::config::GraphqlConfig;

/// Fetches every planet with the fields the sync engine persists.
pub const ALL_PLANETS_QUERY: &str = r#"
query GetPlanets {
  allPlanets {
    planets {
      id
      name
      population
      climates
      terrains
    }
  }
}
"#;

pub fn all_planets_request() -> GraphqlRequest {
    GraphqlRequest::new(ALL_PLANETS_QUERY)
}

/// `data` object of the `GetPlanets` query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AllPlanetsData {
    #[serde(default)]
    all_planets: Option<PlanetConnection>,
}

#[derive(Debug, Deserialize)]
struct PlanetConnection {
    #[serde(default)]
    planets: Option<Vec<RawPlanetItem>>,
}

impl AllPlanetsData {
    /// Null or absent `allPlanets` / `planets` mean no planets.
    fn into_planets(self) -> Vec<RawPlanetItem> {
        self.all_planets
            .and_then(|connection| connection.planets)
            .unwrap_or_default()
    }
}

/// [`PlanetSource`] backed by the Star Wars GraphQL API.
pub struct StarWarsPlanets {
    client: GraphqlClient,
}

impl StarWarsPlanets {
    pub fn new(client: GraphqlClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &GraphqlConfig) -> Result<Self, FetchError> {
        let client = GraphqlClient::new(config.endpoint.clone(), config.timeout())?;
        Ok(Self::new(client))
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }
}

#[async_trait]
impl PlanetSource for StarWarsPlanets {
    async fn fetch_planets(&self) -> Result<Vec<RawPlanetItem>, FetchError> {
        let data: AllPlanetsData = self.client.execute(&all_planets_request()).await?;
        let planets = data.into_planets();
        tracing::info!(
            endpoint = %self.client.endpoint(),
            count = planets.len(),
            "Fetched planets from GraphQL API"
        );
        Ok(planets)
    }
}
