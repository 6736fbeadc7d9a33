//! Filler data for planets the upstream source left incomplete.
//!
//! Populations are drawn in two stages (pick a magnitude bucket, then a value
//! inside it) so small and huge worlds are equally likely. Climate and
//! terrain tags are sampled without replacement from fixed vocabularies.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::planet::RawPlanetItem;

// ---------------------------------------------------------------------------
// Vocabularies
// ---------------------------------------------------------------------------

/// Climate descriptors used for generated planets.
pub const CLIMATE_TYPES: [&str; 20] = [
    "temperate",
    "tropical",
    "arid",
    "frozen",
    "humid",
    "windy",
    "hot",
    "cold",
    "mild",
    "stormy",
    "clear",
    "cloudy",
    "rainy",
    "dry",
    "moist",
    "foggy",
    "misty",
    "hazy",
    "crisp",
    "muggy",
];

/// Terrain descriptors used for generated planets.
pub const TERRAIN_TYPES: [&str; 26] = [
    "desert",
    "forest",
    "rainforest",
    "grassland",
    "tundra",
    "mountains",
    "hills",
    "plains",
    "swamp",
    "jungle",
    "savanna",
    "steppe",
    "marsh",
    "volcanoes",
    "canyons",
    "valleys",
    "plateaus",
    "islands",
    "coastlines",
    "caves",
    "craters",
    "lakes",
    "rivers",
    "oceans",
    "glaciers",
    "cliffs",
];

/// Inclusive population buckets, one per order of magnitude.
pub const POPULATION_RANGES: [(i64, i64); 7] = [
    (1_000, 10_000),
    (10_000, 100_000),
    (100_000, 1_000_000),
    (1_000_000, 10_000_000),
    (10_000_000, 100_000_000),
    (100_000_000, 1_000_000_000),
    (1_000_000_000, 10_000_000_000),
];

/// Generated populations are rounded down to a multiple of this.
pub const POPULATION_GRANULARITY: i64 = 1_000;

/// Default climate count range when none is requested.
const DEFAULT_CLIMATE_COUNT: (usize, usize) = (1, 3);

/// Default terrain count range when none is requested.
const DEFAULT_TERRAIN_COUNT: (usize, usize) = (2, 4);

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Random filler-data source.
///
/// Wraps any [`Rng`] so tests can drive it with a seeded generator. The
/// free functions in this module use the thread-local RNG.
pub struct PlanetDataGenerator<R> {
    rng: R,
}

impl<R: Rng> PlanetDataGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Pick a magnitude bucket, then a value inside it, floored to
    /// [`POPULATION_GRANULARITY`].
    pub fn population(&mut self) -> i64 {
        let (min, max) = POPULATION_RANGES[self.rng.random_range(0..POPULATION_RANGES.len())];
        let population = self.rng.random_range(min..=max);
        (population / POPULATION_GRANULARITY) * POPULATION_GRANULARITY
    }

    /// Distinct climate tags. `count` defaults to 1..=3 and is clamped to
    /// the vocabulary size.
    pub fn climates(&mut self, count: Option<usize>) -> Vec<String> {
        self.sample_tags(&CLIMATE_TYPES, count, DEFAULT_CLIMATE_COUNT)
    }

    /// Distinct terrain tags. `count` defaults to 2..=4 and is clamped to
    /// the vocabulary size.
    pub fn terrains(&mut self, count: Option<usize>) -> Vec<String> {
        self.sample_tags(&TERRAIN_TYPES, count, DEFAULT_TERRAIN_COUNT)
    }

    /// Return a copy of `raw` with empty population, climates and terrains
    /// replaced by generated values. Present values are never overwritten.
    ///
    /// A population of `0` counts as missing.
    pub fn fill_missing(&mut self, name: &str, raw: &RawPlanetItem) -> RawPlanetItem {
        let mut filled = raw.clone();

        if raw.population.is_none_or(|population| population == 0.0) {
            filled.population = Some(self.population() as f64);
            tracing::debug!(planet = name, "Generated population");
        }

        if raw.climates.as_ref().is_none_or(Vec::is_empty) {
            filled.climates = Some(self.climates(None));
            tracing::debug!(planet = name, "Generated climates");
        }

        if raw.terrains.as_ref().is_none_or(Vec::is_empty) {
            filled.terrains = Some(self.terrains(None));
            tracing::debug!(planet = name, "Generated terrains");
        }

        filled
    }

    fn sample_tags(
        &mut self,
        vocabulary: &[&str],
        count: Option<usize>,
        (min, max): (usize, usize),
    ) -> Vec<String> {
        let count = count
            .unwrap_or_else(|| self.rng.random_range(min..=max))
            .min(vocabulary.len());

        vocabulary
            .choose_multiple(&mut self.rng, count)
            .map(|tag| (*tag).to_string())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Thread-local convenience functions
// ---------------------------------------------------------------------------

/// Generate a random population using the thread-local RNG.
pub fn generate_population() -> i64 {
    PlanetDataGenerator::new(rand::rng()).population()
}

/// Generate random climate tags using the thread-local RNG.
pub fn generate_climates(count: Option<usize>) -> Vec<String> {
    PlanetDataGenerator::new(rand::rng()).climates(count)
}

/// Generate random terrain tags using the thread-local RNG.
pub fn generate_terrains(count: Option<usize>) -> Vec<String> {
    PlanetDataGenerator::new(rand::rng()).terrains(count)
}

/// Fill missing fields of `raw` using the thread-local RNG.
pub fn fill_missing(name: &str, raw: &RawPlanetItem) -> RawPlanetItem {
    PlanetDataGenerator::new(rand::rng()).fill_missing(name, raw)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn seeded(seed: u64) -> PlanetDataGenerator<StdRng> {
        PlanetDataGenerator::new(StdRng::seed_from_u64(seed))
    }

    fn assert_distinct(tags: &[String]) {
        let unique: HashSet<&String> = tags.iter().collect();
        assert_eq!(unique.len(), tags.len(), "duplicate tags in {tags:?}");
    }

    #[test]
    fn vocabularies_have_expected_sizes_and_no_duplicates() {
        assert_eq!(CLIMATE_TYPES.iter().collect::<HashSet<_>>().len(), 20);
        assert_eq!(TERRAIN_TYPES.iter().collect::<HashSet<_>>().len(), 26);
    }

    #[test]
    fn population_is_positive_multiple_of_granularity() {
        let mut generator = seeded(7);
        for _ in 0..500 {
            let population = generator.population();
            assert!(population >= 1_000, "got {population}");
            assert!(population <= 10_000_000_000, "got {population}");
            assert_eq!(population % POPULATION_GRANULARITY, 0);
        }
    }

    #[test]
    fn population_spreads_across_magnitudes() {
        let mut generator = seeded(11);
        let magnitudes: HashSet<u32> = (0..500).map(|_| generator.population().ilog10()).collect();
        assert!(magnitudes.len() >= 5, "only saw magnitudes {magnitudes:?}");
    }

    #[test]
    fn default_climates_are_one_to_three_distinct_known_tags() {
        let mut generator = seeded(1);
        for _ in 0..200 {
            let climates = generator.climates(None);
            assert!((1..=3).contains(&climates.len()));
            assert_distinct(&climates);
            assert!(climates.iter().all(|c| CLIMATE_TYPES.contains(&c.as_str())));
        }
    }

    #[test]
    fn default_terrains_are_two_to_four_distinct_known_tags() {
        let mut generator = seeded(2);
        for _ in 0..200 {
            let terrains = generator.terrains(None);
            assert!((2..=4).contains(&terrains.len()));
            assert_distinct(&terrains);
            assert!(terrains.iter().all(|t| TERRAIN_TYPES.contains(&t.as_str())));
        }
    }

    #[test]
    fn explicit_count_is_honoured() {
        let mut generator = seeded(3);
        assert_eq!(generator.climates(Some(2)).len(), 2);
        assert_eq!(generator.terrains(Some(3)).len(), 3);
        assert!(generator.climates(Some(0)).is_empty());
    }

    #[test]
    fn count_is_clamped_to_vocabulary_size() {
        let mut generator = seeded(4);

        let climates = generator.climates(Some(100));
        assert_eq!(climates.len(), CLIMATE_TYPES.len());
        assert_distinct(&climates);

        let terrains = generator.terrains(Some(27));
        assert_eq!(terrains.len(), TERRAIN_TYPES.len());
        assert_distinct(&terrains);
    }

    #[test]
    fn fill_missing_keeps_complete_item_unchanged() {
        let raw = RawPlanetItem {
            id: Some("test-123".into()),
            name: Some("Test Planet".into()),
            population: Some(1_000_000.0),
            climates: Some(vec!["temperate".into()]),
            terrains: Some(vec!["forest".into()]),
        };

        let filled = seeded(5).fill_missing("Test Planet", &raw);
        assert_eq!(filled, raw);
    }

    #[test]
    fn fill_missing_generates_only_absent_fields() {
        let raw = RawPlanetItem {
            id: Some("2".into()),
            name: Some("Alderaan".into()),
            population: None,
            climates: Some(vec!["temperate".into()]),
            terrains: Some(vec![]),
        };

        let filled = seeded(6).fill_missing("Alderaan", &raw);

        assert_eq!(filled.id, raw.id);
        assert_eq!(filled.name, raw.name);
        assert_eq!(filled.climates, raw.climates);

        let population = filled.population.unwrap();
        assert!(population >= 1_000.0);
        assert_eq!(population % 1_000.0, 0.0);

        let terrains = filled.terrains.unwrap();
        assert!((2..=4).contains(&terrains.len()));
    }

    #[test]
    fn fill_missing_treats_zero_population_as_missing() {
        let raw = RawPlanetItem {
            population: Some(0.0),
            ..Default::default()
        };

        let filled = seeded(8).fill_missing("Zero", &raw);
        assert!(filled.population.unwrap() >= 1_000.0);
    }

    #[test]
    fn fill_missing_does_not_mutate_input() {
        let raw = RawPlanetItem::default();
        let before = raw.clone();

        let filled = seeded(9).fill_missing("Nowhere", &raw);

        assert_eq!(raw, before);
        assert_ne!(filled, raw);
    }

    #[test]
    fn thread_local_helpers_follow_the_same_rules() {
        let population = generate_population();
        assert_eq!(population % POPULATION_GRANULARITY, 0);
        assert!((1..=3).contains(&generate_climates(None).len()));
        assert!((2..=4).contains(&generate_terrains(None).len()));

        let filled = fill_missing("Dagobah", &RawPlanetItem::default());
        assert!(filled.population.is_some());
        assert!(filled.climates.is_some_and(|c| !c.is_empty()));
        assert!(filled.terrains.is_some_and(|t| !t.is_empty()));
    }
}
