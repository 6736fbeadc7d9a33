//! Planet value types and the mapping from upstream items to persisted fields.
//!
//! Upstream items are loosely typed (every field may be null), while the
//! `planets` table is not. [`to_planet_upsert`] is the single place where a
//! filled [`RawPlanetItem`] is checked and narrowed into [`PlanetUpsert`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Name stored for upstream items that carry no usable name.
pub const UNKNOWN_PLANET_NAME: &str = "Unknown Planet";

/// Maximum length of `planets.name` (VARCHAR(255)).
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum length of `planets.external_id` (VARCHAR(255)).
pub const MAX_EXTERNAL_ID_LENGTH: usize = 255;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A planet as returned by the upstream GraphQL source.
///
/// Population arrives as a JSON float upstream, so it is kept as `f64`
/// until [`to_planet_upsert`] validates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPlanetItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub population: Option<f64>,
    #[serde(default)]
    pub climates: Option<Vec<String>>,
    #[serde(default)]
    pub terrains: Option<Vec<String>>,
}

/// The mutable columns written by an upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetFields {
    pub name: String,
    pub population: i64,
    pub climates: Vec<String>,
    pub terrains: Vec<String>,
}

/// A fully mapped upstream item, ready for the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanetUpsert {
    pub external_id: Option<String>,
    pub fields: PlanetFields,
}

/// Failure to map or persist a single upstream item.
///
/// These never abort a sync run; they are counted and logged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("population must be a non-negative whole number, got {0}")]
    InvalidPopulation(f64),

    #[error("name exceeds {MAX_NAME_LENGTH} characters ({0})")]
    NameTooLong(usize),

    #[error("external id exceeds {MAX_EXTERNAL_ID_LENGTH} characters ({0})")]
    ExternalIdTooLong(usize),

    #[error("store rejected record: {0}")]
    Store(String),
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

/// Name used for logging and storage: the trimmed upstream name, or
/// [`UNKNOWN_PLANET_NAME`] when it is missing or blank.
pub fn display_name(raw: &RawPlanetItem) -> &str {
    raw.name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_PLANET_NAME)
}

/// Map a (filled) upstream item to the persisted shape.
///
/// Absent population maps to `0`, absent tag lists to empty lists.
pub fn to_planet_upsert(raw: &RawPlanetItem) -> Result<PlanetUpsert, RecordError> {
    let name = display_name(raw);
    let name_len = name.chars().count();
    if name_len > MAX_NAME_LENGTH {
        return Err(RecordError::NameTooLong(name_len));
    }

    if let Some(id) = &raw.id {
        let id_len = id.chars().count();
        if id_len > MAX_EXTERNAL_ID_LENGTH {
            return Err(RecordError::ExternalIdTooLong(id_len));
        }
    }

    Ok(PlanetUpsert {
        external_id: raw.id.clone(),
        fields: PlanetFields {
            name: name.to_string(),
            population: population_from_raw(raw.population)?,
            climates: raw.climates.clone().unwrap_or_default(),
            terrains: raw.terrains.clone().unwrap_or_default(),
        },
    })
}

/// Narrow an upstream population to a non-negative integer.
fn population_from_raw(value: Option<f64>) -> Result<i64, RecordError> {
    let Some(value) = value else {
        return Ok(0);
    };

    // `i64::MAX as f64` rounds up to 2^63, which is already out of range.
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value >= i64::MAX as f64 {
        return Err(RecordError::InvalidPopulation(value));
    }

    Ok(value as i64)
}

// ---------------------------------------------------------------------------
// Validation (manual create / update)
// ---------------------------------------------------------------------------

/// Validate a planet name and return it trimmed.
pub fn validate_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Planet name cannot be empty".into()));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Planet name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate that a population is non-negative.
pub fn validate_population(population: i64) -> Result<(), CoreError> {
    if population < 0 {
        return Err(CoreError::Validation(
            "Population cannot be negative".into(),
        ));
    }
    Ok(())
}

/// Validate an optional external id. Blank values are normalised to `None`.
pub fn validate_external_id(external_id: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(id) = external_id.map(str::trim).filter(|id| !id.is_empty()) else {
        return Ok(None);
    };
    if id.chars().count() > MAX_EXTERNAL_ID_LENGTH {
        return Err(CoreError::Validation(format!(
            "external_id must be at most {MAX_EXTERNAL_ID_LENGTH} characters"
        )));
    }
    Ok(Some(id.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn tatooine() -> RawPlanetItem {
        RawPlanetItem {
            id: Some("cGxhbmV0czox".into()),
            name: Some("Tatooine".into()),
            population: Some(200_000.0),
            climates: Some(vec!["arid".into()]),
            terrains: Some(vec!["desert".into()]),
        }
    }

    #[test]
    fn display_name_trims_upstream_name() {
        let raw = RawPlanetItem {
            name: Some("  Hoth ".into()),
            ..Default::default()
        };
        assert_eq!(display_name(&raw), "Hoth");
    }

    #[test]
    fn display_name_falls_back_for_missing_or_blank() {
        assert_eq!(display_name(&RawPlanetItem::default()), UNKNOWN_PLANET_NAME);

        let blank = RawPlanetItem {
            name: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(display_name(&blank), UNKNOWN_PLANET_NAME);
    }

    #[test]
    fn maps_complete_item() {
        let upsert = to_planet_upsert(&tatooine()).unwrap();

        assert_eq!(upsert.external_id.as_deref(), Some("cGxhbmV0czox"));
        assert_eq!(upsert.fields.name, "Tatooine");
        assert_eq!(upsert.fields.population, 200_000);
        assert_eq!(upsert.fields.climates, vec!["arid"]);
        assert_eq!(upsert.fields.terrains, vec!["desert"]);
    }

    #[test]
    fn maps_absent_fields_to_defaults() {
        let upsert = to_planet_upsert(&RawPlanetItem::default()).unwrap();

        assert_eq!(upsert.external_id, None);
        assert_eq!(upsert.fields.name, UNKNOWN_PLANET_NAME);
        assert_eq!(upsert.fields.population, 0);
        assert!(upsert.fields.climates.is_empty());
        assert!(upsert.fields.terrains.is_empty());
    }

    #[test]
    fn rejects_negative_population() {
        let raw = RawPlanetItem {
            population: Some(-5.0),
            ..tatooine()
        };
        assert_eq!(
            to_planet_upsert(&raw),
            Err(RecordError::InvalidPopulation(-5.0))
        );
    }

    #[test]
    fn rejects_fractional_and_non_finite_population() {
        for bad in [1.5, f64::NAN, f64::INFINITY, 1e19] {
            let raw = RawPlanetItem {
                population: Some(bad),
                ..tatooine()
            };
            assert!(matches!(
                to_planet_upsert(&raw),
                Err(RecordError::InvalidPopulation(_))
            ));
        }
    }

    #[test]
    fn accepts_largest_generated_population() {
        let raw = RawPlanetItem {
            population: Some(10_000_000_000.0),
            ..tatooine()
        };
        assert_eq!(to_planet_upsert(&raw).unwrap().fields.population, 10_000_000_000);
    }

    #[test]
    fn rejects_overlong_name() {
        let raw = RawPlanetItem {
            name: Some("x".repeat(MAX_NAME_LENGTH + 1)),
            ..tatooine()
        };
        assert_eq!(
            to_planet_upsert(&raw),
            Err(RecordError::NameTooLong(MAX_NAME_LENGTH + 1))
        );
    }

    #[test]
    fn rejects_overlong_external_id() {
        let raw = RawPlanetItem {
            id: Some("i".repeat(MAX_EXTERNAL_ID_LENGTH + 1)),
            ..tatooine()
        };
        assert!(matches!(
            to_planet_upsert(&raw),
            Err(RecordError::ExternalIdTooLong(_))
        ));
    }

    #[test]
    fn validate_name_trims_and_rejects_blank() {
        assert_eq!(validate_name("  Naboo  ").unwrap(), "Naboo");
        assert!(validate_name("   ").is_err());
        assert!(validate_name("").is_err());
    }

    #[test]
    fn validate_population_rejects_negative() {
        assert!(validate_population(0).is_ok());
        assert!(validate_population(1_000).is_ok());
        assert!(validate_population(-1).is_err());
    }

    #[test]
    fn validate_external_id_normalises_blank() {
        assert_eq!(validate_external_id(None).unwrap(), None);
        assert_eq!(validate_external_id(Some("  ")).unwrap(), None);
        assert_eq!(
            validate_external_id(Some(" abc ")).unwrap().as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn raw_item_deserializes_with_nulls() {
        let raw: RawPlanetItem = serde_json::from_value(serde_json::json!({
            "id": "2",
            "name": "Alderaan",
            "population": null,
            "climates": null
        }))
        .unwrap();

        assert_eq!(raw.id.as_deref(), Some("2"));
        assert_eq!(raw.population, None);
        assert_eq!(raw.climates, None);
        assert_eq!(raw.terrains, None);
    }
}
