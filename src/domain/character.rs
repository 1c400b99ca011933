//! Character record model.
//!
//! [`CharacterSummary`] is the minimal display record for one catalog entry.
//! Its serde layout follows the catalog's JSON wire format, so records decode
//! directly from API responses.

use serde::{Deserialize, Deserializer, Serialize};

/// Catalog identifier of a character.
pub type CharacterId = u64;

/// A named place reference (origin or last known location).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlaceRef {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl PlaceRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: String::new(),
        }
    }
}

/// Minimal display record for one catalog entry.
///
/// The catalog reports a missing `type` as an empty string; it is decoded as
/// `None` so presentation can skip the field.
///
/// # Examples
///
/// ```
/// use character_finder::domain::CharacterSummary;
///
/// let rick: CharacterSummary = serde_json::from_str(r#"{
///     "id": 1, "name": "Rick Sanchez", "status": "Alive", "species": "Human",
///     "type": "", "gender": "Male",
///     "origin": {"name": "Earth (C-137)", "url": ""},
///     "location": {"name": "Citadel of Ricks", "url": ""},
///     "image": "https://example.invalid/1.jpeg"
/// }"#)?;
/// assert_eq!(rick.id, 1);
/// assert!(rick.kind.is_none());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSummary {
    pub id: CharacterId,
    pub name: String,
    pub status: String,
    pub species: String,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(default)]
    pub gender: String,
    pub image: String,
    pub origin: PlaceRef,
    pub location: PlaceRef,
}

impl CharacterSummary {
    /// Builds a record with placeholder attributes.
    ///
    /// Handy for fixtures; real records come from the catalog.
    #[must_use]
    pub fn new(id: CharacterId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: "unknown".to_string(),
            species: "unknown".to_string(),
            kind: None,
            gender: "unknown".to_string(),
            image: String::new(),
            origin: PlaceRef::new("unknown"),
            location: PlaceRef::new("unknown"),
        }
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_catalog_record_with_type() {
        let json = r#"{
            "id": 7, "name": "Abradolf Lincler", "status": "unknown",
            "species": "Human", "type": "Genetic experiment", "gender": "Male",
            "origin": {"name": "Earth (Replacement Dimension)", "url": "x"},
            "location": {"name": "Testicle Monster Dimension", "url": "y"},
            "image": "https://example.invalid/7.jpeg",
            "episode": [], "url": "", "created": "2017-11-04T19:59:20.523Z"
        }"#;
        let c: CharacterSummary = serde_json::from_str(json).unwrap();
        assert_eq!(c.kind.as_deref(), Some("Genetic experiment"));
        assert_eq!(c.location.name, "Testicle Monster Dimension");
    }

    #[test]
    fn missing_type_is_skipped_when_encoding() {
        let c = CharacterSummary::new(1, "Rick Sanchez");
        let json = serde_json::to_value(&c).unwrap();
        assert!(json.get("type").is_none());
        assert_eq!(json["origin"]["name"], "unknown");
    }
}
