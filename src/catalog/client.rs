//! Remote catalog client port.
//!
//! The controller only depends on the call contract defined here; network and
//! protocol details live in adapters such as
//! [`HttpCatalogClient`](crate::catalog::HttpCatalogClient).

use crate::domain::{CatalogError, CharacterId, CharacterSummary};
use async_trait::async_trait;
use serde::Deserialize;

/// Remote character catalog - outbound port.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Searches characters whose name contains `name`.
    ///
    /// Returns [`CatalogError::NotFound`] when the catalog reports no match.
    async fn search_by_name(&self, name: &str) -> Result<Vec<CharacterSummary>, CatalogError>;

    /// Fetches a single character.
    async fn get_by_id(&self, id: CharacterId) -> Result<CharacterSummary, CatalogError>;

    /// Fetches several characters in one request.
    ///
    /// Always yields a sequence, even when the remote answers a one-id lookup
    /// with a bare record (see [`OneOrMany`]).
    async fn get_by_ids(&self, ids: &[CharacterId]) -> Result<Vec<CharacterSummary>, CatalogError>;
}

/// A response body that is either a single record or a list of records.
///
/// # Examples
///
/// ```
/// use character_finder::catalog::OneOrMany;
///
/// let one: OneOrMany<u32> = serde_json::from_str("7")?;
/// let many: OneOrMany<u32> = serde_json::from_str("[7, 8]")?;
/// assert_eq!(one.into_vec(), vec![7]);
/// assert_eq!(many.into_vec(), vec![7, 8]);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    /// Normalizes to a sequence.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}
