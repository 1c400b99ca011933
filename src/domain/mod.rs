//! Domain layer for the character finder.
//!
//! Core types that are independent of the network client, storage backend
//! and presentation.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`character`]: Character record model
//!
//! # Examples
//!
//! ```
//! use character_finder::domain::{CharacterSummary, Result};
//!
//! fn fixture() -> Result<CharacterSummary> {
//!     Ok(CharacterSummary::new(1, "Rick Sanchez"))
//! }
//! assert_eq!(fixture().unwrap().id, 1);
//! ```

pub mod character;
pub mod error;

pub use character::{CharacterId, CharacterSummary, PlaceRef};
pub use error::{CatalogError, FinderError, Result};
