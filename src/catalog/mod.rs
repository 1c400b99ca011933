//! Remote character catalog: the client port and its adapters.
//!
//! # Modules
//!
//! - `client`: [`CatalogClient`] port and response normalization
//! - `http`: `reqwest` adapter for the public REST API
//! - `scripted`: canned-answer client for tests and offline runs

pub mod client;
pub mod http;
pub mod scripted;

pub use client::{CatalogClient, OneOrMany};
pub use http::HttpCatalogClient;
pub use scripted::{CatalogCall, ScriptedCatalog};
