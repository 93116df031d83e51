//! # Storage Module
//!
//! Handles persistence for the learning platform backend.
//!
//! The domain layer depends only on the traits in [`traits`]; concrete
//! backends are handed to services at construction time instead of being
//! reached through a process-wide client. The bundled backend keeps one YAML
//! document per profile under the configured data directory.

pub mod traits;
pub mod yaml;

pub use traits::ProfileStorage;
pub use yaml::{YamlConnection, YamlProfileRepository};
