//! # Storage Traits
//!
//! Storage abstractions that let the domain layer work with any backend,
//! including in-memory fakes in tests.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::profile::DomainProfile;

/// Interface for profile storage operations
#[async_trait]
pub trait ProfileStorage: Send + Sync {
    /// Store a new profile
    async fn store_profile(&self, profile: &DomainProfile) -> Result<()>;

    /// Retrieve a profile by ID
    async fn get_profile(&self, profile_id: &str) -> Result<Option<DomainProfile>>;

    /// Replace an existing profile
    async fn update_profile(&self, profile: &DomainProfile) -> Result<()>;

    /// List all profiles ordered by display name
    async fn list_profiles(&self) -> Result<Vec<DomainProfile>>;
}
