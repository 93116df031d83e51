//! # YAML Profile Repository
//!
//! File-based profile storage. Each profile lives in its own document:
//!
//! ```text
//! data/
//! └── profiles/
//!     ├── profile__1702516122000.yaml
//!     └── profile__1702516125000.yaml
//! ```

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use shared::Profile as SharedProfile;
use std::fs;
use std::path::Path;

use super::connection::YamlConnection;
use crate::domain::models::profile::{DomainProfile, ProfileError};
use crate::io::rest::mappers::profile_mapper::ProfileMapper;
use crate::storage::traits::ProfileStorage;

#[derive(Debug, Clone)]
pub struct YamlProfileRepository {
    connection: YamlConnection,
}

impl YamlProfileRepository {
    pub fn new(connection: YamlConnection) -> Self {
        Self { connection }
    }

    fn load_profile_file(path: &Path) -> Result<DomainProfile> {
        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let shared_profile: SharedProfile = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        ProfileMapper::to_domain(shared_profile)
    }

    fn to_yaml(profile: &DomainProfile) -> Result<String> {
        Ok(serde_yaml::to_string(&ProfileMapper::to_dto(profile.clone()))?)
    }
}

#[async_trait]
impl ProfileStorage for YamlProfileRepository {
    async fn store_profile(&self, profile: &DomainProfile) -> Result<()> {
        let path = self.connection.profile_file_path(&profile.id);
        if !self.connection.write_new(&path, &Self::to_yaml(profile)?)? {
            return Err(ProfileError::AlreadyExists(profile.id.clone()).into());
        }
        info!("Stored profile {} ({})", profile.id, profile.display_name);
        Ok(())
    }

    async fn get_profile(&self, profile_id: &str) -> Result<Option<DomainProfile>> {
        let path = self.connection.profile_file_path(profile_id);
        if !path.exists() {
            return Ok(None);
        }
        Self::load_profile_file(&path).map(Some)
    }

    async fn update_profile(&self, profile: &DomainProfile) -> Result<()> {
        let path = self.connection.profile_file_path(&profile.id);
        if !path.exists() {
            return Err(anyhow::anyhow!("Cannot update missing profile {}", profile.id));
        }
        self.connection.write_atomically(&path, &Self::to_yaml(profile)?)?;
        debug!("Saved profile {} to {}", profile.id, path.display());
        Ok(())
    }

    async fn list_profiles(&self) -> Result<Vec<DomainProfile>> {
        let directory = self.connection.profiles_directory();
        if !directory.exists() {
            debug!("Profiles directory doesn't exist, returning empty list");
            return Ok(Vec::new());
        }

        let mut profiles = Vec::new();
        for entry in fs::read_dir(&directory)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("yaml") {
                continue;
            }
            match Self::load_profile_file(&path) {
                Ok(profile) => profiles.push(profile),
                Err(e) => warn!("Skipping unreadable profile {}: {:#}", path.display(), e),
            }
        }

        profiles.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        Ok(profiles)
    }
}
