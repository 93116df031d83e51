//! Profile service domain logic.
//!
//! Creates profiles and switches the role a profile is acting as. A profile
//! may only switch to a role listed in its `available_roles`; the check lives
//! on [`DomainProfile::validate_role_transition`] so every caller goes through
//! the same rule.

use anyhow::Result;
use chrono::Utc;
use log::{debug, info, warn};
use shared::{Profile, Role};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::commands::profile::{
    CreateProfileCommand, CreateProfileResult, SwitchRoleCommand, SwitchRoleResult,
};
use crate::domain::models::profile::{DomainProfile, ProfileError};
use crate::storage::ProfileStorage;

/// How many consecutive IDs to try before giving up on a create
pub const MAX_ID_ATTEMPTS: u64 = 16;

/// Service for profile management, backed by an injected storage handle
#[derive(Clone)]
pub struct ProfileService {
    storage: Arc<dyn ProfileStorage>,
}

impl ProfileService {
    pub fn new(storage: Arc<dyn ProfileStorage>) -> Self {
        Self { storage }
    }

    /// Create a new profile. Without explicit roles the profile is a student.
    pub async fn create_profile(&self, command: CreateProfileCommand) -> Result<CreateProfileResult> {
        info!("Creating profile: {:?}", command);

        let available_roles: BTreeSet<Role> = if command.available_roles.is_empty() {
            BTreeSet::from([Role::Student])
        } else {
            command.available_roles.into_iter().collect()
        };

        let now_millis = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64;
        let mut profile = DomainProfile::new(
            Profile::generate_id(now_millis),
            &command.display_name,
            available_roles,
            Utc::now(),
        )?;

        // The store is the uniqueness check: on a collision take the next millisecond
        for offset in 0..MAX_ID_ATTEMPTS {
            profile.id = Profile::generate_id(now_millis + offset);
            match self.storage.store_profile(&profile).await {
                Ok(()) => {
                    info!("Successfully created profile: {}", profile.id);
                    return Ok(CreateProfileResult {
                        success_message: format!("Profile '{}' created", profile.display_name),
                        profile,
                    });
                }
                Err(e)
                    if matches!(
                        e.downcast_ref::<ProfileError>(),
                        Some(ProfileError::AlreadyExists(_))
                    ) =>
                {
                    debug!("Profile ID {} taken, trying the next one", profile.id);
                }
                Err(e) => return Err(e),
            }
        }

        warn!("No free profile ID after {} attempts", MAX_ID_ATTEMPTS);
        Err(ProfileError::AlreadyExists(profile.id).into())
    }

    pub async fn get_profile(&self, profile_id: &str) -> Result<DomainProfile> {
        self.storage
            .get_profile(profile_id)
            .await?
            .ok_or_else(|| ProfileError::NotFound(profile_id.to_string()).into())
    }

    pub async fn list_profiles(&self) -> Result<Vec<DomainProfile>> {
        self.storage.list_profiles().await
    }

    /// Switch the role a profile is acting as
    pub async fn switch_role(&self, command: SwitchRoleCommand) -> Result<SwitchRoleResult> {
        info!("Switching role: {:?}", command);

        let mut profile = self.get_profile(&command.profile_id).await?;
        let previous_role = match profile.switch_role(command.role, Utc::now()) {
            Ok(previous) => previous,
            Err(e) => {
                warn!("Rejected role switch for {}: {}", command.profile_id, e);
                return Err(e.into());
            }
        };

        if previous_role != command.role {
            self.storage.update_profile(&profile).await?;
        }

        Ok(SwitchRoleResult {
            success_message: format!("Now acting as {}", profile.role),
            profile,
            previous_role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory fake standing in for the real storage backend
    #[derive(Default)]
    struct InMemoryProfileStorage {
        profiles: Mutex<HashMap<String, DomainProfile>>,
        updates: Mutex<u32>,
        /// Stores to reject as if another writer had taken the ID
        collisions: Mutex<u32>,
        store_attempts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ProfileStorage for InMemoryProfileStorage {
        async fn store_profile(&self, profile: &DomainProfile) -> Result<()> {
            self.store_attempts.lock().unwrap().push(profile.id.clone());
            let mut collisions = self.collisions.lock().unwrap();
            let mut profiles = self.profiles.lock().unwrap();
            if *collisions > 0 || profiles.contains_key(&profile.id) {
                *collisions = collisions.saturating_sub(1);
                return Err(ProfileError::AlreadyExists(profile.id.clone()).into());
            }
            profiles.insert(profile.id.clone(), profile.clone());
            Ok(())
        }

        async fn get_profile(&self, profile_id: &str) -> Result<Option<DomainProfile>> {
            Ok(self.profiles.lock().unwrap().get(profile_id).cloned())
        }

        async fn update_profile(&self, profile: &DomainProfile) -> Result<()> {
            *self.updates.lock().unwrap() += 1;
            self.profiles.lock().unwrap().insert(profile.id.clone(), profile.clone());
            Ok(())
        }

        async fn list_profiles(&self) -> Result<Vec<DomainProfile>> {
            Ok(self.profiles.lock().unwrap().values().cloned().collect())
        }
    }

    fn setup() -> (ProfileService, Arc<InMemoryProfileStorage>) {
        let storage = Arc::new(InMemoryProfileStorage::default());
        (ProfileService::new(storage.clone()), storage)
    }

    #[tokio::test]
    async fn test_create_profile_defaults_to_student() {
        let (service, _) = setup();
        let result = service
            .create_profile(CreateProfileCommand {
                display_name: "Ada".to_string(),
                available_roles: vec![],
            })
            .await
            .unwrap();

        assert_eq!(result.profile.role, Role::Student);
        assert_eq!(result.profile.available_roles, BTreeSet::from([Role::Student]));
        assert!(Profile::parse_id(&result.profile.id).is_ok());
    }

    #[tokio::test]
    async fn test_create_profiles_get_distinct_ids() {
        let (service, _) = setup();
        let command = CreateProfileCommand {
            display_name: "Ada".to_string(),
            available_roles: vec![Role::Student],
        };
        let first = service.create_profile(command.clone()).await.unwrap();
        let second = service.create_profile(command).await.unwrap();
        assert_ne!(first.profile.id, second.profile.id);
        assert_eq!(service.list_profiles().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_profile_retries_taken_ids() {
        let (service, storage) = setup();
        *storage.collisions.lock().unwrap() = 2;

        let result = service
            .create_profile(CreateProfileCommand {
                display_name: "Ada".to_string(),
                available_roles: vec![],
            })
            .await
            .unwrap();

        let attempts = storage.store_attempts.lock().unwrap().clone();
        assert_eq!(attempts.len(), 3);
        assert_eq!(attempts[2], result.profile.id);
        let first = Profile::parse_id(&attempts[0]).unwrap();
        assert_eq!(Profile::parse_id(&result.profile.id).unwrap(), first + 2);
    }

    #[tokio::test]
    async fn test_create_profile_gives_up_when_ids_stay_taken() {
        let (service, storage) = setup();
        *storage.collisions.lock().unwrap() = u32::MAX;

        let err = service
            .create_profile(CreateProfileCommand {
                display_name: "Ada".to_string(),
                available_roles: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ProfileError>(),
            Some(ProfileError::AlreadyExists(_))
        ));
        assert_eq!(storage.store_attempts.lock().unwrap().len() as u64, MAX_ID_ATTEMPTS);
    }

    #[tokio::test]
    async fn test_create_profile_rejects_blank_name() {
        let (service, _) = setup();
        let err = service
            .create_profile(CreateProfileCommand {
                display_name: " ".to_string(),
                available_roles: vec![],
            })
            .await
            .unwrap_err();
        assert_eq!(err.downcast_ref::<ProfileError>(), Some(&ProfileError::EmptyDisplayName));
    }

    #[tokio::test]
    async fn test_switch_role() {
        let (service, storage) = setup();
        let created = service
            .create_profile(CreateProfileCommand {
                display_name: "Grace".to_string(),
                available_roles: vec![Role::Student, Role::Coach],
            })
            .await
            .unwrap();

        let result = service
            .switch_role(SwitchRoleCommand {
                profile_id: created.profile.id.clone(),
                role: Role::Coach,
            })
            .await
            .unwrap();
        assert_eq!(result.previous_role, Role::Student);
        assert_eq!(result.profile.role, Role::Coach);
        assert_eq!(service.get_profile(&created.profile.id).await.unwrap().role, Role::Coach);
        assert_eq!(*storage.updates.lock().unwrap(), 1);

        // Same role again does not touch storage
        service
            .switch_role(SwitchRoleCommand {
                profile_id: created.profile.id.clone(),
                role: Role::Coach,
            })
            .await
            .unwrap();
        assert_eq!(*storage.updates.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_switch_to_unavailable_role_fails() {
        let (service, _) = setup();
        let created = service
            .create_profile(CreateProfileCommand {
                display_name: "Grace".to_string(),
                available_roles: vec![Role::Student],
            })
            .await
            .unwrap();

        let err = service
            .switch_role(SwitchRoleCommand {
                profile_id: created.profile.id.clone(),
                role: Role::Admin,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ProfileError>(),
            Some(ProfileError::RoleNotAvailable { requested: Role::Admin, .. })
        ));
        assert_eq!(service.get_profile(&created.profile.id).await.unwrap().role, Role::Student);
    }

    #[tokio::test]
    async fn test_switch_role_for_missing_profile() {
        let (service, _) = setup();
        let err = service
            .switch_role(SwitchRoleCommand {
                profile_id: "profile::404".to_string(),
                role: Role::Student,
            })
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<ProfileError>(),
            Some(&ProfileError::NotFound("profile::404".to_string()))
        );
    }
}
