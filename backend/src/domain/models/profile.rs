//! Domain model for a platform member profile and its role switching rules.
use chrono::{DateTime, Utc};
use shared::Role;
use std::collections::BTreeSet;

pub const MAX_DISPLAY_NAME_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct DomainProfile {
    pub id: String,
    pub display_name: String,
    pub role: Role,
    pub available_roles: BTreeSet<Role>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DomainProfile {
    /// Build a validated profile. The initial role is the lowest available one.
    pub fn new(
        id: String,
        display_name: &str,
        available_roles: BTreeSet<Role>,
        now: DateTime<Utc>,
    ) -> Result<Self, ProfileError> {
        let display_name = Self::validate_display_name(display_name)?;
        let role = *available_roles
            .iter()
            .next()
            .ok_or(ProfileError::NoAvailableRoles)?;

        Ok(Self {
            id,
            display_name,
            role,
            available_roles,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn validate_display_name(display_name: &str) -> Result<String, ProfileError> {
        let trimmed = display_name.trim();
        if trimmed.is_empty() {
            return Err(ProfileError::EmptyDisplayName);
        }
        if trimmed.chars().count() > MAX_DISPLAY_NAME_LENGTH {
            return Err(ProfileError::DisplayNameTooLong(MAX_DISPLAY_NAME_LENGTH));
        }
        Ok(trimmed.to_string())
    }

    /// Check that `target` is one of the roles this profile may act as
    pub fn validate_role_transition(&self, target: Role) -> Result<(), ProfileError> {
        if self.available_roles.contains(&target) {
            Ok(())
        } else {
            Err(ProfileError::RoleNotAvailable {
                requested: target,
                available: self.available_roles.iter().copied().collect(),
            })
        }
    }

    /// Switch to `target`, returning the previous role. Switching to the
    /// current role is a no-op that leaves `updated_at` untouched.
    pub fn switch_role(&mut self, target: Role, now: DateTime<Utc>) -> Result<Role, ProfileError> {
        self.validate_role_transition(target)?;
        let previous = self.role;
        if previous != target {
            self.role = target;
            self.updated_at = now;
        }
        Ok(previous)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("Display name cannot be empty")]
    EmptyDisplayName,
    #[error("Display name cannot exceed {0} characters")]
    DisplayNameTooLong(usize),
    #[error("A profile needs at least one available role")]
    NoAvailableRoles,
    #[error("Role '{requested}' is not available for this profile (available: {available:?})")]
    RoleNotAvailable { requested: Role, available: Vec<Role> },
    #[error("Profile already exists: {0}")]
    AlreadyExists(String),
    #[error("Profile not found: {0}")]
    NotFound(String),
}
