use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use shared::{Profile, Role};
use std::collections::BTreeSet;

use crate::domain::models::profile::DomainProfile;

pub struct ProfileMapper;

impl ProfileMapper {
    /// Convert a shared Profile DTO to the domain model. The active role
    /// must be one of the profile's available roles.
    pub fn to_domain(dto: Profile) -> Result<DomainProfile> {
        let available_roles: BTreeSet<Role> = dto.available_roles.into_iter().collect();
        if !available_roles.contains(&dto.role) {
            bail!(
                "Profile {} acts as {} but only has roles {:?}",
                dto.id,
                dto.role,
                available_roles
            );
        }

        let created_at = DateTime::parse_from_rfc3339(&dto.created_at)
            .with_context(|| format!("Invalid created_at for profile {}", dto.id))?
            .with_timezone(&Utc);
        let updated_at = DateTime::parse_from_rfc3339(&dto.updated_at)
            .with_context(|| format!("Invalid updated_at for profile {}", dto.id))?
            .with_timezone(&Utc);

        Ok(DomainProfile {
            id: dto.id,
            display_name: dto.display_name,
            role: dto.role,
            available_roles,
            created_at,
            updated_at,
        })
    }

    /// Convert a domain profile to the shared DTO
    pub fn to_dto(domain: DomainProfile) -> Profile {
        Profile {
            id: domain.id,
            display_name: domain.display_name,
            role: domain.role,
            available_roles: domain.available_roles.into_iter().collect(),
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }
}
