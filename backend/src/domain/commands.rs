//! Domain-level command and query types.
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the public DTOs defined in
//! the `shared` crate to these internal types.

pub mod challenge {
    use chrono::NaiveDateTime;

    /// Query for the challenge status at a reference instant.
    #[derive(Debug, Clone, Default)]
    pub struct ChallengeStatusQuery {
        /// Local wall-clock time to resolve against; `None` means now.
        pub at: Option<NaiveDateTime>,
    }
}

pub mod profile {
    use crate::domain::models::profile::DomainProfile;
    use shared::Role;

    /// Input for creating a new profile.
    #[derive(Debug, Clone)]
    pub struct CreateProfileCommand {
        pub display_name: String,
        pub available_roles: Vec<Role>,
    }

    /// Input for switching the active role of a profile.
    #[derive(Debug, Clone)]
    pub struct SwitchRoleCommand {
        pub profile_id: String,
        pub role: Role,
    }

    /// Result of creating a profile.
    #[derive(Debug, Clone)]
    pub struct CreateProfileResult {
        pub profile: DomainProfile,
        pub success_message: String,
    }

    /// Result of switching a role.
    #[derive(Debug, Clone)]
    pub struct SwitchRoleResult {
        pub profile: DomainProfile,
        pub previous_role: Role,
        pub success_message: String,
    }
}
