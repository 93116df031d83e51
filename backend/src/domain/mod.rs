//! # Domain Module
//!
//! Business logic for the learning platform backend, independent of the REST
//! layer and of any storage backend.
//!
//! ## Module Organization
//!
//! - **challenge_calendar**: The annual theme table and window generation
//! - **challenge_service**: Active/countdown resolution for an instant
//! - **challenge_format**: Countdown and date-range display strings
//! - **profile_service**: Profile creation and role switching
//! - **commands**: Internal command/query/result types
//! - **models**: Domain entities and their validation errors
//!
//! ## Business Rules
//!
//! - Challenges open at local midnight on day 1 of each configured month
//! - A window includes its start instant and excludes its end instant
//! - Every window lasts the configured number of days, even if it overlaps the next
//! - Where windows overlap, the earlier-starting one is the current challenge
//! - Status is recomputed from scratch for every instant asked about
//! - A profile may only act as one of its available roles

pub mod challenge_calendar;
pub mod challenge_format;
pub mod challenge_service;
pub mod commands;
pub mod models;
pub mod profile_service;

pub use challenge_calendar::*;
pub use challenge_format::*;
pub use challenge_service::*;
pub use profile_service::*;
