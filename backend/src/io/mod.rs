//! # IO Module
//!
//! Interface layer between clients and the domain logic. Translates HTTP
//! requests into domain commands and domain results into the DTOs of the
//! `shared` crate.
//!
//! ## Supported Operations
//!
//! - **GET /api/challenges/status**: Active/countdown status with progress
//! - **GET /api/challenges/themes**: The configured theme table
//! - **GET /api/challenges/calendar**: All windows of one year
//! - **/api/profiles**: Profile creation, lookup and role switching
//! - **POST /api/logs**: Frontend log forwarding

pub mod rest;

pub use rest::*;
