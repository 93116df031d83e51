pub mod challenge;
pub mod profile;
