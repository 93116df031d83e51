pub mod challenge_mapper;
pub mod profile_mapper;
