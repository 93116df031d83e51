pub mod connection;
pub mod profile_repository;

pub use connection::YamlConnection;
pub use profile_repository::YamlProfileRepository;
