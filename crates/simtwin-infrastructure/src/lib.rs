//! Durable local storage for SimTwin: platform paths, the persisted
//! session state file, and client configuration.

pub mod config_service;
pub mod paths;
pub mod state_repository;

pub use config_service::{ClientConfig, ConfigService};
pub use paths::SimtwinPaths;
pub use state_repository::TomlStateRepository;
