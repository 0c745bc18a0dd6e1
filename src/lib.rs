pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::ServerConfig;
pub use config::E2eConfig;

pub use adapters::memory_store::InMemoryStore;
pub use crate::core::contract::{ContractChecker, ContractExpectation, ContractReport};
pub use domain::{model::Destination, ports::DestinationStore};
pub use server::ServerHandle;
pub use utils::error::{ApiError, Result};
