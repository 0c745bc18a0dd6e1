#[cfg(feature = "cli")]
pub mod cli;
pub mod e2e_config;

#[cfg(feature = "cli")]
pub use cli::ServerConfig;
pub use e2e_config::{E2eConfig, SpecPattern, SupportFile};
