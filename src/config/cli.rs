use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "destinations-api")]
#[command(about = "HTTP service exposing the destinations catalog")]
pub struct ServerConfig {
    #[arg(long, default_value = "127.0.0.1", env = "DESTINATIONS_HOST")]
    pub host: String,

    /// Port to listen on; 0 picks a free one
    #[arg(short, long, default_value = "3001", env = "DESTINATIONS_PORT")]
    pub port: u16,

    /// JSON file with an array of destinations replacing the built-in catalog
    #[arg(long)]
    pub seed_file: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            seed_file: None,
            verbose: false,
            json_logs: false,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("host", &self.host)?;

        if let Some(seed_file) = &self.seed_file {
            validate_path("seed_file", seed_file)?;
            validate_file_extension("seed_file", seed_file, &["json"])?;
        }
        Ok(())
    }
}
