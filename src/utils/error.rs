use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Failed to bind {addr}: {source}")]
    BindError {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {message}")]
    ServerError { message: String },

    #[error("{resource} '{id}' not found")]
    NotFound { resource: String, id: String },

    #[error("Duplicate destination id: {id}")]
    DuplicateId { id: u32 },

    #[error("Contract violation at {url}: {check} expected {expected}, got {actual}")]
    ContractViolation {
        url: String,
        check: String,
        expected: String,
        actual: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Data,
    Server,
    Contract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ApiError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::TomlError(_) | ApiError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            ApiError::HttpError(_) | ApiError::BindError { .. } => ErrorCategory::Network,
            ApiError::IoError(_)
            | ApiError::SerializationError(_)
            | ApiError::NotFound { .. }
            | ApiError::BadRequest { .. }
            | ApiError::DuplicateId { .. } => ErrorCategory::Data,
            ApiError::ServerError { .. } => ErrorCategory::Server,
            ApiError::ContractViolation { .. } => ErrorCategory::Contract,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ApiError::NotFound { .. } | ApiError::BadRequest { .. } => ErrorSeverity::Low,
            // 網路錯誤通常重試即可
            ApiError::HttpError(_) => ErrorSeverity::Medium,
            ApiError::BindError { .. } | ApiError::ServerError { .. } => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ApiError::IoError(_) => "Check that the file exists and is readable",
            ApiError::HttpError(_) => "Make sure the server is running and the base URL is reachable",
            ApiError::SerializationError(_) => "Check that the JSON document is a well-formed array of destinations",
            ApiError::TomlError(_) => "Check the TOML syntax of the configuration file",
            ApiError::InvalidConfigValueError { .. } => "Fix the configuration value and try again",
            ApiError::BadRequest { .. } => "Destination ids are non-negative integers",
            ApiError::BindError { .. } => "Is another process using this port? Pick another one with --port",
            ApiError::ServerError { .. } => "Inspect the server logs (RUST_LOG=debug) for details",
            ApiError::NotFound { .. } => "List /api/destinations to see the available ids",
            ApiError::DuplicateId { .. } => "Give every destination in the seed file a unique id",
            ApiError::ContractViolation { .. } => "Compare the endpoint response with the expected contract",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ApiError::BindError { addr, .. } => format!("Could not listen on {}", addr),
            ApiError::HttpError(e) if e.is_timeout() => "The request timed out".to_string(),
            ApiError::HttpError(e) if e.is_connect() => "Could not connect to the server".to_string(),
            ApiError::ContractViolation {
                check,
                expected,
                actual,
                ..
            } => format!("API contract failed: {} should be {} but was {}", check, expected, actual),
            other => other.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidConfigValueError { .. } | ApiError::BadRequest { .. } => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {} (category: {:?})", self, self.category());
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
