use crate::utils::error::{ApiError, Result};
use crate::utils::validation::validate_url;
use reqwest::Client;
use std::time::{Duration, Instant};
use url::Url;

/// What an endpoint must answer: a status code and, optionally, the length of
/// the JSON array in the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractExpectation {
    pub path: String,
    pub status: u16,
    pub length: Option<usize>,
}

impl ContractExpectation {
    pub fn new(path: impl Into<String>, status: u16) -> Self {
        Self {
            path: path.into(),
            status,
            length: None,
        }
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// `GET /api/destinations` answers 200 with three records.
    pub fn destinations() -> Self {
        Self::new("/api/destinations", 200).with_length(3)
    }
}

#[derive(Debug, Clone)]
pub struct ContractReport {
    pub url: String,
    pub status: u16,
    pub length: Option<usize>,
    pub elapsed: Duration,
}

pub struct ContractChecker {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl ContractChecker {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = validate_url("base_url", base_url)?;

        Ok(Self {
            client: Client::new(),
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves `path` under the base URL, keeping any path prefix the base
    /// URL carries (`http://h/app` + `/x` -> `http://h/app/x`).
    pub fn endpoint_url(&self, path: &str) -> Url {
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };

        let mut url = self.base_url.clone();
        let prefix = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{}/{}", prefix, path.trim_start_matches('/')));
        if query.is_some() {
            url.set_query(query);
        }
        url
    }

    pub async fn check(&self, expectation: &ContractExpectation) -> Result<ContractReport> {
        let url = self.endpoint_url(&expectation.path);

        tracing::debug!("Checking contract: GET {}", url);
        let started = Instant::now();
        let response = self
            .client
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status().as_u16();
        tracing::debug!("📡 {} answered {}", url, status);

        if status != expectation.status {
            return Err(ApiError::ContractViolation {
                url: url.to_string(),
                check: "status".to_string(),
                expected: expectation.status.to_string(),
                actual: status.to_string(),
            });
        }

        let length = match expectation.length {
            Some(expected_length) => {
                let body: serde_json::Value = response.json().await.map_err(|e| {
                    ApiError::ContractViolation {
                        url: url.to_string(),
                        check: "body".to_string(),
                        expected: "a JSON array".to_string(),
                        actual: format!("unparseable body ({})", e),
                    }
                })?;

                let items = body.as_array().ok_or_else(|| ApiError::ContractViolation {
                    url: url.to_string(),
                    check: "body".to_string(),
                    expected: "a JSON array".to_string(),
                    actual: json_kind(&body).to_string(),
                })?;

                if items.len() != expected_length {
                    return Err(ApiError::ContractViolation {
                        url: url.to_string(),
                        check: "length".to_string(),
                        expected: expected_length.to_string(),
                        actual: items.len().to_string(),
                    });
                }
                Some(items.len())
            }
            None => None,
        };

        Ok(ContractReport {
            url: url.to_string(),
            status,
            length,
            elapsed: started.elapsed(),
        })
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
