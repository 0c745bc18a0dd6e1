use anyhow::Result;
use destinations_api::{
    ApiError, ContractChecker, ContractExpectation, E2eConfig, InMemoryStore, ServerHandle,
};
use httpmock::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn checker_for(base_url: &str) -> ContractChecker {
    ContractChecker::new(base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_contract_passes_on_three_destinations() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/destinations");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"id": 1, "name": "Paris"},
                {"id": 2, "name": "Kyoto"},
                {"id": 3, "name": "Marrakech"}
            ]));
    });

    let report = checker_for(&server.base_url())
        .check(&ContractExpectation::destinations())
        .await?;

    api_mock.assert();
    assert_eq!(report.status, 200);
    assert_eq!(report.length, Some(3));
    assert!(report.url.ends_with("/api/destinations"));
    Ok(())
}

#[tokio::test]
async fn test_contract_keeps_base_url_path_prefix() -> Result<()> {
    let server = MockServer::start();
    let prefixed_mock = server.mock(|when, then| {
        when.method(GET).path("/app/api/destinations");
        then.status(200)
            .json_body(serde_json::json!([{"id": 1}, {"id": 2}, {"id": 3}]));
    });

    for base_url in [server.url("/app"), server.url("/app/")] {
        let report = checker_for(&base_url)
            .check(&ContractExpectation::destinations())
            .await?;
        assert_eq!(report.url, server.url("/app/api/destinations"));
        assert_eq!(report.length, Some(3));
    }

    prefixed_mock.assert_hits(2);
    Ok(())
}

#[tokio::test]
async fn test_contract_reports_wrong_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/destinations");
        then.status(500).body("boom");
    });

    let result = checker_for(&server.base_url())
        .check(&ContractExpectation::destinations())
        .await;

    match result {
        Err(ApiError::ContractViolation {
            check,
            expected,
            actual,
            ..
        }) => {
            assert_eq!(check, "status");
            assert_eq!(expected, "200");
            assert_eq!(actual, "500");
        }
        other => panic!("expected a status violation, got {:?}", other),
    }
}

#[tokio::test]
async fn test_contract_reports_wrong_length() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/destinations");
        then.status(200)
            .json_body(serde_json::json!([{"id": 1}, {"id": 2}]));
    });

    let result = checker_for(&server.base_url())
        .check(&ContractExpectation::destinations())
        .await;

    match result {
        Err(ApiError::ContractViolation { check, actual, .. }) => {
            assert_eq!(check, "length");
            assert_eq!(actual, "2");
        }
        other => panic!("expected a length violation, got {:?}", other),
    }
}

#[tokio::test]
async fn test_contract_rejects_non_array_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/destinations");
        then.status(200)
            .json_body(serde_json::json!({"items": [1, 2, 3]}));
    });

    let result = checker_for(&server.base_url())
        .check(&ContractExpectation::destinations())
        .await;

    match result {
        Err(ApiError::ContractViolation { check, actual, .. }) => {
            assert_eq!(check, "body");
            assert_eq!(actual, "an object");
        }
        other => panic!("expected a body violation, got {:?}", other),
    }
}

#[tokio::test]
async fn test_status_only_expectation() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/health");
        then.status(200).body("ok");
    });

    let report = checker_for(&server.base_url())
        .check(&ContractExpectation::new("/health", 200))
        .await?;

    assert_eq!(report.length, None);
    Ok(())
}

#[tokio::test]
async fn test_unreachable_server_is_http_error() -> Result<()> {
    // 先取得一個空閒埠再關掉伺服器
    let server =
        ServerHandle::start("127.0.0.1:0", Arc::new(InMemoryStore::with_default_catalog())).await?;
    let base_url = server.base_url();
    server.stop().await?;

    let result = checker_for(&base_url)
        .check(&ContractExpectation::destinations())
        .await;

    match result {
        Err(e @ ApiError::HttpError(_)) => assert_eq!(e.exit_code(), 2),
        other => panic!("expected an HTTP error, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_contract_against_running_server_with_e2e_defaults() -> Result<()> {
    let server =
        ServerHandle::start("127.0.0.1:0", Arc::new(InMemoryStore::with_default_catalog())).await?;

    let config = E2eConfig {
        base_url: server.base_url(),
        ..E2eConfig::default()
    };

    let report = checker_for(&config.base_url)
        .check(&ContractExpectation::destinations())
        .await?;
    assert_eq!(report.length, Some(3));

    server.stop().await?;
    Ok(())
}
