use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Json;

use crate::domain::model::Destination;
use crate::server::AppState;
use crate::utils::error::{ApiError, Result};

pub async fn list_destinations(State(state): State<AppState>) -> Result<Json<Vec<Destination>>> {
    let destinations = state.store.list().await?;
    tracing::debug!("Serving {} destinations", destinations.len());
    Ok(Json(destinations))
}

pub async fn get_destination(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Destination>> {
    let not_found = || ApiError::NotFound {
        resource: "Destination".to_string(),
        id: raw_id.clone(),
    };

    // 超出 u32 範圍的數字 id 一定不存在
    let Some(id) = parse_destination_id(&raw_id)? else {
        return Err(not_found());
    };

    state.store.get(id).await?.map(Json).ok_or_else(not_found)
}

/// Digits only; `Ok(None)` when the number does not fit in a `u32`.
fn parse_destination_id(raw: &str) -> Result<Option<u32>> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::BadRequest {
            message: format!("destination id must be a non-negative integer, got '{}'", raw),
        });
    }

    Ok(raw.parse::<u32>().ok())
}

pub async fn health_check(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let count = state.store.list().await?.len();

    Ok(Json(serde_json::json!({
        "service": "destinations-api",
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "started_at": state.started_at.to_rfc3339(),
        "destinations": count
    })))
}

pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "Not found",
            "path": uri.path()
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_destination_id() {
        assert_eq!(parse_destination_id("0").unwrap(), Some(0));
        assert_eq!(parse_destination_id("0042").unwrap(), Some(42));
        assert_eq!(parse_destination_id("4294967295").unwrap(), Some(u32::MAX));
        assert_eq!(parse_destination_id("4294967296").unwrap(), None);

        for raw in ["abc", "-1", "+1", "1.5", " 1"] {
            assert!(matches!(
                parse_destination_id(raw),
                Err(ApiError::BadRequest { .. })
            ));
        }
    }
}
