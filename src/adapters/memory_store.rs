use crate::core::catalog::default_destinations;
use crate::domain::model::Destination;
use crate::domain::ports::DestinationStore;
use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct InMemoryStore {
    destinations: Vec<Destination>,
}

impl InMemoryStore {
    pub fn new(destinations: Vec<Destination>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(destinations.len());
        for destination in &destinations {
            if !seen.insert(destination.id) {
                return Err(ApiError::DuplicateId { id: destination.id });
            }
        }

        Ok(Self { destinations })
    }

    pub fn with_default_catalog() -> Self {
        Self {
            destinations: default_destinations(),
        }
    }

    /// 從 JSON 陣列檔案載入目的地
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let destinations: Vec<Destination> = serde_json::from_str(&content)?;

        tracing::debug!(
            "Loaded {} destinations from {}",
            destinations.len(),
            path.as_ref().display()
        );

        Self::new(destinations)
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

#[async_trait]
impl DestinationStore for InMemoryStore {
    async fn list(&self) -> Result<Vec<Destination>> {
        Ok(self.destinations.clone())
    }

    async fn get(&self, id: u32) -> Result<Option<Destination>> {
        Ok(self.destinations.iter().find(|d| d.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_catalog() {
        let store = InMemoryStore::with_default_catalog();
        let all = tokio_test::block_on(store.list()).unwrap();

        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name, "Paris");
    }

    #[test]
    fn test_get_by_id() {
        let store = InMemoryStore::with_default_catalog();

        let kyoto = tokio_test::block_on(store.get(2)).unwrap();
        assert_eq!(kyoto.map(|d| d.name), Some("Kyoto".to_string()));

        let missing = tokio_test::block_on(store.get(99)).unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = InMemoryStore::new(vec![Destination::new(1, "A"), Destination::new(1, "B")]);
        assert!(matches!(result, Err(ApiError::DuplicateId { id: 1 })));
    }

    #[test]
    fn test_from_json_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(br#"[{"id": 10, "name": "Oslo", "season": "summer"}, {"id": 11, "name": "Rome"}]"#)
            .unwrap();

        let store = InMemoryStore::from_json_file(temp_file.path()).unwrap();
        assert_eq!(store.len(), 2);

        let oslo = tokio_test::block_on(store.get(10)).unwrap().unwrap();
        assert_eq!(oslo.extra.get("season"), Some(&serde_json::json!("summer")));
    }

    #[test]
    fn test_from_json_file_rejects_non_array() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(br#"{"id": 1, "name": "Oslo"}"#).unwrap();

        let result = InMemoryStore::from_json_file(temp_file.path());
        assert!(matches!(result, Err(ApiError::SerializationError(_))));
    }

    #[test]
    fn test_from_missing_file() {
        let result = InMemoryStore::from_json_file("/definitely/not/here.json");
        assert!(matches!(result, Err(ApiError::IoError(_))));
    }
}
