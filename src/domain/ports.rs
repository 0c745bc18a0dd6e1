use crate::domain::model::Destination;
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait DestinationStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Destination>>;
    async fn get(&self, id: u32) -> Result<Option<Destination>>;
}
