pub mod catalog;
pub mod contract;

pub use crate::domain::model::Destination;
pub use crate::domain::ports::DestinationStore;
pub use crate::utils::error::Result;
