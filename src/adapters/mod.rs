// Adapters layer: concrete store implementations.

pub mod memory_store;
