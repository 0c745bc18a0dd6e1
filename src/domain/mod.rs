// Domain layer: destination model and the store port.

pub mod model;
pub mod ports;
