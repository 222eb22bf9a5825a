// Domain layer: response models and the provider port. No HTTP or config concerns here.

pub mod model;
pub mod ports;
