// Adapters layer: concrete implementations of the provider port.

pub mod ergast;

pub use ergast::ErgastProvider;
