// Domain layer: accounts, flights, call descriptors and the provider port.

pub mod model;
pub mod ports;
