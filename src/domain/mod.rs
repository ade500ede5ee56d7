// Domain layer: wire models and ports. No transport or parsing dependencies.

pub mod model;
pub mod ports;
