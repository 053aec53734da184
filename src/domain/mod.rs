// Domain layer: value types, the allocation engine and the ports it is driven through.

pub mod model;
pub mod outcome;
pub mod ports;
pub mod services;
