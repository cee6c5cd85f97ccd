// Domain layer: listing records, filter vocabulary and the service port.

pub mod model;
pub mod ports;
