// Domain layer: value types, the wire request/response and the ports (interfaces)
// the engine depends on. No I/O lives here.

pub mod model;
pub mod ports;
pub mod request;
