// Domain layer: party/session models and the ports the assembler depends on.

pub mod model;
pub mod ports;
