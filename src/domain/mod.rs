// Domain layer: schema records and ports. No HTTP or cache concerns here.

pub mod model;
pub mod ports;
