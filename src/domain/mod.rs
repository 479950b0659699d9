// Domain layer: the parsing engine, its models and the ports the batch layer plugs into.
// Nothing here touches the file system.

pub mod model;
pub mod ports;

pub mod services;
