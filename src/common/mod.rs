pub mod config;
pub mod liveness;
pub mod query;
pub mod server;
