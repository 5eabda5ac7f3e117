pub mod context;
pub mod loader;
pub mod monitor;
pub mod rest_server;
