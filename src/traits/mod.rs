pub mod panel;
pub mod server_store;
