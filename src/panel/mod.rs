pub mod registry;
pub mod server_status;
pub mod summary;
