pub mod file {
    pub mod file_server_store;
}
pub mod memory {
    pub mod memory_server_store;
}
pub mod server_store_impl;
pub mod transfer;
