#![allow(clippy::async_fn_in_trait)]
pub mod common;
pub mod panel;
pub mod probe;
pub mod rest;
pub mod server;
pub mod storage;
pub mod traits;

pub use server::monitor::monitor_start;
