//! HTTP API: router, handlers and boundary schemas

pub mod handlers;
pub mod server;
pub mod types;

pub use server::{create_router, start_server};
