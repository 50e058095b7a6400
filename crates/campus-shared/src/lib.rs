//! Types shared between the Campus API server and its clients.

pub mod api;
pub mod models;

pub use models::*;
