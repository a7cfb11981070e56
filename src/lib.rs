pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod models;
pub mod server;
pub mod utils;
