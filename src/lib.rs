pub mod api;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod server;
pub mod workers;
