pub mod analysis;
pub mod api;
pub mod app_state;
pub mod config;
pub mod fetcher;
pub mod health;
pub mod sanitizer;
pub mod telemetry;
pub mod text;
