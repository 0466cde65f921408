pub mod config;
pub mod handlers;
pub mod helpers;

pub use crate::config::ApiConfig;
