pub mod analysis;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod market;
pub mod output;
pub mod services;
pub mod utils;

pub use error::{AppError, Result};
