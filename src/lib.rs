pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod types;
pub mod ui;

pub use error::{Error, Result};
