extern crate chrono;

pub mod analysis;
pub mod config;
pub mod error;
pub mod loaders;
pub mod logger;
pub mod models;
pub mod report;

pub use error::{EdaError, Result};
