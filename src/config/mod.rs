//! Configuration module

pub mod config;

pub use config::{ColumnConfig, Config, FilterConfig, InvalidPatternPolicy};
