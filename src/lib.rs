pub mod config;
pub mod data;
pub mod debug;
pub mod utils;
pub mod view;
