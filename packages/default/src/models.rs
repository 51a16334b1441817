pub mod config;
pub mod environments;
