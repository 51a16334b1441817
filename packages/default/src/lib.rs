pub mod api;
pub mod dashboard;
pub mod log;
pub mod models;
pub mod render;
pub mod synchronizer;
