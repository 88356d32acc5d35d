//! Command implementations for oratio CLI

pub mod serve;
pub mod status;

// Re-export main dispatcher functions for flat access from main.rs
pub use serve::run_serve;
pub use status::run_status;
