//! Infrastructure layer - storage strategies and process plumbing

pub mod logging;
pub mod persistence;
pub mod user;
