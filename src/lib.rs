pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod geometry;
pub mod optimizer;
pub mod scorer;
pub mod zones;
// cmd and reports are modules of the binary crate (main.rs).
