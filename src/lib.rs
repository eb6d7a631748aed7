pub mod config;
pub mod error;
pub mod optimizer;
pub mod reports;
pub mod scorer;
// cmd is a binary module (main.rs); everything it drives lives here so the
// integration tests can reach it.
