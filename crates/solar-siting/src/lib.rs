pub mod config;
pub mod error;
pub mod siting;
pub mod telemetry;
