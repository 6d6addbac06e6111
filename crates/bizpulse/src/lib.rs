pub mod assessment;
pub mod config;
pub mod error;
pub mod import;
pub mod telemetry;
