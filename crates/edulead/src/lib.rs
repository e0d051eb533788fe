pub mod config;
pub mod error;
pub mod insights;
pub mod leads;
pub mod telemetry;
