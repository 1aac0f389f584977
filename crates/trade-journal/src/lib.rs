pub mod config;
pub mod error;
pub mod playbook;
pub mod telemetry;
