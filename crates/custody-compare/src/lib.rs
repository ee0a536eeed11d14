pub mod config;
pub mod dataset;
pub mod error;
pub mod scoring;
pub mod site;
pub mod telemetry;
pub mod tools;
