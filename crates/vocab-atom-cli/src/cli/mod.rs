pub mod config;
pub mod input;
pub mod output;
pub mod seed;
pub mod telemetry;
