//! Leadership index scoring: turns survey submissions into per-competency score reports.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
