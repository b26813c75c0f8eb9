//! Core library for the city-lens impact scoring service.
//!
//! The [`pipeline`] module contains the deterministic rule engine that turns a
//! project description plus optional live signals into a composite impact
//! assessment. The remaining modules carry the service plumbing: environment
//! driven configuration, tracing setup, and the application error type shared
//! with the HTTP layer.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod telemetry;
