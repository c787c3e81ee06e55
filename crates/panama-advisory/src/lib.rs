//! Core library for the Panama residency and investment advisory platform.
//!
//! The `advisory` module hosts the client-facing decision tools (eligibility
//! screening, investment projections, property comparison), `properties`
//! covers access to the external listing engine, and `intake` handles
//! consultation requests. HTTP routers for each area are exported so the
//! service binary only composes them.

pub mod advisory;
pub mod config;
pub mod error;
pub mod intake;
pub mod properties;
pub mod telemetry;
