//! HTTP wrapper around the tubelens channel analyzer.
//!
//! Runs an analysis per request and streams its progress back as
//! server-sent events.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
