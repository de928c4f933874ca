//! I/O orchestration for tubelens.
//!
//! Runs the external extractor, writes a channel analysis to disk, reads
//! analytics exports for an audit, and opens result folders. All analysis
//! logic lives in `tubelens-core`.

pub mod audit_run;
pub mod channel_run;
pub mod config;
pub mod error;
pub mod events;
pub mod extractor;
pub mod opener;
