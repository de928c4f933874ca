//! Pure analysis logic for tubelens.
//!
//! Records, formatting, aggregates, rankings, frequency tables, the
//! analytics audit, recommendations, and document rendering. Nothing in
//! this crate performs I/O.

pub mod audit;
pub mod channel;
pub mod csv;
pub mod error;
pub mod event;
pub mod format;
pub mod frequency;
pub mod metrics;
pub mod ranking;
pub mod recommendation;
pub mod report;
pub mod types;
pub mod video;
