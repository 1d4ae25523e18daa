//! Aircraft ranking engine.
//!
//! Filters a catalog against hard buyer constraints, scores the survivors on
//! absolute per-dollar value and on buyer-weighted priorities normalized over
//! the candidate set, and ranks listings of the same type against each other
//! on condition, completeness and buyer fit.

pub mod catalog;
pub mod cohort;
pub mod config;
pub mod deals;
pub mod monitoring;
pub mod scoring;
