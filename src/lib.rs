//! Bench Report Diff
//!
//! Column-by-column comparison of benchmark CSV reports from two runs,
//! with optional per-method threshold checks.
//!
//! This crate provides the core implementation for the
//! `bench-diff` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! bench-diff compare --base baseline/ --new latest/ --threshold thresholds/
//! ```
//!
//! Library users pair reports with [`report::create_file_pairs`] and run a
//! [`diff::DiffEngine`] with either [`diff::PlainDiff`] or
//! [`diff::ThresholdDiff`].

pub mod commands;
pub mod diff;
pub mod output;
pub mod report;
pub mod units;
pub mod utils;
