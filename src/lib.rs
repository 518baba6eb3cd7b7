//! Core library for the `tracestat` CLI.
//!
//! This crate provides the building blocks used by the binary: per-endpoint
//! latency statistics loaded from snapshot files, the comparison between two
//! snapshots, column selection, and the table, delimited, HTML, and text
//! renderers. The primary user-facing interface is the `tracestat`
//! command-line application; library APIs may evolve as the CLI grows.
pub mod args;
pub mod config;
pub mod error;
pub mod report;
pub mod stats;
