//! FLIPPER — Auction house flip detection engine
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod lore;
pub mod engine;
pub mod source;
