//! Flip detection engine.
//!
//! `grouping` → `estimator` → `fees` → `valuation` are pure stages wired
//! together by `assembler`; `cycle` feeds the assembler from a
//! `SnapshotSource` once per refresh.

pub mod grouping;
pub mod estimator;
pub mod fees;
pub mod valuation;
pub mod assembler;
pub mod cycle;

pub use assembler::{EngineConfig, FlipEngine, FlipScan, ScanSummary, SkipReason};
pub use cycle::{CycleReport, FlipScanner};
