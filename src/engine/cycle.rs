//! Refresh cycle runner.
//!
//! One cycle = fetch both snapshots concurrently, run the engine, report.
//! Nothing carries over between cycles: every report is computed from
//! scratch.

use chrono::{DateTime, Utc};
use tracing::info;

use super::assembler::{FlipEngine, ScanSummary};
use crate::source::SnapshotSource;
use crate::types::{FlipCandidate, SnapshotError};

/// Outcome of one refresh cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub cycle_number: u64,
    pub timestamp: DateTime<Utc>,
    pub listings_fetched: usize,
    pub commodities_priced: usize,
    pub summary: ScanSummary,
    pub flips: Vec<FlipCandidate>,
}

impl CycleReport {
    /// Flips ordered by descending profit, at most `limit`.
    pub fn top_flips(&self, limit: usize) -> Vec<&FlipCandidate> {
        let mut ranked: Vec<&FlipCandidate> = self.flips.iter().collect();
        ranked.sort_by(|a, b| b.profit.cmp(&a.profit));
        ranked.truncate(limit);
        ranked
    }
}

/// Drives the engine from a snapshot source.
pub struct FlipScanner {
    source: Box<dyn SnapshotSource>,
    engine: FlipEngine,
    cycle_count: u64,
}

impl FlipScanner {
    pub fn new(source: Box<dyn SnapshotSource>, engine: FlipEngine) -> Self {
        Self {
            source,
            engine,
            cycle_count: 0,
        }
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Run one refresh cycle.
    ///
    /// A failed fetch of either snapshot fails the cycle; the caller keeps
    /// whatever it showed last.
    pub async fn run_cycle(&mut self) -> Result<CycleReport, SnapshotError> {
        self.cycle_count += 1;
        info!(
            cycle = self.cycle_count,
            source = self.source.name(),
            "Starting cycle"
        );

        let (listings, commodities) = tokio::join!(
            self.source.fetch_listings(),
            self.source.fetch_commodity_prices()
        );
        let listings = listings?;
        let commodities = commodities?;

        let scan = self.engine.find_flips(&listings, &commodities);

        Ok(CycleReport {
            cycle_number: self.cycle_count,
            timestamp: Utc::now(),
            listings_fetched: listings.len(),
            commodities_priced: commodities.len(),
            summary: scan.summary,
            flips: scan.flips,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
