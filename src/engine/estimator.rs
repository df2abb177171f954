//! Market price estimation.
//!
//! Picks one listing from a group's comparables to serve as the resale
//! target. The naive "second-lowest price" is trivially gamed by a seller
//! re-listing just above their own item, so large groups go through an
//! outlier trim followed by a windowed scan that prefers clusters which
//! are both tight in price and spread across many sellers.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;
use tracing::debug;

use crate::types::RawListing;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Estimator tuning. Defaults are the production values.
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// Below this many candidates the small-sample rule applies.
    pub large_sample_min: usize,
    /// Small sample: max relative gap between the two cheapest candidates.
    pub max_small_sample_spread: f64,
    /// Large sample: candidates above this multiple of the cheapest are junk.
    pub outlier_multiple: Decimal,
    /// Upper fence = Q3 + `iqr_fence` × IQR.
    pub iqr_fence: Decimal,
    /// Window size as a fraction of the filtered candidate count.
    pub window_fraction: f64,
    pub min_window: usize,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            large_sample_min: 5,
            max_small_sample_spread: 0.20,
            outlier_multiple: dec!(10),
            iqr_fence: dec!(1.5),
            window_fraction: 0.2,
            min_window: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Estimator
// ---------------------------------------------------------------------------

/// Robust market comparable selection.
#[derive(Debug, Clone, Default)]
pub struct MarketPriceEstimator {
    config: EstimatorConfig,
}

impl MarketPriceEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Choose the market comparable among `candidates`.
    ///
    /// `candidates` are the group's listings sorted by ascending price with
    /// the cheapest (the buy candidate) already removed. Returns `None` when
    /// there is not enough signal to name a market price.
    pub fn estimate<'a>(&self, candidates: &[&'a RawListing]) -> Option<&'a RawListing> {
        if candidates.len() < 2 {
            return None;
        }

        if candidates.len() < self.config.large_sample_min {
            self.small_sample(candidates)
        } else {
            Some(self.large_sample(candidates))
        }
    }

    /// Fewer than `large_sample_min` candidates: take the cheapest unless
    /// the next one is too far above it.
    fn small_sample<'a>(&self, candidates: &[&'a RawListing]) -> Option<&'a RawListing> {
        let first = candidates[0];
        let second = candidates[1];

        match relative_spread(first.price, second.price) {
            Some(spread) if spread <= self.config.max_small_sample_spread => Some(first),
            spread => {
                debug!(
                    first = %first.price,
                    second = %second.price,
                    spread = ?spread,
                    "Small sample too volatile"
                );
                None
            }
        }
    }

    fn large_sample<'a>(&self, candidates: &[&'a RawListing]) -> &'a RawListing {
        let first = candidates[0];

        // (a) extreme outliers
        let ceiling = first.price * self.config.outlier_multiple;
        let reasonable: Vec<&'a RawListing> = candidates
            .iter()
            .copied()
            .filter(|l| l.price <= ceiling)
            .collect();
        if reasonable.len() < 2 {
            return first;
        }

        // (b) interquartile fence
        let n = reasonable.len();
        let q1 = reasonable[n / 4].price;
        let q3 = reasonable[n * 3 / 4].price;
        let fence = q3 + self.config.iqr_fence * (q3 - q1);
        let filtered: Vec<&'a RawListing> = reasonable
            .iter()
            .copied()
            .filter(|l| l.price <= fence)
            .collect();
        if filtered.len() < 2 {
            return reasonable[0];
        }

        // (c) tightest, most seller-diverse window
        let n = filtered.len();
        let window = self.window_size(n);
        if n < window {
            return filtered[0];
        }

        let mut best_start = 0usize;
        let mut best_score = f64::INFINITY;
        for (start, slice) in filtered.windows(window).enumerate() {
            if let Some(score) = window_score(slice) {
                if score < best_score {
                    best_score = score;
                    best_start = start;
                }
            }
        }

        debug!(
            candidates = candidates.len(),
            filtered = n,
            window,
            best_start,
            best_score,
            price = %filtered[best_start].price,
            "Market cluster selected"
        );

        filtered[best_start]
    }

    /// Never zero, whatever the configuration says.
    fn window_size(&self, n: usize) -> usize {
        let scaled = (n as f64 * self.config.window_fraction).floor() as usize;
        scaled.max(self.config.min_window).max(1)
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// `(last - first) / first`, or `None` when `first` is not positive.
fn relative_spread(first: Decimal, last: Decimal) -> Option<f64> {
    if first <= Decimal::ZERO {
        return None;
    }
    ((last - first) / first).to_f64()
}

/// Combined score of one price-sorted window; lower is more trustworthy.
///
/// Relative price spread plus `(1 - distinct_sellers / size)²`, which
/// penalises a price wall built by a single seller re-listing.
pub fn window_score(window: &[&RawListing]) -> Option<f64> {
    let (first, last) = (window.first()?, window.last()?);
    let spread = relative_spread(first.price, last.price)?;

    let sellers: HashSet<Option<&str>> = window.iter().map(|l| l.seller.as_deref()).collect();
    let diversity = sellers.len() as f64 / window.len() as f64;

    Some(spread + (1.0 - diversity).powi(2))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
