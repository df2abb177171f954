//! Flip assembly.
//!
//! Pipelines aggregation → market estimation → fee/profit → sum-of-parts
//! valuation, one group at a time, and records why every group that did
//! not produce a flip was skipped.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use super::estimator::MarketPriceEstimator;
use super::fees::{round_coins, FeeSchedule, ProfitBreakdown};
use super::grouping::{aggregate, ListingGroup};
use super::valuation::SumOfPartsValuator;
use crate::lore::ModifierExtractor;
use crate::types::{CommodityPriceMap, FlipCandidate, RawListing};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Qualification thresholds.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Net profit must be strictly above this.
    pub profit_threshold: Decimal,
    /// Cheapest listing must be at least this; cheaper groups are not
    /// estimated at all.
    pub min_buy_price: Decimal,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            profit_threshold: dec!(50_000),
            min_buy_price: dec!(100_000),
        }
    }
}

impl EngineConfig {
    pub fn accepts(&self, profit: Decimal, buy_price: Decimal) -> bool {
        profit > self.profit_threshold && buy_price >= self.min_buy_price
    }
}

// ---------------------------------------------------------------------------
// Skip accounting
// ---------------------------------------------------------------------------

/// Why an eligible group produced no flip.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Cheapest listing under `min_buy_price`.
    BelowMinPrice { buy_price: Decimal },
    /// The estimator declined.
    NoMarketEstimate,
    /// Comparable not strictly above the buy price.
    MarketNotAboveBuy {
        buy_price: Decimal,
        market_price: Decimal,
    },
    /// Profit at or below `profit_threshold`.
    BelowProfitThreshold { breakdown: ProfitBreakdown },
}

/// Per-scan counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub active_listings: usize,
    pub groups: usize,
    pub flips: usize,
    pub below_min_price: usize,
    pub no_market_estimate: usize,
    pub market_not_above_buy: usize,
    pub below_profit_threshold: usize,
}

impl ScanSummary {
    fn record(&mut self, reason: &SkipReason) {
        match reason {
            SkipReason::BelowMinPrice { .. } => self.below_min_price += 1,
            SkipReason::NoMarketEstimate => self.no_market_estimate += 1,
            SkipReason::MarketNotAboveBuy { .. } => self.market_not_above_buy += 1,
            SkipReason::BelowProfitThreshold { .. } => self.below_profit_threshold += 1,
        }
    }

    pub fn skipped(&self) -> usize {
        self.below_min_price
            + self.no_market_estimate
            + self.market_not_above_buy
            + self.below_profit_threshold
    }
}

/// Output of one engine pass.
#[derive(Debug, Clone, Default)]
pub struct FlipScan {
    pub flips: Vec<FlipCandidate>,
    pub summary: ScanSummary,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The flip detection engine. Pure and synchronous; holds only
/// configuration and reference tables.
#[derive(Debug, Clone, Default)]
pub struct FlipEngine {
    config: EngineConfig,
    extractor: ModifierExtractor,
    estimator: MarketPriceEstimator,
    fees: FeeSchedule,
}

impl FlipEngine {
    pub fn new(
        config: EngineConfig,
        extractor: ModifierExtractor,
        estimator: MarketPriceEstimator,
        fees: FeeSchedule,
    ) -> Self {
        Self {
            config,
            extractor,
            estimator,
            fees,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Find every qualifying flip in one pair of snapshots.
    pub fn find_flips(&self, listings: &[RawListing], commodities: &CommodityPriceMap) -> FlipScan {
        let snapshot = aggregate(listings, &self.extractor);
        let valuator = SumOfPartsValuator::new(&self.extractor, commodities, &snapshot.baselines);

        let mut summary = ScanSummary {
            active_listings: snapshot.active_listings,
            groups: snapshot.groups.len(),
            ..ScanSummary::default()
        };
        let mut flips = Vec::new();

        for group in &snapshot.groups {
            match self.evaluate_group(group, &valuator) {
                Ok(flip) => {
                    debug!(
                        key = %group.key,
                        id = %flip.id,
                        buy = %flip.buy_price,
                        market = %flip.market_price,
                        profit = flip.profit,
                        "Flip found"
                    );
                    flips.push(flip);
                }
                Err(reason) => {
                    debug!(key = %group.key, reason = ?reason, "Group skipped");
                    summary.record(&reason);
                }
            }
        }

        summary.flips = flips.len();
        FlipScan { flips, summary }
    }

    /// Turn one group into a flip, or say why it is not one.
    pub fn evaluate_group(
        &self,
        group: &ListingGroup<'_>,
        valuator: &SumOfPartsValuator<'_>,
    ) -> Result<FlipCandidate, SkipReason> {
        let Some(cheapest) = group.cheapest() else {
            return Err(SkipReason::NoMarketEstimate);
        };
        let buy_price = cheapest.price;

        if buy_price < self.config.min_buy_price {
            return Err(SkipReason::BelowMinPrice { buy_price });
        }

        let market = self
            .estimator
            .estimate(group.candidates())
            .ok_or(SkipReason::NoMarketEstimate)?;
        let market_price = market.price;

        if market_price <= buy_price {
            return Err(SkipReason::MarketNotAboveBuy {
                buy_price,
                market_price,
            });
        }

        let breakdown = self.fees.breakdown(buy_price, market_price);
        if !self.config.accepts(breakdown.profit, buy_price) {
            return Err(SkipReason::BelowProfitThreshold { breakdown });
        }

        let canonical_name = group.key.canonical_name();
        let appraisal = valuator.appraise(cheapest, canonical_name);

        Ok(FlipCandidate {
            id: cheapest.id.clone(),
            name: canonical_name.to_string(),
            rarity: cheapest.rarity,
            description: cheapest.description.clone(),
            buy_price,
            market_price,
            profit: round_coins(breakdown.profit),
            estimated_worth: appraisal.as_ref().map(|a| round_coins(a.estimated_worth)),
            worth_profit: appraisal.as_ref().map(|a| round_coins(a.worth_profit)),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
