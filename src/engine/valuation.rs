//! Sum-of-parts valuation.
//!
//! Re-derives what a modified item is intrinsically worth: the cheapest
//! clean copy of the same item plus what its modifiers cost on the
//! commodity market.

use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

use crate::lore::{ModifierExtractor, OBFUSCATED_CODE};
use crate::types::{CommodityPriceMap, RawListing};

/// Unrounded sum-of-parts result for one listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Appraisal {
    pub baseline: Decimal,
    /// Commodity cost of everything attached to the item.
    pub modifier_total: Decimal,
    pub estimated_worth: Decimal,
    /// `estimated_worth - buy_price`.
    pub worth_profit: Decimal,
}

/// Prices a listing from its clean baseline and its modifier tokens.
pub struct SumOfPartsValuator<'a> {
    extractor: &'a ModifierExtractor,
    commodities: &'a CommodityPriceMap,
    baselines: &'a HashMap<String, Decimal>,
}

impl<'a> SumOfPartsValuator<'a> {
    pub fn new(
        extractor: &'a ModifierExtractor,
        commodities: &'a CommodityPriceMap,
        baselines: &'a HashMap<String, Decimal>,
    ) -> Self {
        Self {
            extractor,
            commodities,
            baselines,
        }
    }

    /// Commodity price of `id`, zero when the commodity is not traded.
    fn commodity_price(&self, id: &str) -> Decimal {
        self.commodities.get(id).copied().unwrap_or(Decimal::ZERO)
    }

    /// Modifier cost of a raw (still decorated) description.
    pub fn modifier_total(&self, description: &str) -> Decimal {
        let mut total = Decimal::ZERO;

        // Recombobulated items render their rarity line obfuscated.
        if description.contains(OBFUSCATED_CODE) {
            total += self.commodity_price(&self.extractor.vocabulary().recombobulator_id);
        }

        for token in self.extractor.tokens(description) {
            total += self.commodity_price(token.as_str());
        }

        total
    }

    /// Appraise `listing`, whose canonical name is `canonical_name`.
    ///
    /// `None` when no clean copy is listed or the modifiers price to nothing.
    pub fn appraise(&self, listing: &RawListing, canonical_name: &str) -> Option<Appraisal> {
        let Some(baseline) = self.baselines.get(canonical_name).copied() else {
            debug!(name = canonical_name, "No clean baseline");
            return None;
        };

        let modifier_total = self.modifier_total(&listing.description);
        if modifier_total <= Decimal::ZERO {
            return None;
        }

        let estimated_worth = baseline + modifier_total;
        Some(Appraisal {
            baseline,
            modifier_total,
            estimated_worth,
            worth_profit: estimated_worth - listing.price,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
