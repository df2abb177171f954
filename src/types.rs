//! Shared types for the FLIPPER engine.
//!
//! These types form the data model used across all modules. Snapshot
//! types are produced by a `SnapshotSource` once per refresh cycle and
//! are read-only to the engine; `FlipCandidate` is the engine's output.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Snapshot types
// ---------------------------------------------------------------------------

/// One fixed-price sell offer for a single item instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawListing {
    pub id: String,
    /// Display name, may contain `§` decoration codes.
    pub name: String,
    pub rarity: Rarity,
    pub price: Decimal,
    /// Buy-it-now listing (as opposed to a bidding auction).
    pub fixed_price: bool,
    pub claimed: bool,
    /// Multi-line item description, may contain `§` decoration codes.
    pub description: String,
    pub seller: Option<String>,
}

impl RawListing {
    /// Whether the listing can be bought right now at its listed price.
    pub fn is_active(&self) -> bool {
        self.fixed_price && !self.claimed && self.seller.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Helper to build a test listing with sensible defaults.
    #[cfg(test)]
    pub fn sample(id: &str, price: Decimal, seller: &str) -> Self {
        RawListing {
            id: id.to_string(),
            name: "§6Hyperion".to_string(),
            rarity: Rarity::Legendary,
            price,
            fixed_price: true,
            claimed: false,
            description: String::new(),
            seller: Some(seller.to_string()),
        }
    }
}

impl fmt::Display for RawListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}) @ {} by {}",
            self.id,
            crate::lore::strip_decoration(&self.name).trim(),
            self.rarity,
            self.price,
            self.seller.as_deref().unwrap_or("?"),
        )
    }
}

/// Commodity identifier → current buy price.
pub type CommodityPriceMap = HashMap<String, Decimal>;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Item rarity tier as reported by the auction house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
    Divine,
    Special,
    VerySpecial,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rarity::Common => write!(f, "COMMON"),
            Rarity::Uncommon => write!(f, "UNCOMMON"),
            Rarity::Rare => write!(f, "RARE"),
            Rarity::Epic => write!(f, "EPIC"),
            Rarity::Legendary => write!(f, "LEGENDARY"),
            Rarity::Mythic => write!(f, "MYTHIC"),
            Rarity::Divine => write!(f, "DIVINE"),
            Rarity::Special => write!(f, "SPECIAL"),
            Rarity::VerySpecial => write!(f, "VERY_SPECIAL"),
            Rarity::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// A buy-then-resell opportunity found by the engine.
///
/// Money fields that are rounded are rounded once, here, at emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlipCandidate {
    /// Identifier of the cheapest listing (the one to buy).
    pub id: String,
    /// Canonical (decoration-free) item name.
    pub name: String,
    pub rarity: Rarity,
    /// Original decorated description, kept for display.
    pub description: String,
    pub buy_price: Decimal,
    /// Price of the comparable listing chosen by the estimator.
    pub market_price: Decimal,
    pub profit: i64,
    /// Baseline + commodity cost of modifiers, when a valuation exists.
    pub estimated_worth: Option<i64>,
    pub worth_profit: Option<i64>,
}

impl fmt::Display for FlipCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] buy {} → market {} | profit {}",
            self.name, self.rarity, self.buy_price, self.market_price, self.profit,
        )?;
        if let Some(worth) = self.estimated_worth {
            write!(f, " | worth {worth}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Failure to obtain a snapshot from the retrieval collaborator.
///
/// The engine itself never fails; this is the one condition the caller
/// must handle (typically by keeping the previous cycle's output).
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API rejected request: {0}")]
    Api(String),

    #[error("Snapshot source error ({source_name}): {message}")]
    Source { source_name: String, message: String },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // -- Rarity tests --

    #[test]
    fn test_rarity_deserialize_known() {
        let r: Rarity = serde_json::from_str("\"VERY_SPECIAL\"").unwrap();
        assert_eq!(r, Rarity::VerySpecial);
        let r: Rarity = serde_json::from_str("\"LEGENDARY\"").unwrap();
        assert_eq!(r, Rarity::Legendary);
    }

    #[test]
    fn test_rarity_deserialize_unknown_tier() {
        let r: Rarity = serde_json::from_str("\"ULTIMATE_COSMIC\"").unwrap();
        assert_eq!(r, Rarity::Unknown);
    }

    #[test]
    fn test_rarity_display_matches_wire_name() {
        assert_eq!(Rarity::VerySpecial.to_string(), "VERY_SPECIAL");
        assert_eq!(serde_json::to_string(&Rarity::Mythic).unwrap(), "\"MYTHIC\"");
    }

    // -- RawListing tests --

    #[test]
    fn test_listing_active() {
        let listing = RawListing::sample("a", dec!(100), "seller-1");
        assert!(listing.is_active());
    }

    #[test]
    fn test_listing_claimed_not_active() {
        let mut listing = RawListing::sample("a", dec!(100), "seller-1");
        listing.claimed = true;
        assert!(!listing.is_active());
    }

    #[test]
    fn test_listing_auction_not_active() {
        let mut listing = RawListing::sample("a", dec!(100), "seller-1");
        listing.fixed_price = false;
        assert!(!listing.is_active());
    }

    #[test]
    fn test_listing_without_seller_not_active() {
        let mut listing = RawListing::sample("a", dec!(100), "seller-1");
        listing.seller = None;
        assert!(!listing.is_active());
        listing.seller = Some(String::new());
        assert!(!listing.is_active());
    }

    #[test]
    fn test_listing_display_strips_decoration() {
        let listing = RawListing::sample("abc", dec!(1500), "s1");
        let s = listing.to_string();
        assert!(s.contains("Hyperion"));
        assert!(!s.contains('§'));
    }

    // -- FlipCandidate tests --

    #[test]
    fn test_flip_display_without_worth() {
        let flip = FlipCandidate {
            id: "x".into(),
            name: "Hyperion".into(),
            rarity: Rarity::Legendary,
            description: String::new(),
            buy_price: dec!(100),
            market_price: dec!(200),
            profit: 95,
            estimated_worth: None,
            worth_profit: None,
        };
        let s = flip.to_string();
        assert!(s.contains("profit 95"));
        assert!(!s.contains("worth"));
    }

    #[test]
    fn test_flip_serializes_absent_worth_as_null() {
        let flip = FlipCandidate {
            id: "x".into(),
            name: "Hyperion".into(),
            rarity: Rarity::Legendary,
            description: String::new(),
            buy_price: dec!(100),
            market_price: dec!(200),
            profit: 95,
            estimated_worth: None,
            worth_profit: None,
        };
        let json = serde_json::to_value(&flip).unwrap();
        assert!(json["estimated_worth"].is_null());
        assert_eq!(json["profit"], 95);
    }

    // -- Error tests --

    #[test]
    fn test_snapshot_error_display() {
        let err = SnapshotError::Source {
            source_name: "hypixel".into(),
            message: "page 0 unavailable".into(),
        };
        assert_eq!(err.to_string(), "Snapshot source error (hypixel): page 0 unavailable");
    }
}
