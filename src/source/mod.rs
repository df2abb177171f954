//! Snapshot sources.
//!
//! Defines the `SnapshotSource` trait the refresh cycle pulls from, and
//! provides the Hypixel SkyBlock API implementation.

pub mod hypixel;

use async_trait::async_trait;

use crate::types::{CommodityPriceMap, RawListing, SnapshotError};

/// Abstraction over where listing and commodity snapshots come from.
///
/// Implementors fetch a full snapshot per call; nothing is cached between
/// calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch every listing currently on the auction house.
    async fn fetch_listings(&self) -> Result<Vec<RawListing>, SnapshotError>;

    /// Fetch current buy prices of tradeable commodities.
    async fn fetch_commodity_prices(&self) -> Result<CommodityPriceMap, SnapshotError>;

    /// Source name for logging and identification.
    fn name(&self) -> &str;
}
