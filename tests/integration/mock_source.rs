//! Mock snapshot source for integration testing.
//!
//! Provides a deterministic `SnapshotSource` that serves fixed listing and
//! commodity snapshots from memory, counts fetches, and can be told to
//! fail.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex};

use flipper::source::SnapshotSource;
use flipper::types::*;

/// Which snapshot a forced error applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Listings,
    Commodities,
}

/// A mock snapshot source for deterministic testing.
///
/// Snapshots are swappable between cycles through the shared handles.
#[derive(Clone)]
pub struct MockSource {
    name: String,
    listings: Arc<Mutex<Vec<RawListing>>>,
    commodities: Arc<Mutex<CommodityPriceMap>>,
    fetches: Arc<Mutex<usize>>,
    /// If set, the named fetch returns this error message.
    force_error: Arc<Mutex<Option<(FailOn, String)>>>,
}

impl MockSource {
    pub fn new(listings: Vec<RawListing>, commodities: CommodityPriceMap) -> Self {
        Self {
            name: "mock".to_string(),
            listings: Arc::new(Mutex::new(listings)),
            commodities: Arc::new(Mutex::new(commodities)),
            fetches: Arc::new(Mutex::new(0)),
            force_error: Arc::new(Mutex::new(None)),
        }
    }

    /// Replace the listing snapshot served by the next cycle.
    pub fn set_listings(&self, listings: Vec<RawListing>) {
        *self.listings.lock().unwrap() = listings;
    }

    pub fn set_error(&self, on: FailOn, msg: &str) {
        *self.force_error.lock().unwrap() = Some((on, msg.to_string()));
    }

    pub fn clear_error(&self) {
        *self.force_error.lock().unwrap() = None;
    }

    /// Total fetch calls of either kind.
    pub fn fetch_count(&self) -> usize {
        *self.fetches.lock().unwrap()
    }

    fn check_error(&self, on: FailOn) -> Result<(), SnapshotError> {
        *self.fetches.lock().unwrap() += 1;
        match &*self.force_error.lock().unwrap() {
            Some((target, msg)) if *target == on => Err(SnapshotError::Source {
                source_name: self.name.clone(),
                message: msg.clone(),
            }),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl SnapshotSource for MockSource {
    async fn fetch_listings(&self) -> Result<Vec<RawListing>, SnapshotError> {
        self.check_error(FailOn::Listings)?;
        Ok(self.listings.lock().unwrap().clone())
    }

    async fn fetch_commodity_prices(&self) -> Result<CommodityPriceMap, SnapshotError> {
        self.check_error(FailOn::Commodities)?;
        Ok(self.commodities.lock().unwrap().clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ---------------------------------------------------------------------------
// Snapshot builders
// ---------------------------------------------------------------------------

pub fn make_listing(id: &str, name: &str, price: Decimal, lore: &str, seller: &str) -> RawListing {
    RawListing {
        id: id.to_string(),
        name: name.to_string(),
        rarity: Rarity::Legendary,
        price,
        fixed_price: true,
        claimed: false,
        description: lore.to_string(),
        seller: Some(seller.to_string()),
    }
}

pub fn make_commodities(entries: &[(&str, Decimal)]) -> CommodityPriceMap {
    entries.iter().map(|(id, p)| (id.to_string(), *p)).collect()
}
