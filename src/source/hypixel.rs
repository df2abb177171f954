//! Hypixel SkyBlock public API.
//!
//! Listings come from the paginated `/auctions` endpoint, commodity
//! prices from `/bazaar`. Both are public; no API key is needed.
//!
//! Page 0 is fetched first to learn `totalPages`. The rest are fetched
//! concurrently in fixed-size batches. A page that fails is dropped with a
//! warning and the snapshot shrinks; only a page-0 failure fails the
//! whole fetch. There are no retries: the next cycle is the retry.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::SnapshotSource;
use crate::config::SourceConfig;
use crate::types::{CommodityPriceMap, Rarity, RawListing, SnapshotError};

const SOURCE_NAME: &str = "hypixel";

// ---------------------------------------------------------------------------
// API response types (Hypixel JSON → Rust)
// ---------------------------------------------------------------------------

/// One page of `/auctions`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuctionPage {
    success: bool,
    #[serde(default)]
    cause: Option<String>,
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    auctions: Vec<AuctionDto>,
}

/// A single auction. Only the fields the engine needs.
#[derive(Debug, Deserialize)]
struct AuctionDto {
    uuid: String,
    item_name: String,
    tier: Rarity,
    starting_bid: Decimal,
    /// Buy-it-now.
    #[serde(default)]
    bin: bool,
    #[serde(default)]
    claimed: bool,
    #[serde(default)]
    item_lore: String,
    #[serde(default)]
    auctioneer: Option<String>,
}

impl From<AuctionDto> for RawListing {
    fn from(dto: AuctionDto) -> Self {
        RawListing {
            id: dto.uuid,
            name: dto.item_name,
            rarity: dto.tier,
            price: dto.starting_bid,
            fixed_price: dto.bin,
            claimed: dto.claimed,
            description: dto.item_lore,
            seller: dto.auctioneer,
        }
    }
}

/// `/bazaar` response.
#[derive(Debug, Deserialize)]
struct BazaarResponse {
    success: bool,
    #[serde(default)]
    cause: Option<String>,
    #[serde(default)]
    products: HashMap<String, BazaarProduct>,
}

#[derive(Debug, Deserialize)]
struct BazaarProduct {
    quick_status: QuickStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuickStatus {
    #[serde(default)]
    buy_price: f64,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Hypixel SkyBlock snapshot client.
pub struct HypixelClient {
    http: Client,
    base_url: String,
    max_pages: u32,
    page_batch_size: usize,
}

impl HypixelClient {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to build HTTP client for Hypixel")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_pages: config.max_pages,
            page_batch_size: config.page_batch_size.max(1),
        })
    }

    // -- Internal helpers ------------------------------------------------

    async fn fetch_page(&self, page: u32) -> Result<AuctionPage, SnapshotError> {
        let url = format!("{}/auctions?page={page}", self.base_url);
        debug!(url = %url, "Fetching auction page");

        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(SnapshotError::Api(format!(
                "auctions page {page} returned {}",
                resp.status()
            )));
        }

        let body: AuctionPage = resp.json().await?;
        if !body.success {
            return Err(SnapshotError::Api(format!(
                "auctions page {page}: {}",
                body.cause.as_deref().unwrap_or("unknown cause")
            )));
        }

        Ok(body)
    }
}

/// Remaining pages to fetch after page 0, grouped into concurrent batches.
fn page_batches(total_pages: u32, max_pages: u32, batch_size: usize) -> Vec<Vec<u32>> {
    let last = total_pages.min(max_pages);
    let pages: Vec<u32> = (1..last).collect();
    pages.chunks(batch_size.max(1)).map(<[u32]>::to_vec).collect()
}

/// Flatten pages into listings, preserving page order.
fn merge_pages(pages: Vec<AuctionPage>) -> Vec<RawListing> {
    pages
        .into_iter()
        .flat_map(|p| p.auctions)
        .map(RawListing::from)
        .collect()
}

/// Keep products with a positive instant-buy price.
fn price_map(products: HashMap<String, BazaarProduct>) -> CommodityPriceMap {
    products
        .into_iter()
        .filter(|(_, p)| p.quick_status.buy_price > 0.0)
        .filter_map(|(id, p)| Decimal::from_f64(p.quick_status.buy_price).map(|price| (id, price)))
        .collect()
}

#[async_trait]
impl SnapshotSource for HypixelClient {
    async fn fetch_listings(&self) -> Result<Vec<RawListing>, SnapshotError> {
        let first = self.fetch_page(0).await?;
        let batches = page_batches(first.total_pages, self.max_pages, self.page_batch_size);

        let mut pages = vec![first];
        let mut dropped = 0usize;

        for batch in batches {
            let results = join_all(batch.iter().map(|&page| self.fetch_page(page))).await;
            for (page, result) in batch.into_iter().zip(results) {
                match result {
                    Ok(body) => pages.push(body),
                    Err(e) => {
                        dropped += 1;
                        warn!(page, error = %e, "Dropping auction page");
                    }
                }
            }
        }

        let fetched = pages.len();
        let listings = merge_pages(pages);
        info!(
            pages = fetched,
            dropped,
            listings = listings.len(),
            "Auction snapshot fetched"
        );

        Ok(listings)
    }

    async fn fetch_commodity_prices(&self) -> Result<CommodityPriceMap, SnapshotError> {
        let url = format!("{}/bazaar", self.base_url);
        debug!(url = %url, "Fetching bazaar");

        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(SnapshotError::Api(format!("bazaar returned {}", resp.status())));
        }

        let body: BazaarResponse = resp.json().await?;
        if !body.success {
            return Err(SnapshotError::Api(format!(
                "bazaar: {}",
                body.cause.as_deref().unwrap_or("unknown cause")
            )));
        }

        let prices = price_map(body.products);
        info!(products = prices.len(), "Commodity prices fetched");
        Ok(prices)
    }

    fn name(&self) -> &str {
        SOURCE_NAME
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
