//! Grouping listings into economic equivalence classes.
//!
//! Two listings compete with each other iff their `GroupingKey`s are
//! equal: same canonical name and same sorted modifier signature.

use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::debug;

use crate::lore::{normalize_name, ModifierExtractor};
use crate::types::RawListing;

/// Separator between the canonical name and the modifier signature.
pub const KEY_SEPARATOR: &str = "::";

/// Minimum group size for a market comparable to exist.
pub const MIN_GROUP_SIZE: usize = 2;

// ---------------------------------------------------------------------------
// Grouping key
// ---------------------------------------------------------------------------

/// `<canonicalName>::<modifier>|<modifier>|...` with modifiers sorted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupingKey(String);

impl GroupingKey {
    /// Build a key from a canonical name and display modifiers in any order.
    pub fn build(canonical_name: &str, modifiers: &[String]) -> Self {
        let mut sorted: Vec<&str> = modifiers.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        Self(format!("{canonical_name}{KEY_SEPARATOR}{}", sorted.join("|")))
    }

    /// Key for a raw listing.
    pub fn for_listing(listing: &RawListing, extractor: &ModifierExtractor) -> Self {
        let name = normalize_name(&listing.name);
        let modifiers = extractor.display_modifiers(&listing.description);
        Self::build(&name, &modifiers)
    }

    /// Whether the key names an unmodified item class.
    pub fn is_clean(&self) -> bool {
        self.0.ends_with(KEY_SEPARATOR)
    }

    /// Canonical name part of the key.
    pub fn canonical_name(&self) -> &str {
        self.0.split(KEY_SEPARATOR).next().unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Active listings sharing a key, cheapest first.
#[derive(Debug, Clone)]
pub struct ListingGroup<'a> {
    pub key: GroupingKey,
    pub listings: Vec<&'a RawListing>,
}

impl<'a> ListingGroup<'a> {
    /// The buy candidate.
    pub fn cheapest(&self) -> Option<&'a RawListing> {
        self.listings.first().copied()
    }

    /// Everything but the cheapest listing: the market comparables.
    pub fn candidates(&self) -> &[&'a RawListing] {
        self.listings.get(1..).unwrap_or(&[])
    }
}

/// Result of partitioning one listing snapshot.
#[derive(Debug, Clone, Default)]
pub struct AggregatedSnapshot<'a> {
    /// Groups with at least `MIN_GROUP_SIZE` listings, in key order.
    pub groups: Vec<ListingGroup<'a>>,
    /// Canonical name → lowest price among its clean listings.
    pub baselines: HashMap<String, Decimal>,
    /// Active listings that entered grouping.
    pub active_listings: usize,
}

/// Partition the raw snapshot into groups of competing active listings.
///
/// Clean baselines are taken from every clean group, including groups too
/// small to be estimated themselves.
pub fn aggregate<'a>(
    listings: &'a [RawListing],
    extractor: &ModifierExtractor,
) -> AggregatedSnapshot<'a> {
    let mut by_key: BTreeMap<GroupingKey, Vec<&'a RawListing>> = BTreeMap::new();
    let mut active = 0usize;

    for listing in listings.iter().filter(|l| l.is_active()) {
        active += 1;
        by_key
            .entry(GroupingKey::for_listing(listing, extractor))
            .or_default()
            .push(listing);
    }

    let mut baselines = HashMap::new();
    let mut groups = Vec::new();

    for (key, mut members) in by_key {
        // Stable: equal prices keep snapshot order.
        members.sort_by(|a, b| a.price.cmp(&b.price));

        if key.is_clean() {
            if let Some(lowest) = members.first() {
                baselines.insert(key.canonical_name().to_string(), lowest.price);
            }
        }

        if members.len() >= MIN_GROUP_SIZE {
            groups.push(ListingGroup { key, listings: members });
        }
    }

    debug!(
        snapshot = listings.len(),
        active,
        groups = groups.len(),
        baselines = baselines.len(),
        "Listings aggregated"
    );

    AggregatedSnapshot {
        groups,
        baselines,
        active_listings: active,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
