//! Auction house fee model.
//!
//! Selling costs a sales tax (taken from the proceeds) and a listing fee
//! (paid up front), both tiered by price. All arithmetic is exact decimal;
//! rounding happens only when a flip is emitted.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ---------------------------------------------------------------------------
// Fee schedule
// ---------------------------------------------------------------------------

/// Tiered fee rates.
#[derive(Debug, Clone)]
pub struct FeeSchedule {
    /// Prices at or above this pay the high sales-tax rate.
    pub high_tax_threshold: Decimal,
    pub low_tax_rate: Decimal,
    pub high_tax_rate: Decimal,
    /// Listing fee tiers: at or below `listing_tier_1` → rate 1,
    /// at or below `listing_tier_2` → rate 2, otherwise rate 3.
    pub listing_tier_1: Decimal,
    pub listing_tier_2: Decimal,
    pub listing_rate_1: Decimal,
    pub listing_rate_2: Decimal,
    pub listing_rate_3: Decimal,
    /// Undercut applied to the comparable to get our sell price.
    pub undercut: Decimal,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            high_tax_threshold: dec!(1_000_000),
            low_tax_rate: dec!(0.01),
            high_tax_rate: dec!(0.02),
            listing_tier_1: dec!(10_000_000),
            listing_tier_2: dec!(99_999_999),
            listing_rate_1: dec!(0.01),
            listing_rate_2: dec!(0.02),
            listing_rate_3: dec!(0.025),
            undercut: Decimal::ONE,
        }
    }
}

/// Full profit computation for one buy/sell pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfitBreakdown {
    pub buy_price: Decimal,
    pub sell_price: Decimal,
    pub sales_tax: Decimal,
    pub listing_fee: Decimal,
    /// Unrounded net profit.
    pub profit: Decimal,
}

impl ProfitBreakdown {
    pub fn total_fees(&self) -> Decimal {
        self.sales_tax + self.listing_fee
    }
}

impl FeeSchedule {
    pub fn sales_tax(&self, price: Decimal) -> Decimal {
        if price >= self.high_tax_threshold {
            price * self.high_tax_rate
        } else {
            price * self.low_tax_rate
        }
    }

    pub fn listing_fee(&self, price: Decimal) -> Decimal {
        if price <= self.listing_tier_1 {
            price * self.listing_rate_1
        } else if price <= self.listing_tier_2 {
            price * self.listing_rate_2
        } else {
            price * self.listing_rate_3
        }
    }

    /// Profit from buying at `buy_price` and relisting just under
    /// `market_price`.
    pub fn breakdown(&self, buy_price: Decimal, market_price: Decimal) -> ProfitBreakdown {
        let sell_price = market_price - self.undercut;
        let sales_tax = self.sales_tax(sell_price);
        let listing_fee = self.listing_fee(sell_price);
        let profit = sell_price - buy_price - sales_tax - listing_fee;

        ProfitBreakdown {
            buy_price,
            sell_price,
            sales_tax,
            listing_fee,
            profit,
        }
    }
}

/// Round to a whole coin, half away from zero.
pub fn round_coins(amount: Decimal) -> i64 {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(if amount.is_sign_negative() { i64::MIN } else { i64::MAX })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sales_tax_tiers() {
        let fees = FeeSchedule::default();
        assert_eq!(fees.sales_tax(dec!(999_999)), dec!(9_999.99));
        assert_eq!(fees.sales_tax(dec!(1_000_000)), dec!(20_000));
        assert_eq!(fees.sales_tax(dec!(5_000_000)), dec!(100_000));
    }

    #[test]
    fn test_listing_fee_tiers() {
        let fees = FeeSchedule::default();
        assert_eq!(fees.listing_fee(dec!(5_000_000)), dec!(50_000));
        assert_eq!(fees.listing_fee(dec!(10_000_000)), dec!(100_000));
        assert_eq!(fees.listing_fee(dec!(50_000_000)), dec!(1_000_000));
        assert_eq!(fees.listing_fee(dec!(99_999_999)), dec!(1_999_999.98));
        assert_eq!(fees.listing_fee(dec!(100_000_000)), dec!(2_500_000));
    }

    #[test]
    fn test_fifty_million_tier() {
        let fees = FeeSchedule::default();
        assert_eq!(fees.sales_tax(dec!(50_000_000)), dec!(1_000_000));
        assert_eq!(fees.listing_fee(dec!(50_000_000)), dec!(1_000_000));
    }

    #[test]
    fn test_breakdown_undercuts_market() {
        let fees = FeeSchedule::default();
        let b = fees.breakdown(dec!(1_000_000), dec!(1_300_000));
        assert_eq!(b.sell_price, dec!(1_299_999));
        assert_eq!(b.sales_tax, dec!(25_999.98));
        assert_eq!(b.listing_fee, dec!(12_999.99));
        assert_eq!(b.total_fees(), dec!(38_999.97));
        assert_eq!(b.profit, dec!(260_999.03));
    }

    #[test]
    fn test_breakdown_below_tax_threshold() {
        let fees = FeeSchedule::default();
        let b = fees.breakdown(dec!(900_000), dec!(950_000));
        assert_eq!(b.sell_price, dec!(949_999));
        assert_eq!(b.sales_tax, dec!(9_499.99));
        assert_eq!(b.listing_fee, dec!(9_499.99));
        assert_eq!(b.profit, dec!(30_999.02));
    }

    #[test]
    fn test_breakdown_can_be_negative() {
        let fees = FeeSchedule::default();
        let b = fees.breakdown(dec!(1_000), dec!(1_001));
        assert!(b.profit < Decimal::ZERO);
    }

    #[test]
    fn test_round_coins() {
        assert_eq!(round_coins(dec!(260_999.03)), 260_999);
        assert_eq!(round_coins(dec!(10.5)), 11);
        assert_eq!(round_coins(dec!(11.5)), 12);
        assert_eq!(round_coins(dec!(-10.5)), -11);
        assert_eq!(round_coins(dec!(0.49)), 0);
    }
}
