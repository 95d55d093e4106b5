use serde::{Deserialize, Serialize};
use storekeep_core::ValueObject;

/// A named promotional pricing rule.
///
/// Promotions are stateless value objects: a pure function of
/// `(unit price, quantity)` to a line total. A product carries at most one
/// promotion, and the promotion applies wholesale to the entire requested
/// quantity of an order line — rules never combine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    name: String,
    rule: PromotionRule,
}

/// The closed set of pricing rules.
///
/// Modeled as a sum type (not an open trait) so pricing stays exhaustively
/// matchable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PromotionRule {
    /// `total = unit_price * (1 - percent/100) * quantity`.
    ///
    /// `percent` is applied as given; values outside [0, 100] produce
    /// surcharges or negative totals.
    PercentageDiscount { percent: f64 },
    /// Items pair up in purchase order; every second item costs half.
    SecondItemHalfPrice,
    /// Every complete group of three costs two; the remainder pays full.
    BuyTwoGetOneFree,
}

impl Promotion {
    pub fn percentage_discount(name: impl Into<String>, percent: f64) -> Self {
        Self {
            name: name.into(),
            rule: PromotionRule::PercentageDiscount { percent },
        }
    }

    pub fn second_item_half_price(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rule: PromotionRule::SecondItemHalfPrice,
        }
    }

    pub fn buy_two_get_one_free(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rule: PromotionRule::BuyTwoGetOneFree,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule(&self) -> &PromotionRule {
        &self.rule
    }

    /// Total price for `quantity` items at `unit_price` under this rule.
    ///
    /// Pure, no side effects. `quantity` must be positive; callers validate
    /// before pricing.
    pub fn total_price(&self, unit_price: f64, quantity: i64) -> f64 {
        match self.rule {
            PromotionRule::PercentageDiscount { percent } => {
                unit_price * (1.0 - percent / 100.0) * quantity as f64
            }
            PromotionRule::SecondItemHalfPrice => {
                let full = quantity / 2 + quantity % 2;
                let half = quantity / 2;
                full as f64 * unit_price + half as f64 * unit_price * 0.5
            }
            PromotionRule::BuyTwoGetOneFree => {
                let paid = (quantity / 3) * 2 + quantity % 3;
                paid as f64 * unit_price
            }
        }
    }
}

impl ValueObject for Promotion {}
