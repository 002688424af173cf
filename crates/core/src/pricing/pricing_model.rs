//! Pricing domain models.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Default granularity for suggested per-student prices.
pub const DEFAULT_PRICE_STEP: Decimal = dec!(500);

/// What a price computation needs to know about one engagement: group size,
/// duration, and the advertised per-student hourly price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementTerms {
    pub students: i32,
    pub hours: i32,
    pub price_per_student: Decimal,
}

/// Complete revenue and payout breakdown for one engagement.
///
/// `profit_margin` is a percentage and is `None` when revenue is zero (the
/// ratio is undefined, not 0 or 100).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub base_teacher_payment: Decimal,
    pub students_bonus: Decimal,
    pub teacher_payment: Decimal,
    pub hourly_discount: Decimal,
    pub adjusted_price_per_student: Decimal,
    pub total_revenue: Decimal,
    pub platform_profit: Decimal,
    pub profit_margin: Option<Decimal>,
}
