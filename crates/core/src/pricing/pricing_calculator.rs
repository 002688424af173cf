//! Pure price and payout computations.
//!
//! Everything in this module is deterministic and side-effect free: the
//! financial configuration is an explicit argument, never fetched behind the
//! caller's back, so two calls with equal inputs yield equal outputs.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::errors::PricingError;
use super::pricing_model::{EngagementTerms, PriceQuote};
use crate::config::FinancialConfig;

/// Computes the full revenue/payout breakdown for one engagement.
///
/// The teacher side: the base rate covers one student for every booked hour,
/// and each student beyond the first adds the per-student bonus per hour.
/// The student side: each hour beyond the first knocks the volume discount
/// off the group's total, spread evenly across the students.
///
/// # Arguments
///
/// * `terms` - group size, duration, and advertised per-student price.
/// * `config` - the financial configuration the rates come from.
pub fn quote(
    terms: &EngagementTerms,
    config: &FinancialConfig,
) -> Result<PriceQuote, PricingError> {
    validate_terms(terms)?;
    validate_config(config)?;

    let students = Decimal::from(terms.students);
    let hours = Decimal::from(terms.hours);

    let base_teacher_payment = config.teacher_base_rate * hours;
    let students_bonus = if terms.students > 1 {
        (students - Decimal::ONE) * config.teacher_bonus_per_student * hours
    } else {
        Decimal::ZERO
    };
    let teacher_payment = base_teacher_payment + students_bonus;

    let hourly_discount = if terms.hours > 1 {
        (hours - Decimal::ONE) * config.volume_discount_per_hour
    } else {
        Decimal::ZERO
    };
    let adjusted_price_per_student = terms.price_per_student - hourly_discount / students;

    // Revenue is taken on the group total, price*students*hours minus the
    // discount per hour, so the per-student split's division never rounds
    // the money.
    let total_revenue = students * terms.price_per_student * hours - hours * hourly_discount;
    let platform_profit = total_revenue - teacher_payment;
    let profit_margin = if total_revenue == Decimal::ZERO {
        None
    } else {
        Some(platform_profit / total_revenue * dec!(100))
    };

    Ok(PriceQuote {
        base_teacher_payment,
        students_bonus,
        teacher_payment,
        hourly_discount,
        adjusted_price_per_student,
        total_revenue,
        platform_profit,
        profit_margin,
    })
}

/// Computes the smallest advertised per-student price, rounded up to the
/// nearest `step`, whose quote reaches at least `target_margin` percent
/// platform profit.
///
/// Solving `profit / revenue >= m/100` for the price gives
/// `price >= (teacher_payment / (1 - m/100) + hours * discount) / (students * hours)`;
/// revenue is strictly increasing in the price, so rounding up preserves the
/// bound.
///
/// # Arguments
///
/// * `students` / `hours` - the engagement shape being priced.
/// * `target_margin` - desired platform margin in percent, `0 <= m < 100`.
/// * `config` - the financial configuration the rates come from.
/// * `step` - price granularity, must be positive ([`super::DEFAULT_PRICE_STEP`]
///   when the caller has no preference).
pub fn minimum_price_for_margin(
    students: i32,
    hours: i32,
    target_margin: Decimal,
    config: &FinancialConfig,
    step: Decimal,
) -> Result<Decimal, PricingError> {
    if students < 1 {
        return Err(PricingError::InvalidStudentCount(students));
    }
    if hours < 1 {
        return Err(PricingError::InvalidHours(hours));
    }
    if target_margin < Decimal::ZERO || target_margin >= dec!(100) {
        return Err(PricingError::MarginOutOfRange(target_margin));
    }
    if step <= Decimal::ZERO {
        return Err(PricingError::InvalidStep(step));
    }
    validate_config(config)?;

    let students_dec = Decimal::from(students);
    let hours_dec = Decimal::from(hours);

    let teacher_payment = config.teacher_base_rate * hours_dec
        + if students > 1 {
            (students_dec - Decimal::ONE) * config.teacher_bonus_per_student * hours_dec
        } else {
            Decimal::ZERO
        };
    let hourly_discount = if hours > 1 {
        (hours_dec - Decimal::ONE) * config.volume_discount_per_hour
    } else {
        Decimal::ZERO
    };

    let required_revenue = teacher_payment / (Decimal::ONE - target_margin / dec!(100));
    let raw = (required_revenue + hours_dec * hourly_discount) / (students_dec * hours_dec);
    let raw = raw.max(Decimal::ZERO);

    Ok((raw / step).ceil() * step)
}

fn validate_terms(terms: &EngagementTerms) -> Result<(), PricingError> {
    if terms.students < 1 {
        return Err(PricingError::InvalidStudentCount(terms.students));
    }
    if terms.hours < 1 {
        return Err(PricingError::InvalidHours(terms.hours));
    }
    if terms.price_per_student < Decimal::ZERO {
        return Err(PricingError::NegativeAmount {
            field: "pricePerStudent",
            value: terms.price_per_student,
        });
    }
    Ok(())
}

fn validate_config(config: &FinancialConfig) -> Result<(), PricingError> {
    for (field, value) in [
        ("teacherBaseRate", config.teacher_base_rate),
        ("teacherBonusPerStudent", config.teacher_bonus_per_student),
        ("volumeDiscountPerHour", config.volume_discount_per_hour),
    ] {
        if value < Decimal::ZERO {
            return Err(PricingError::NegativeAmount { field, value });
        }
    }
    Ok(())
}
