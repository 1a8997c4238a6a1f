//! Purchase price computation.
//!
//! net = unit_price * amount * (100 - discount_percent) / 100
//!
//! All arithmetic is checked; division truncates toward zero, which for the
//! non-negative operands used here is floor.

use collectible_common::Error;

use crate::storage::PERCENT_DENOMINATOR;

/// Undiscounted price of `amount` tokens.
pub fn total_price(unit_price: i128, amount: u32) -> Result<i128, Error> {
    if unit_price <= 0 {
        return Err(Error::InvalidPrice);
    }
    if amount == 0 {
        return Err(Error::InvalidAmount);
    }

    unit_price
        .checked_mul(amount as i128)
        .ok_or(Error::ArithmeticOverflow)
}

/// Apply a whole-percent discount to `total`.
pub fn apply_discount(total: i128, discount_percent: u32) -> Result<i128, Error> {
    if discount_percent >= PERCENT_DENOMINATOR {
        return Err(Error::InvalidDiscount);
    }

    let kept = (PERCENT_DENOMINATOR - discount_percent) as i128;
    total
        .checked_mul(kept)
        .ok_or(Error::ArithmeticOverflow)?
        .checked_div(PERCENT_DENOMINATOR as i128)
        .ok_or(Error::ArithmeticOverflow)
}

/// Price actually charged for `amount` tokens under a discount.
pub fn net_price(unit_price: i128, amount: u32, discount_percent: u32) -> Result<i128, Error> {
    let total = total_price(unit_price, amount)?;
    apply_discount(total, discount_percent)
}
