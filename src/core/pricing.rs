//! Quote totals.
//!
//! Line amounts are kept at full precision. Rounding happens once per
//! aggregate: the subtotal, the tax, and the grand total.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::error::QuoteError;
use super::types::{LineItem, Totals};

/// Tax rate applied to every taxable line.
pub const TAX_RATE: Decimal = dec!(0.18);

/// Decimal places of every monetary aggregate.
pub const MONEY_DP: u32 = 2;

/// Compute subtotal, tax and grand total for `items`.
///
/// Pure and order-independent. Zero quantities or prices contribute nothing;
/// negative values are summed as-is and reduce the totals.
///
/// ```
/// use quotekit::core::*;
/// use rust_decimal_macros::dec;
///
/// let item = LineItemBuilder::new(dec!(2), Unit::Piece, dec!(100)).build();
/// let totals = calculate_totals(&[item]);
/// assert_eq!(totals.subtotal, dec!(200.00));
/// assert_eq!(totals.tax_amount, dec!(36.00));
/// assert_eq!(totals.grand_total, dec!(236.00));
/// ```
///
/// # Panics
///
/// Panics if an amount overflows the `Decimal` range. Lines accepted by
/// [`QuoteBuilder`](super::QuoteBuilder) and [`QuoteEditor`](super::QuoteEditor)
/// stay within [`MAX_QUANTITY`](super::MAX_QUANTITY) and
/// [`MAX_UNIT_PRICE`](super::MAX_UNIT_PRICE) and cannot overflow; use
/// [`try_calculate_totals`] for documents from elsewhere.
pub fn calculate_totals(items: &[LineItem]) -> Totals {
    let net: Decimal = items.iter().map(LineItem::amount).sum();
    let taxable: Decimal = items
        .iter()
        .filter(|i| i.taxable)
        .map(LineItem::amount)
        .sum();

    let subtotal = round_money(net);
    let tax_amount = round_money(taxable * TAX_RATE);
    let grand_total = round_money(subtotal + tax_amount);

    Totals {
        subtotal,
        tax_amount,
        grand_total,
    }
}

/// [`calculate_totals`] with checked arithmetic.
///
/// # Errors
///
/// `QuoteError::Arithmetic` if a line amount or a sum leaves the `Decimal`
/// range.
pub fn try_calculate_totals(items: &[LineItem]) -> Result<Totals, QuoteError> {
    let mut net = Decimal::ZERO;
    let mut taxable = Decimal::ZERO;
    for item in items {
        let amount = item
            .quantity
            .checked_mul(item.unit_price)
            .ok_or_else(|| overflow(format!("amount of line {}", item.id)))?;
        net = net
            .checked_add(amount)
            .ok_or_else(|| overflow("subtotal".into()))?;
        if item.taxable {
            taxable = taxable
                .checked_add(amount)
                .ok_or_else(|| overflow("taxable base".into()))?;
        }
    }

    let subtotal = round_money(net);
    let tax_amount = round_money(
        taxable
            .checked_mul(TAX_RATE)
            .ok_or_else(|| overflow("tax".into()))?,
    );
    let grand_total = round_money(
        subtotal
            .checked_add(tax_amount)
            .ok_or_else(|| overflow("grand total".into()))?,
    );

    Ok(Totals {
        subtotal,
        tax_amount,
        grand_total,
    })
}

fn overflow(what: String) -> QuoteError {
    QuoteError::Arithmetic(format!("{what} exceeds the decimal range"))
}

/// Line amount rounded for display.
///
/// Uses the same rounding as the aggregates, but the aggregates are computed
/// from unrounded amounts, so a column of displayed line amounts can differ
/// from the displayed subtotal by a cent.
pub fn display_amount(item: &LineItem) -> Decimal {
    round_money(item.amount())
}

/// Round to `MONEY_DP` places, half away from zero (commercial rounding).
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}
