//! Property-based tests for the pricing engine.
//!
//! Run with: `cargo test --test proptest_tests`

use proptest::prelude::*;
use quotekit::core::*;
use rust_decimal::Decimal;

// ── Proptest Strategies ─────────────────────────────────────────────────────

/// Generate a price (0.000 to 99999.999), three places to hit half-cents.
fn arb_price() -> impl Strategy<Value = Decimal> {
    (0u64..100_000_000u64).prop_map(|mills| Decimal::new(mills as i64, 3))
}

/// Generate a quantity (0.00 to 9999.99).
fn arb_quantity() -> impl Strategy<Value = Decimal> {
    (0u64..1_000_000u64).prop_map(|hundredths| Decimal::new(hundredths as i64, 2))
}

fn arb_unit() -> impl Strategy<Value = Unit> {
    prop::sample::select(Unit::ALL.to_vec())
}

fn arb_item() -> impl Strategy<Value = LineItem> {
    (arb_quantity(), arb_unit(), arb_price(), any::<bool>()).prop_map(
        |(qty, unit, price, taxable)| {
            LineItemBuilder::new(qty, unit, price)
                .taxable(taxable)
                .build()
        },
    )
}

fn arb_items() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(arb_item(), 1..20)
}

/// The same items twice, the second copy in random order.
fn arb_items_and_shuffle() -> impl Strategy<Value = (Vec<LineItem>, Vec<LineItem>)> {
    arb_items().prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
}

proptest! {
    #[test]
    fn subtotal_is_rounded_sum(items in arb_items()) {
        let expected = round_money(items.iter().map(|i| i.quantity * i.unit_price).sum());
        prop_assert_eq!(calculate_totals(&items).subtotal, expected);
    }

    #[test]
    fn tax_covers_only_taxable_lines(items in arb_items()) {
        let taxable: Decimal = items
            .iter()
            .filter(|i| i.taxable)
            .map(|i| i.quantity * i.unit_price)
            .sum();
        prop_assert_eq!(calculate_totals(&items).tax_amount, round_money(taxable * TAX_RATE));
    }

    #[test]
    fn exempt_lines_add_no_tax(items in arb_items()) {
        let exempt: Vec<_> = items
            .into_iter()
            .map(|i| LineItem { taxable: false, ..i })
            .collect();
        prop_assert_eq!(calculate_totals(&exempt).tax_amount, Decimal::ZERO);
    }

    #[test]
    fn grand_total_is_rounded_sum_of_parts(items in arb_items()) {
        let totals = calculate_totals(&items);
        prop_assert_eq!(totals.grand_total, round_money(totals.subtotal + totals.tax_amount));
        // Inputs are non-negative, so tax can only add.
        prop_assert!(totals.grand_total >= totals.subtotal);
    }

    #[test]
    fn order_does_not_matter((items, shuffled) in arb_items_and_shuffle()) {
        prop_assert_eq!(calculate_totals(&items), calculate_totals(&shuffled));
    }

    #[test]
    fn recomputing_is_idempotent(items in arb_items()) {
        let first = calculate_totals(&items);
        let second = calculate_totals(&items);
        prop_assert_eq!(first, second);
        prop_assert!(first.subtotal.scale() <= MONEY_DP);
    }

    #[test]
    fn aggregates_have_two_places_at_most(items in arb_items()) {
        let totals = calculate_totals(&items);
        for value in [totals.subtotal, totals.tax_amount, totals.grand_total] {
            prop_assert_eq!(round_money(value), value);
        }
    }

    #[test]
    fn checked_totals_agree_within_limits(items in arb_items()) {
        prop_assert_eq!(try_calculate_totals(&items).unwrap(), calculate_totals(&items));
    }

    #[test]
    fn editor_totals_match_engine(prices in prop::collection::vec(arb_price(), 1..10)) {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let mut editor = QuoteEditor::new(date);
        let first = editor.snapshot().items[0].id;
        editor.update_item(first, ItemUpdate::UnitPrice(prices[0])).unwrap();
        for price in &prices[1..] {
            let (id, _) = editor.add_item();
            editor.update_item(id, ItemUpdate::UnitPrice(*price)).unwrap();
        }
        let doc = editor.snapshot();
        prop_assert_eq!(editor.totals(), calculate_totals(&doc.items));
        prop_assert_eq!(doc.items.len(), prices.len());
    }
}
