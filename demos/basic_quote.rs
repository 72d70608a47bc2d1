use chrono::NaiveDate;
use quotekit::core::*;
use rust_decimal_macros::dec;

fn main() {
    let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let mut editor = QuoteEditor::new(date);

    editor.update_client(ClientUpdate::Name("Constructora Andina SAC".into()));
    editor.update_client(ClientUpdate::Location("Arequipa".into()));

    // The fresh quote already has one blank line; fill it in.
    let first = editor.snapshot().items[0].id;
    editor.update_item(first, ItemUpdate::Description("Drywall panel".into())).unwrap();
    editor.update_item(first, ItemUpdate::Unit(Unit::SquareMetre)).unwrap();
    editor.update_item(first, ItemUpdate::Quantity(dec!(12.5))).unwrap();
    editor.update_item(first, ItemUpdate::UnitPrice(dec!(38.90))).unwrap();

    let (install, _) = editor.add_item();
    editor.update_item(install, ItemUpdate::Description("Installation".into())).unwrap();
    editor.update_item(install, ItemUpdate::Unit(Unit::Lot)).unwrap();
    editor.update_item(install, ItemUpdate::UnitPrice(dec!(250))).unwrap();
    editor.update_item(install, ItemUpdate::Taxable(false)).unwrap();

    let quote = editor.snapshot();
    let errors = validate_quote(&quote);
    if errors.is_empty() {
        println!("Quote {} is complete", quote.client.document_number);
    } else {
        for e in &errors {
            println!("  - {e}");
        }
    }

    println!("{} ({})", quote.client.display_name(), quote.client.display_location());
    for item in &quote.items {
        println!(
            "  {:>6} {:<4} {:<20} {:>10} {:>10}{}",
            item.quantity,
            item.unit,
            item.description,
            item.unit_price,
            display_amount(item),
            if item.taxable { "" } else { " *" },
        );
    }

    let totals = editor.totals();
    println!("Subtotal:  {}", totals.subtotal);
    println!("Tax (18%): {}", totals.tax_amount);
    println!("Total {}: {}", quote.currency_code, totals.grand_total);

    let mut sequence = QuoteNumberSequence::new("COT-").starting_at(2);
    let next = editor.start_next(&mut sequence, date);
    println!("Next quote: {}", next.client.document_number);
}
