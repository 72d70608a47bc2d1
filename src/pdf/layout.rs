//! Text layout of a quote page: rows of positioned cells, paginated.

use crate::core::{QuoteDocument, TAX_RATE, Totals, display_amount, round_money};
use crate::export::RenderConfig;
use rust_decimal::Decimal;

pub(super) const BODY_SIZE: i64 = 10;
pub(super) const TITLE_SIZE: i64 = 16;
const LEADING_FACTOR: f32 = 1.4;

/// One line of text cells at a common baseline.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Row {
    pub size: i64,
    /// (x offset from the left margin, text)
    pub cells: Vec<(f32, String)>,
}

impl Row {
    fn text(size: i64, text: impl Into<String>) -> Self {
        Self {
            size,
            cells: vec![(0.0, text.into())],
        }
    }

    fn blank() -> Self {
        Self {
            size: BODY_SIZE,
            cells: Vec::new(),
        }
    }

    pub fn leading(&self) -> f32 {
        self.size as f32 * LEADING_FACTOR
    }
}

/// A positioned cell on a page, in PDF points from the bottom-left corner.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct PlacedText {
    pub x: i64,
    pub y: i64,
    pub size: i64,
    pub text: String,
}

/// Page geometry derived from the render configuration.
#[derive(Debug, Clone, Copy)]
pub(super) struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    pub fn from_config(config: &RenderConfig) -> Self {
        let (width, height) = config.page_format.size_points(config.orientation);
        let margin = config
            .page_unit
            .to_points(config.page_margin)
            .clamp(0.0, width.min(height) / 4.0);
        Self {
            width,
            height,
            margin,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }
}

fn money(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}

/// Rows of the printed quote, top to bottom. `totals` must be the checked
/// totals of `quote`, which also proves every line amount fits.
pub(super) fn quote_rows(
    label: &str,
    quote: &QuoteDocument,
    totals: &Totals,
    geometry: &PageGeometry,
) -> Vec<Row> {
    let client = &quote.client;
    let cw = geometry.content_width();
    let (price_x, amount_x) = (cw - 150.0, cw - 70.0);
    let desc_x = 85.0;
    // Helvetica averages about half an em per glyph.
    let desc_chars = (((price_x - desc_x) / (BODY_SIZE as f32 * 0.5)) as usize).max(8);

    let mut rows = vec![
        Row::text(TITLE_SIZE, format!("{label} {}", client.document_number)),
        Row::text(BODY_SIZE, format!("Date: {}", client.document_date.format("%Y-%m-%d"))),
        Row::text(BODY_SIZE, format!("Client: {}", client.display_name())),
        Row::text(BODY_SIZE, format!("Location: {}", client.display_location())),
        Row::blank(),
        Row {
            size: BODY_SIZE,
            cells: vec![
                (0.0, "Qty".into()),
                (45.0, "Unit".into()),
                (desc_x, "Description".into()),
                (price_x, "Unit price".into()),
                (amount_x, "Amount".into()),
            ],
        },
    ];

    for item in &quote.items {
        let mut cells = vec![
            (0.0, item.quantity.normalize().to_string()),
            (45.0, item.unit.label().to_string()),
            (desc_x, truncate(&item.description, desc_chars)),
            (price_x, money(item.unit_price)),
            (amount_x, money(display_amount(item))),
        ];
        if !item.taxable {
            cells.push((amount_x + 55.0, "*".into()));
        }
        rows.push(Row {
            size: BODY_SIZE,
            cells,
        });
    }

    let tax_label = format!("Tax ({}%)", (TAX_RATE * Decimal::ONE_HUNDRED).normalize());
    rows.push(Row::blank());
    for (name, value) in [
        ("Subtotal".to_string(), totals.subtotal),
        (tax_label, totals.tax_amount),
        (format!("Total {}", quote.currency_code), totals.grand_total),
    ] {
        rows.push(Row {
            size: BODY_SIZE,
            cells: vec![(price_x, name), (amount_x, money(value))],
        });
    }

    rows.push(Row::blank());
    if quote.items.iter().any(|i| !i.taxable) {
        rows.push(Row::text(BODY_SIZE, "* not subject to tax"));
    }
    rows.push(Row::text(BODY_SIZE, format!("Validity: {}", client.validity_period)));
    rows.push(Row::text(BODY_SIZE, format!("Delivery: {}", client.delivery_period)));
    rows.push(Row::text(BODY_SIZE, format!("Payment: {}", client.payment_terms)));
    rows
}

/// Place rows top-down, starting a new page when the bottom margin is hit.
pub(super) fn paginate(rows: &[Row], geometry: &PageGeometry) -> Vec<Vec<PlacedText>> {
    let top = geometry.height - geometry.margin;
    let bottom = geometry.margin;
    let mut pages = vec![Vec::new()];
    let mut y = top;

    for row in rows {
        y -= row.leading();
        if y < bottom && pages.last().is_some_and(|p: &Vec<PlacedText>| !p.is_empty()) {
            pages.push(Vec::new());
            y = top - row.leading();
        }
        if let Some(page) = pages.last_mut() {
            page.extend(row.cells.iter().map(|(x, text)| PlacedText {
                x: (geometry.margin + x).round() as i64,
                y: y.round() as i64,
                size: row.size,
                text: text.clone(),
            }));
        }
    }
    pages
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        out.push_str("...");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LineItemBuilder, QuoteBuilder, Unit};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn quote(lines: usize) -> QuoteDocument {
        let mut builder = QuoteBuilder::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
            .client_name("Acme");
        for i in 0..lines {
            builder = builder.add_line(
                LineItemBuilder::new(dec!(2), Unit::SquareMetre, dec!(100))
                    .description(format!("Tile {i}"))
                    .taxable(i % 2 == 0)
                    .build(),
            );
        }
        builder.build().unwrap()
    }

    fn geometry() -> PageGeometry {
        PageGeometry::from_config(&RenderConfig::default())
    }

    fn all_text(rows: &[Row]) -> Vec<String> {
        rows.iter()
            .flat_map(|r| r.cells.iter().map(|(_, t)| t.clone()))
            .collect()
    }

    #[test]
    fn rows_include_header_items_and_totals() {
        let q = quote(2);
        let text = all_text(&quote_rows("Quote", &q, &q.totals(), &geometry()));
        assert!(text.contains(&"Quote COT-001".to_string()));
        assert!(text.contains(&"Client: Acme".to_string()));
        assert!(text.contains(&"Tile 1".to_string()));
        assert!(text.contains(&"m²".to_string()));
        assert!(text.contains(&"Tax (18%)".to_string()));
        // subtotal 400.00, tax 36.00, total 436.00
        assert!(text.contains(&"400.00".to_string()));
        assert!(text.contains(&"436.00".to_string()));
        assert!(text.contains(&"* not subject to tax".to_string()));
    }

    #[test]
    fn short_quote_fits_one_page() {
        let g = geometry();
        let q = quote(3);
        let pages = paginate(&quote_rows("Quote", &q, &q.totals(), &g), &g);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].iter().all(|t| t.y >= g.margin as i64));
    }

    #[test]
    fn long_quote_spans_pages() {
        let g = geometry();
        let q = quote(120);
        let pages = paginate(&quote_rows("Quote", &q, &q.totals(), &g), &g);
        assert!(pages.len() > 1);
        assert!(pages.iter().all(|p| !p.is_empty()));
    }

    #[test]
    fn truncates_long_descriptions() {
        assert_eq!(truncate("abcdefghij", 6), "abc...");
        assert_eq!(truncate("abc", 6), "abc");
    }
}
