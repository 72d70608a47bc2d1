use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::QuoteError;
use super::types::*;
use super::units::Unit;

/// Maximum number of line items on one quote.
pub const MAX_LINE_ITEMS: usize = 10_000;
/// Maximum length of a document number.
pub const MAX_DOCUMENT_NUMBER_LEN: usize = 200;
/// Largest accepted quantity magnitude on a line.
pub const MAX_QUANTITY: Decimal = dec!(1000000000);
/// Largest accepted unit price magnitude on a line.
pub const MAX_UNIT_PRICE: Decimal = dec!(1000000000);

/// Reject a quantity whose magnitude exceeds [`MAX_QUANTITY`].
pub fn check_quantity(value: Decimal) -> Result<(), QuoteError> {
    check_limit("quantity", value, MAX_QUANTITY)
}

/// Reject a unit price whose magnitude exceeds [`MAX_UNIT_PRICE`].
pub fn check_unit_price(value: Decimal) -> Result<(), QuoteError> {
    check_limit("unit_price", value, MAX_UNIT_PRICE)
}

/// Both limits for one line. Within them no total can overflow.
pub fn check_line_limits(line: &LineItem) -> Result<(), QuoteError> {
    check_quantity(line.quantity)?;
    check_unit_price(line.unit_price)
}

fn check_limit(field: &'static str, value: Decimal, limit: Decimal) -> Result<(), QuoteError> {
    if value.abs() > limit {
        return Err(QuoteError::OutOfRange {
            field,
            value,
            limit,
        });
    }
    Ok(())
}

/// Builder for constructing quotes.
///
/// ```
/// use quotekit::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let quote = QuoteBuilder::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
///     .client_name("Constructora Andina SAC")
///     .location("Arequipa")
///     .add_line(LineItemBuilder::new(dec!(3), Unit::Piece, dec!(50))
///         .description("Steel bracket")
///         .build())
///     .add_line(LineItemBuilder::new(dec!(1), Unit::Lot, dec!(20))
///         .description("Transport")
///         .taxable(false)
///         .build())
///     .build()
///     .unwrap();
///
/// assert_eq!(quote.totals().grand_total, dec!(197.00));
/// ```
pub struct QuoteBuilder {
    client: ClientInfo,
    currency_code: String,
    lines: Vec<LineItem>,
}

impl QuoteBuilder {
    pub fn new(document_date: NaiveDate) -> Self {
        Self {
            client: ClientInfo::new(document_date),
            currency_code: DEFAULT_CURRENCY.to_string(),
            lines: Vec::new(),
        }
    }

    /// Replace the whole client header.
    pub fn client(mut self, client: ClientInfo) -> Self {
        self.client = client;
        self
    }

    pub fn client_name(mut self, name: impl Into<String>) -> Self {
        self.client.name = name.into();
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.client.location = location.into();
        self
    }

    pub fn document_number(mut self, number: impl Into<String>) -> Self {
        self.client.document_number = number.into();
        self
    }

    pub fn validity_period(mut self, text: impl Into<String>) -> Self {
        self.client.validity_period = text.into();
        self
    }

    pub fn delivery_period(mut self, text: impl Into<String>) -> Self {
        self.client.delivery_period = text.into();
        self
    }

    pub fn payment_terms(mut self, text: impl Into<String>) -> Self {
        self.client.payment_terms = text.into();
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency_code = code.into();
        self
    }

    pub fn add_line(mut self, line: LineItem) -> Self {
        self.lines.push(line);
        self
    }

    /// Build the quote. Line ids are reassigned `1..=n` in insertion order.
    pub fn build(self) -> Result<QuoteDocument, QuoteError> {
        if self.lines.is_empty() {
            return Err(QuoteError::Builder(
                "at least one line item is required".into(),
            ));
        }

        // Input limits to prevent abuse
        if self.lines.len() > MAX_LINE_ITEMS {
            return Err(QuoteError::Builder(format!(
                "quote cannot have more than {MAX_LINE_ITEMS} line items"
            )));
        }
        if self.client.document_number.len() > MAX_DOCUMENT_NUMBER_LEN {
            return Err(QuoteError::Builder(format!(
                "document number cannot exceed {MAX_DOCUMENT_NUMBER_LEN} characters"
            )));
        }
        for line in &self.lines {
            check_line_limits(line)?;
        }

        let items = self
            .lines
            .into_iter()
            .zip(1u64..)
            .map(|(line, n)| LineItem {
                id: LineItemId(n),
                ..line
            })
            .collect();

        Ok(QuoteDocument {
            client: self.client,
            items,
            currency_code: self.currency_code,
        })
    }
}

/// Builder for LineItem.
pub struct LineItemBuilder {
    id: u64,
    quantity: Decimal,
    unit: Unit,
    description: String,
    unit_price: Decimal,
    taxable: bool,
}

impl LineItemBuilder {
    /// A taxable line with an empty description.
    pub fn new(quantity: Decimal, unit: Unit, unit_price: Decimal) -> Self {
        Self {
            id: 0,
            quantity,
            unit,
            description: String::new(),
            unit_price,
            taxable: true,
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn taxable(mut self, taxable: bool) -> Self {
        self.taxable = taxable;
        self
    }

    /// Set the id explicitly. Ignored by `QuoteBuilder::build`, which renumbers.
    pub fn id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    pub fn build(self) -> LineItem {
        LineItem {
            id: LineItemId(self.id),
            quantity: self.quantity,
            unit: self.unit,
            description: self.description,
            unit_price: self.unit_price,
            taxable: self.taxable,
        }
    }
}
