use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::QuoteError;
use super::pricing;
use super::units::Unit;

/// Seed document number for a fresh quote.
pub const DEFAULT_DOCUMENT_NUMBER: &str = "COT-001";
/// Default validity period text.
pub const DEFAULT_VALIDITY_PERIOD: &str = "15 days";
/// Default delivery period text.
pub const DEFAULT_DELIVERY_PERIOD: &str = "To be agreed";
/// Default payment terms text.
pub const DEFAULT_PAYMENT_TERMS: &str = "50% advance, balance on delivery";
/// Default currency (ISO 4217).
pub const DEFAULT_CURRENCY: &str = "PEN";

/// Printed in place of a blank client name.
pub const CLIENT_NAME_PLACEHOLDER: &str = "Client";
/// Printed in place of a blank client location.
pub const LOCATION_PLACEHOLDER: &str = "-";

/// Opaque line item identifier, stable for one editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(pub(crate) u64);

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One row of a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    /// Expected non-negative; the pricing engine does not enforce it.
    pub quantity: Decimal,
    pub unit: Unit,
    pub description: String,
    /// Price per unit, in the document currency.
    pub unit_price: Decimal,
    /// Whether `TAX_RATE` applies to this line.
    pub taxable: bool,
}

impl LineItem {
    /// `quantity × unit_price` at full precision.
    ///
    /// Panics on overflow, which cannot happen within the builder's line
    /// limits.
    pub fn amount(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// Client and business-terms header of a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub location: String,
    pub document_date: NaiveDate,
    pub document_number: String,
    pub validity_period: String,
    pub delivery_period: String,
    pub payment_terms: String,
}

impl ClientInfo {
    /// Defaults for a quote dated `document_date`.
    pub fn new(document_date: NaiveDate) -> Self {
        Self {
            name: String::new(),
            location: String::new(),
            document_date,
            document_number: DEFAULT_DOCUMENT_NUMBER.to_string(),
            validity_period: DEFAULT_VALIDITY_PERIOD.to_string(),
            delivery_period: DEFAULT_DELIVERY_PERIOD.to_string(),
            payment_terms: DEFAULT_PAYMENT_TERMS.to_string(),
        }
    }

    /// Client name, or the placeholder when blank.
    pub fn display_name(&self) -> &str {
        non_blank_or(&self.name, CLIENT_NAME_PLACEHOLDER)
    }

    /// Client location, or the placeholder when blank.
    pub fn display_location(&self) -> &str {
        non_blank_or(&self.location, LOCATION_PLACEHOLDER)
    }
}

impl Default for ClientInfo {
    /// Dated local today.
    fn default() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }
}

fn non_blank_or<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { placeholder } else { trimmed }
}

/// The quote aggregate: client header plus at least one line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteDocument {
    pub client: ClientInfo,
    /// Never empty.
    pub items: Vec<LineItem>,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl QuoteDocument {
    /// Totals derived from the current items.
    pub fn totals(&self) -> Totals {
        pricing::calculate_totals(&self.items)
    }

    /// Totals with checked arithmetic, for documents that did not come
    /// through the builder or the editor.
    pub fn try_totals(&self) -> Result<Totals, QuoteError> {
        pricing::try_calculate_totals(&self.items)
    }

    pub fn item(&self, id: LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }
}

/// Derived document totals. Computed on demand, never stored on the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of all line amounts, rounded.
    pub subtotal: Decimal,
    /// Tax over taxable lines, rounded.
    pub tax_amount: Decimal,
    /// `subtotal + tax_amount`, rounded.
    pub grand_total: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn client_defaults() {
        let client = ClientInfo::new(date());
        assert_eq!(client.document_number, DEFAULT_DOCUMENT_NUMBER);
        assert_eq!(client.validity_period, DEFAULT_VALIDITY_PERIOD);
        assert_eq!(client.document_date, date());
        assert!(client.name.is_empty());
    }

    #[test]
    fn blank_name_uses_placeholder() {
        let mut client = ClientInfo::new(date());
        client.name = "   ".into();
        assert_eq!(client.display_name(), CLIENT_NAME_PLACEHOLDER);
        assert_eq!(client.display_location(), LOCATION_PLACEHOLDER);
        client.name = " Acme SAC ".into();
        assert_eq!(client.display_name(), "Acme SAC");
    }

    #[test]
    fn line_amount_keeps_full_precision() {
        let item = LineItem {
            id: LineItemId(1),
            quantity: dec!(3),
            unit: Unit::Piece,
            description: "Bolt".into(),
            unit_price: dec!(0.335),
            taxable: true,
        };
        assert_eq!(item.amount(), dec!(1.005));
    }

    #[test]
    fn line_item_id_display() {
        assert_eq!(LineItemId(7).to_string(), "#7");
    }
}
