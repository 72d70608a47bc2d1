use rust_decimal::Decimal;

use super::error::ValidationError;
use super::types::*;

/// Advisory checks for a quote before it is sent.
///
/// Returns all findings (not just the first). The pricing engine never
/// consults these; a quote with findings still prices and exports.
pub fn validate_quote(quote: &QuoteDocument) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if quote.client.document_number.trim().is_empty() {
        errors.push(ValidationError::new(
            "client.document_number",
            "document number must not be empty",
        ));
    }

    if quote.client.validity_period.trim().is_empty() {
        errors.push(ValidationError::new(
            "client.validity_period",
            "validity period should be stated",
        ));
    }

    if quote.currency_code.len() != 3 {
        errors.push(ValidationError::new(
            "currency_code",
            "currency code must be 3 characters (ISO 4217)",
        ));
    }

    if quote.items.is_empty() {
        errors.push(ValidationError::new(
            "items",
            "at least one line item is required",
        ));
    }

    for (i, item) in quote.items.iter().enumerate() {
        let prefix = format!("items.{i}");

        if item.quantity < Decimal::ZERO {
            errors.push(ValidationError::new(
                format!("{prefix}.quantity"),
                "quantity must not be negative",
            ));
        }
        if item.unit_price < Decimal::ZERO {
            errors.push(ValidationError::new(
                format!("{prefix}.unit_price"),
                "unit price must not be negative",
            ));
        }
        if item.description.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("{prefix}.description"),
                "description must not be empty",
            ));
        }
    }

    errors
}
