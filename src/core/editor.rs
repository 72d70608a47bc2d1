//! Editing session controller.
//!
//! [`QuoteEditor`] owns the one mutable quote of a session. Every edit goes
//! through a named operation and hands back an immutable snapshot, so views
//! and the pricing engine only ever see consistent documents.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use super::builder::{LineItemBuilder, check_line_limits, check_quantity, check_unit_price};
use super::error::QuoteError;
use super::numbering::QuoteNumberSequence;
use super::types::*;
use super::units::Unit;

/// Immutable view of the document after an edit.
pub type QuoteSnapshot = Arc<QuoteDocument>;

/// A single-field edit of a line item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemUpdate {
    Quantity(Decimal),
    Unit(Unit),
    Description(String),
    UnitPrice(Decimal),
    Taxable(bool),
}

/// A single-field edit of the client header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientUpdate {
    Name(String),
    Location(String),
    DocumentDate(NaiveDate),
    DocumentNumber(String),
    ValidityPeriod(String),
    DeliveryPeriod(String),
    PaymentTerms(String),
}

/// Owner of the quote being edited.
#[derive(Debug, Clone)]
pub struct QuoteEditor {
    document: QuoteSnapshot,
    next_id: u64,
}

impl QuoteEditor {
    /// A fresh session: default client header dated `today`, one blank line.
    pub fn new(today: NaiveDate) -> Self {
        Self::with_client(ClientInfo::new(today))
    }

    /// Resume editing an existing document. Empty documents get a blank line.
    ///
    /// Ids are kept when they are unique and leave room for new ones;
    /// otherwise every line is renumbered `1..=n` in document order.
    ///
    /// # Errors
    ///
    /// `QuoteError::OutOfRange` if a line exceeds the quantity or unit price
    /// limits.
    pub fn from_document(mut document: QuoteDocument) -> Result<Self, QuoteError> {
        for item in &document.items {
            check_line_limits(item)?;
        }

        let mut seen = HashSet::with_capacity(document.items.len());
        let unique = document.items.iter().all(|i| seen.insert(i.id));
        let max_id = document.items.iter().map(|i| i.id.0).max().unwrap_or(0);
        let mut next_id = match max_id.checked_add(1) {
            Some(next) if unique => next,
            _ => {
                debug!(items = document.items.len(), "renumbering resumed line items");
                for (item, n) in document.items.iter_mut().zip(1u64..) {
                    item.id = LineItemId(n);
                }
                document.items.len() as u64 + 1
            }
        };

        if document.items.is_empty() {
            document.items.push(blank_item(next_id));
            next_id += 1;
        }
        Ok(Self {
            document: Arc::new(document),
            next_id,
        })
    }

    fn with_client(client: ClientInfo) -> Self {
        Self {
            document: Arc::new(QuoteDocument {
                client,
                items: vec![blank_item(1)],
                currency_code: DEFAULT_CURRENCY.to_string(),
            }),
            next_id: 2,
        }
    }

    /// The current document.
    pub fn snapshot(&self) -> QuoteSnapshot {
        Arc::clone(&self.document)
    }

    /// Totals of the current document, recomputed on every call.
    pub fn totals(&self) -> Totals {
        self.document.totals()
    }

    /// Append a blank taxable line and return its id with the new snapshot.
    pub fn add_item(&mut self) -> (LineItemId, QuoteSnapshot) {
        let id = self.allocate_id();
        Arc::make_mut(&mut self.document).items.push(blank_item(id.0));
        debug!(item = %id, "line item added");
        (id, self.snapshot())
    }

    /// Remove a line. The last remaining line cannot be removed.
    pub fn remove_item(&mut self, id: LineItemId) -> Result<QuoteSnapshot, QuoteError> {
        let index = self.position(id)?;
        if self.document.items.len() == 1 {
            return Err(QuoteError::LastItem);
        }
        Arc::make_mut(&mut self.document).items.remove(index);
        debug!(item = %id, "line item removed");
        Ok(self.snapshot())
    }

    /// Apply a single-field edit to a line.
    pub fn update_item(
        &mut self,
        id: LineItemId,
        update: ItemUpdate,
    ) -> Result<QuoteSnapshot, QuoteError> {
        let index = self.position(id)?;
        match &update {
            ItemUpdate::Quantity(q) => check_quantity(*q)?,
            ItemUpdate::UnitPrice(p) => check_unit_price(*p)?,
            _ => {}
        }
        debug!(item = %id, ?update, "line item updated");
        let item = &mut Arc::make_mut(&mut self.document).items[index];
        match update {
            ItemUpdate::Quantity(q) => item.quantity = q,
            ItemUpdate::Unit(u) => item.unit = u,
            ItemUpdate::Description(d) => item.description = d,
            ItemUpdate::UnitPrice(p) => item.unit_price = p,
            ItemUpdate::Taxable(t) => item.taxable = t,
        }
        Ok(self.snapshot())
    }

    /// Apply a single-field edit to the client header.
    pub fn update_client(&mut self, update: ClientUpdate) -> QuoteSnapshot {
        debug!(?update, "client header updated");
        let client = &mut Arc::make_mut(&mut self.document).client;
        match update {
            ClientUpdate::Name(v) => client.name = v,
            ClientUpdate::Location(v) => client.location = v,
            ClientUpdate::DocumentDate(d) => client.document_date = d,
            ClientUpdate::DocumentNumber(v) => client.document_number = v,
            ClientUpdate::ValidityPeriod(v) => client.validity_period = v,
            ClientUpdate::DeliveryPeriod(v) => client.delivery_period = v,
            ClientUpdate::PaymentTerms(v) => client.payment_terms = v,
        }
        self.snapshot()
    }

    /// Discard the current quote and start the next one from `sequence`.
    ///
    /// Business terms carry over; client, date and lines are reset.
    pub fn start_next(
        &mut self,
        sequence: &mut QuoteNumberSequence,
        today: NaiveDate,
    ) -> QuoteSnapshot {
        sequence.auto_advance(today);
        let previous = &self.document.client;
        let client = ClientInfo {
            document_number: sequence.next_number(),
            validity_period: previous.validity_period.clone(),
            delivery_period: previous.delivery_period.clone(),
            payment_terms: previous.payment_terms.clone(),
            ..ClientInfo::new(today)
        };
        let currency_code = self.document.currency_code.clone();
        *self = Self::with_client(client);
        Arc::make_mut(&mut self.document).currency_code = currency_code;
        debug!(number = %self.document.client.document_number, "started next quote");
        self.snapshot()
    }

    fn allocate_id(&mut self) -> LineItemId {
        let id = LineItemId(self.next_id);
        self.next_id += 1;
        id
    }

    fn position(&self, id: LineItemId) -> Result<usize, QuoteError> {
        self.document
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or(QuoteError::UnknownItem(id))
    }
}

impl Default for QuoteEditor {
    /// A fresh session dated local today.
    fn default() -> Self {
        Self::with_client(ClientInfo::default())
    }
}

fn blank_item(id: u64) -> LineItem {
    LineItemBuilder::new(Decimal::ONE, Unit::Unit, Decimal::ZERO)
        .id(id)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MAX_QUANTITY, MAX_UNIT_PRICE};
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn starts_with_one_blank_item() {
        let editor = QuoteEditor::new(today());
        let doc = editor.snapshot();
        assert_eq!(doc.items.len(), 1);
        assert_eq!(doc.items[0].quantity, Decimal::ONE);
        assert!(doc.items[0].taxable);
        assert_eq!(editor.totals().grand_total, Decimal::ZERO);
    }

    #[test]
    fn ids_are_unique_across_removals() {
        let mut editor = QuoteEditor::new(today());
        let (a, _) = editor.add_item();
        editor.remove_item(a).unwrap();
        let (b, _) = editor.add_item();
        assert_ne!(a, b);
    }

    #[test]
    fn last_item_cannot_be_removed() {
        let mut editor = QuoteEditor::new(today());
        let only = editor.snapshot().items[0].id;
        assert!(matches!(editor.remove_item(only), Err(QuoteError::LastItem)));
        assert_eq!(editor.snapshot().items.len(), 1);
    }

    #[test]
    fn unknown_item_is_rejected() {
        let mut editor = QuoteEditor::new(today());
        let missing = LineItemId(99);
        assert!(matches!(
            editor.update_item(missing, ItemUpdate::Taxable(false)),
            Err(QuoteError::UnknownItem(id)) if id == missing
        ));
    }

    #[test]
    fn snapshots_are_immutable() {
        let mut editor = QuoteEditor::new(today());
        let id = editor.snapshot().items[0].id;
        let before = editor.snapshot();
        let after = editor
            .update_item(id, ItemUpdate::UnitPrice(dec!(100)))
            .unwrap();
        assert_eq!(before.items[0].unit_price, Decimal::ZERO);
        assert_eq!(after.items[0].unit_price, dec!(100));
    }

    #[test]
    fn totals_follow_edits() {
        let mut editor = QuoteEditor::new(today());
        let id = editor.snapshot().items[0].id;
        editor.update_item(id, ItemUpdate::Quantity(dec!(2))).unwrap();
        editor.update_item(id, ItemUpdate::UnitPrice(dec!(100))).unwrap();
        assert_eq!(editor.totals().grand_total, dec!(236.00));
        editor.update_item(id, ItemUpdate::Taxable(false)).unwrap();
        assert_eq!(editor.totals().grand_total, dec!(200.00));
    }

    #[test]
    fn client_updates() {
        let mut editor = QuoteEditor::new(today());
        let doc = editor.update_client(ClientUpdate::Name("Acme".into()));
        assert_eq!(doc.client.name, "Acme");
        let doc = editor.update_client(ClientUpdate::DocumentNumber("COT-777".into()));
        assert_eq!(doc.client.document_number, "COT-777");
    }

    #[test]
    fn start_next_keeps_terms() {
        let mut editor = QuoteEditor::new(today());
        editor.update_client(ClientUpdate::Name("Acme".into()));
        editor.update_client(ClientUpdate::PaymentTerms("Net 30".into()));
        editor.add_item();

        let mut seq = QuoteNumberSequence::default().starting_at(2);
        let next_day = today().succ_opt().unwrap();
        let doc = editor.start_next(&mut seq, next_day);

        assert_eq!(doc.client.document_number, "COT-002");
        assert_eq!(doc.client.payment_terms, "Net 30");
        assert!(doc.client.name.is_empty());
        assert_eq!(doc.client.document_date, next_day);
        assert_eq!(doc.items.len(), 1);
    }

    #[test]
    fn from_document_fills_empty_items() {
        let doc = QuoteDocument {
            client: ClientInfo::new(today()),
            items: Vec::new(),
            currency_code: "PEN".into(),
        };
        let editor = QuoteEditor::from_document(doc).unwrap();
        assert_eq!(editor.snapshot().items.len(), 1);
    }

    fn document_with_ids(ids: &[u64]) -> QuoteDocument {
        QuoteDocument {
            client: ClientInfo::new(today()),
            items: ids.iter().map(|&id| blank_item(id)).collect(),
            currency_code: "PEN".into(),
        }
    }

    #[test]
    fn from_document_keeps_unique_ids() {
        let mut editor = QuoteEditor::from_document(document_with_ids(&[4, 9])).unwrap();
        let ids: Vec<_> = editor.snapshot().items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![LineItemId(4), LineItemId(9)]);
        assert_eq!(editor.add_item().0, LineItemId(10));
    }

    #[test]
    fn from_document_renumbers_duplicate_ids() {
        let mut editor = QuoteEditor::from_document(document_with_ids(&[3, 3])).unwrap();
        let (new_id, doc) = editor.add_item();
        let ids: Vec<_> = doc.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![LineItemId(1), LineItemId(2), LineItemId(3)]);
        assert_eq!(new_id, LineItemId(3));

        // Each line is individually addressable again.
        editor.remove_item(LineItemId(1)).unwrap();
        assert!(editor.snapshot().item(LineItemId(2)).is_some());
    }

    #[test]
    fn from_document_renumbers_when_ids_are_exhausted() {
        let mut editor = QuoteEditor::from_document(document_with_ids(&[u64::MAX])).unwrap();
        assert_eq!(editor.snapshot().items[0].id, LineItemId(1));
        let (a, _) = editor.add_item();
        let (b, _) = editor.add_item();
        assert_eq!((a, b), (LineItemId(2), LineItemId(3)));
    }

    #[test]
    fn from_document_rejects_out_of_range_lines() {
        let mut doc = document_with_ids(&[1]);
        doc.items[0].unit_price = Decimal::from(1_000_000_000_000_000_000u64);
        assert!(matches!(
            QuoteEditor::from_document(doc),
            Err(QuoteError::OutOfRange { field: "unit_price", .. })
        ));
    }

    #[test]
    fn huge_amounts_are_rejected_and_totals_survive() {
        let huge = Decimal::from(1_000_000_000_000_000_000u64);
        let mut editor = QuoteEditor::new(today());
        let id = editor.snapshot().items[0].id;

        assert!(matches!(
            editor.update_item(id, ItemUpdate::Quantity(huge)),
            Err(QuoteError::OutOfRange { field: "quantity", .. })
        ));
        assert!(matches!(
            editor.update_item(id, ItemUpdate::UnitPrice(huge)),
            Err(QuoteError::OutOfRange { field: "unit_price", .. })
        ));
        assert_eq!(editor.snapshot().items[0].quantity, Decimal::ONE);
        assert_eq!(editor.totals().grand_total, Decimal::ZERO);

        editor.update_item(id, ItemUpdate::Quantity(MAX_QUANTITY)).unwrap();
        editor.update_item(id, ItemUpdate::UnitPrice(-MAX_UNIT_PRICE)).unwrap();
        assert_eq!(editor.totals().subtotal, dec!(-1000000000000000000));
    }
}
