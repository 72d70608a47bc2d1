//! # quotekit
//!
//! Core of a single-page quote builder: the document model, a decimal
//! pricing engine, and the export/share flow that turns a quote into a PDF
//! and delivers it.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use quotekit::core::*;
//! use rust_decimal_macros::dec;
//!
//! let mut editor = QuoteEditor::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
//! editor.update_client(ClientUpdate::Name("Constructora Andina SAC".into()));
//!
//! let first = editor.snapshot().items[0].id;
//! editor.update_item(first, ItemUpdate::Quantity(dec!(3))).unwrap();
//! editor.update_item(first, ItemUpdate::UnitPrice(dec!(50))).unwrap();
//!
//! let (second, _) = editor.add_item();
//! editor.update_item(second, ItemUpdate::UnitPrice(dec!(20))).unwrap();
//! editor.update_item(second, ItemUpdate::Taxable(false)).unwrap();
//!
//! let totals = editor.totals();
//! assert_eq!(totals.subtotal, dec!(170.00));
//! assert_eq!(totals.tax_amount, dec!(27.00));
//! assert_eq!(totals.grand_total, dec!(197.00));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Quote types, pricing, editor, numbering, validation |
//! | `export` | Export/share orchestrator and host collaborator traits |
//! | `pdf` | Built-in `lopdf` renderer for the export flow |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "export")]
pub mod export;

#[cfg(feature = "pdf")]
pub mod pdf;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
