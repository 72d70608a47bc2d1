//! Core quote types, pricing, and the editing controller.
//!
//! This module holds everything that is pure: the document aggregate, the
//! pricing engine, numbering, and advisory validation. Nothing here performs
//! I/O.

mod builder;
mod editor;
mod error;
mod numbering;
mod pricing;
mod types;
pub mod units;
mod validation;

pub use builder::*;
pub use editor::*;
pub use error::*;
pub use numbering::*;
pub use pricing::*;
pub use types::*;
pub use units::Unit;
pub use validation::*;
