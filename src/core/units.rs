//! Units of measure offered on a quote line.
//!
//! The set is fixed and small. Each unit carries the short label printed on
//! the document and its UN/CEFACT Recommendation 20 code, so quotes can be
//! mapped onto e-invoicing formats later without a lookup table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::QuoteError;

/// Unit of measure for a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Unit {
    /// m², area.
    SquareMetre,
    /// ml, linear metre.
    LinearMetre,
    /// pza, piece.
    Piece,
    /// glb, lot or lump sum.
    Lot,
    /// und, generic unit.
    #[default]
    Unit,
}

impl Unit {
    /// All units, in the order they are offered to the user.
    pub const ALL: [Unit; 5] = [
        Unit::SquareMetre,
        Unit::LinearMetre,
        Unit::Piece,
        Unit::Lot,
        Unit::Unit,
    ];

    /// Short label printed on the document.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SquareMetre => "m²",
            Self::LinearMetre => "ml",
            Self::Piece => "pza",
            Self::Lot => "glb",
            Self::Unit => "und",
        }
    }

    /// UN/CEFACT Rec 20 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SquareMetre => "MTK",
            Self::LinearMetre => "LM",
            Self::Piece => "H87",
            Self::Lot => "LS",
            Self::Unit => "C62",
        }
    }

    /// Parse from either the document label or the Rec 20 code.
    pub fn from_label_or_code(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|u| u.label().eq_ignore_ascii_case(value) || u.code() == value)
            .or(match value {
                "m2" | "M2" => Some(Self::SquareMetre),
                _ => None,
            })
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Unit {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label_or_code(s).ok_or_else(|| QuoteError::UnknownUnit(s.to_string()))
    }
}
