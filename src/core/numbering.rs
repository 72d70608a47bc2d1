use chrono::{Datelike, NaiveDate};

use super::error::QuoteError;

/// Quote number sequence generator.
///
/// Generates numbers in the format `{prefix}{sequential}`, e.g. "COT-001",
/// or `{prefix}{year}-{sequential}` for yearly sequences, e.g. "COT-2024-001".
/// The first number of `QuoteNumberSequence::default()` is
/// [`DEFAULT_DOCUMENT_NUMBER`](super::DEFAULT_DOCUMENT_NUMBER).
#[derive(Debug, Clone)]
pub struct QuoteNumberSequence {
    prefix: String,
    year: Option<i32>,
    next_number: u64,
    zero_pad: usize,
}

impl QuoteNumberSequence {
    /// Create a sequence without a year component, starting at 1.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            year: None,
            next_number: 1,
            zero_pad: 3,
        }
    }

    /// Create a sequence that restarts every year, starting at 1.
    pub fn yearly(prefix: impl Into<String>, year: i32) -> Self {
        Self {
            year: Some(year),
            ..Self::new(prefix)
        }
    }

    /// Continue from a given number.
    pub fn starting_at(mut self, next_number: u64) -> Self {
        self.next_number = next_number;
        self
    }

    /// Set zero-padding width (default: 3, so "001").
    pub fn with_padding(mut self, width: usize) -> Self {
        self.zero_pad = width;
        self
    }

    /// Generate the next quote number.
    pub fn next_number(&mut self) -> String {
        let formatted = self.format(self.next_number);
        self.next_number += 1;
        formatted
    }

    /// Preview the next number without consuming it.
    pub fn peek(&self) -> String {
        self.format(self.next_number)
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// Advance a yearly sequence to a new year, resetting the counter to 1.
    pub fn advance_year(&mut self, new_year: i32) -> Result<(), QuoteError> {
        let Some(year) = self.year else {
            return Err(QuoteError::Numbering(
                "sequence has no year component".into(),
            ));
        };
        if new_year <= year {
            return Err(QuoteError::Numbering(format!(
                "new year {new_year} must be greater than current year {year}"
            )));
        }
        self.year = Some(new_year);
        self.next_number = 1;
        Ok(())
    }

    /// Auto-advance a yearly sequence if `date` falls in a later year.
    /// Returns true if the year was advanced.
    pub fn auto_advance(&mut self, date: NaiveDate) -> bool {
        match self.year {
            Some(year) if date.year() > year => {
                self.year = Some(date.year());
                self.next_number = 1;
                true
            }
            _ => false,
        }
    }

    fn format(&self, num: u64) -> String {
        match self.year {
            Some(year) => format!(
                "{}{}-{:0>width$}",
                self.prefix,
                year,
                num,
                width = self.zero_pad
            ),
            None => format!("{}{:0>width$}", self.prefix, num, width = self.zero_pad),
        }
    }
}

impl Default for QuoteNumberSequence {
    fn default() -> Self {
        Self::new("COT-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DEFAULT_DOCUMENT_NUMBER;

    #[test]
    fn default_seed_matches_constant() {
        assert_eq!(QuoteNumberSequence::default().peek(), DEFAULT_DOCUMENT_NUMBER);
    }

    #[test]
    fn sequential_numbering() {
        let mut seq = QuoteNumberSequence::new("Q-");
        assert_eq!(seq.next_number(), "Q-001");
        assert_eq!(seq.next_number(), "Q-002");
        assert_eq!(seq.peek(), "Q-003");
    }

    #[test]
    fn starting_at_with_padding() {
        let mut seq = QuoteNumberSequence::new("COT-").starting_at(42).with_padding(5);
        assert_eq!(seq.next_number(), "COT-00042");
    }

    #[test]
    fn yearly_advance() {
        let mut seq = QuoteNumberSequence::yearly("COT-", 2024);
        assert_eq!(seq.next_number(), "COT-2024-001");
        seq.advance_year(2025).unwrap();
        assert_eq!(seq.next_number(), "COT-2025-001");
        assert!(seq.advance_year(2024).is_err());
    }

    #[test]
    fn advance_requires_year() {
        let mut seq = QuoteNumberSequence::new("COT-");
        assert!(matches!(seq.advance_year(2025), Err(QuoteError::Numbering(_))));
        assert!(!seq.auto_advance(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()));
    }

    #[test]
    fn auto_advance_year() {
        let mut seq = QuoteNumberSequence::yearly("COT-", 2024);
        seq.next_number();

        let jan_2025 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(seq.auto_advance(jan_2025));
        assert_eq!(seq.next_number(), "COT-2025-001");

        // Same year doesn't advance
        let feb_2025 = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        assert!(!seq.auto_advance(feb_2025));
        assert_eq!(seq.next_number(), "COT-2025-002");
    }
}
