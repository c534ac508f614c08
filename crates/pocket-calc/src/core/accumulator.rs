//! Input accumulator: the value being typed or the last result

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::trace;

use crate::core::CalcError;

/// A single entry token: one decimal digit or the decimal point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputToken {
    /// A digit 0-9
    Digit(u8),
    /// The decimal point
    Point,
}

impl InputToken {
    /// Returns the character this token appends
    #[must_use]
    pub fn to_char(self) -> Option<char> {
        match self {
            Self::Digit(d) => char::from_digit(u32::from(d), 10),
            Self::Point => Some('.'),
        }
    }
}

impl TryFrom<char> for InputToken {
    type Error = CalcError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '.' => Ok(Self::Point),
            '0'..='9' => Ok(Self::Digit(c as u8 - b'0')),
            other => Err(CalcError::InvalidToken(other.to_string())),
        }
    }
}

impl FromStr for InputToken {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::try_from(c),
            _ => Err(CalcError::InvalidToken(s.to_string())),
        }
    }
}

/// Exact decimal accumulator with digit-by-digit entry.
///
/// A trailing decimal point has no decimal value of its own, so it is kept
/// as a flag until the next digit arrives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accumulator {
    value: Decimal,
    point_pending: bool,
}

impl Accumulator {
    /// Creates a zeroed accumulator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current value
    #[must_use]
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Replaces the value, dropping any pending decimal point
    pub fn set(&mut self, value: Decimal) {
        self.value = value;
        self.point_pending = false;
    }

    /// Resets to zero
    pub fn reset(&mut self) {
        self.set(Decimal::ZERO);
    }

    /// Plain-text form used for entry, including a trailing point if one
    /// was typed
    #[must_use]
    pub fn entry_text(&self) -> String {
        let mut text = self.value.to_string();
        if self.point_pending {
            text.push('.');
        }
        text
    }

    /// Appends a digit or the decimal point.
    ///
    /// A point is ignored when the text already has one. A digit replaces a
    /// lone "0" and is otherwise appended; digits beyond the precision of
    /// [`Decimal`] are ignored.
    pub fn input(&mut self, token: InputToken) {
        let current = self.entry_text();

        let Some(ch) = token.to_char() else {
            trace!(?token, "ignoring out-of-range digit");
            return;
        };

        if token == InputToken::Point {
            if current.contains('.') {
                trace!(%current, "decimal point already present");
            } else {
                self.point_pending = true;
            }
            return;
        }

        let candidate = if current == "0" {
            ch.to_string()
        } else {
            format!("{current}{ch}")
        };

        match Decimal::from_str_exact(&candidate) {
            Ok(value) => self.set(value),
            Err(err) => trace!(%candidate, %err, "digit exceeds decimal precision"),
        }
    }

    /// Display text: trailing fractional zeros stripped, plain notation
    #[must_use]
    pub fn display(&self) -> String {
        self.value.normalize().to_string()
    }
}

impl From<Decimal> for Accumulator {
    fn from(value: Decimal) -> Self {
        Self {
            value,
            point_pending: false,
        }
    }
}
