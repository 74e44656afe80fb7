//! Bounded PIN entry buffer
//!
//! Holds the digits typed on the keypad. The buffer caps at [`MAX_PIN_LEN`]
//! digits and becomes submittable at [`MIN_SUBMIT_LEN`]; whether the PIN is
//! correct is decided by the alarm system, never here.

use std::fmt;

/// Maximum number of digits the buffer holds.
pub const MAX_PIN_LEN: usize = 8;

/// Minimum number of digits before the buffer can be submitted.
pub const MIN_SUBMIT_LEN: usize = 6;

/// A single decimal digit (0-9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digit(u8);

impl Digit {
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).and_then(|d| Self::new(d as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

/// Digits entered so far, 0 to [`MAX_PIN_LEN`] long.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PinBuffer {
    digits: Vec<Digit>,
}

// Never print the digits themselves.
impl fmt::Debug for PinBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinBuffer")
            .field("len", &self.digits.len())
            .finish()
    }
}

impl PinBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one digit. Returns `false` (and leaves the buffer unchanged)
    /// when the buffer is already full.
    pub fn append(&mut self, digit: Digit) -> bool {
        if self.is_full() {
            return false;
        }
        self.digits.push(digit);
        true
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.digits.len() >= MAX_PIN_LEN
    }

    /// `true` iff the buffer holds between [`MIN_SUBMIT_LEN`] and
    /// [`MAX_PIN_LEN`] digits.
    pub fn is_submit_eligible(&self) -> bool {
        self.digits.len() >= MIN_SUBMIT_LEN
    }

    /// The buffer contents verbatim, or `None` if not yet eligible.
    ///
    /// Does not clear the buffer; the caller resets it once the disarm
    /// command has been issued.
    pub fn submit(&self) -> Option<String> {
        self.is_submit_eligible()
            .then(|| self.digits.iter().map(|d| d.as_char()).collect())
    }
}
