mod collection;

pub use collection::*;

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

///
/// Char
///
/// One byte of text. Distinct from `u8` so that a `char` field and a
/// `uint8` field never share a type tag.
///

#[repr(transparent)]
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[display("{}", char::from(*_0))]
pub struct Char(pub u8);

impl Char {
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

///
/// FloatMax
///
/// Widest float the engine stores. Kept apart from `f64` at the type-tag
/// level; the payload is an `f64`.
///

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, Deserialize, Display, From, PartialEq, PartialOrd, Serialize)]
pub struct FloatMax(pub f64);

impl FloatMax {
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

///
/// Complex128
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, PartialEq, Serialize)]
#[display("({re}+{im}i)")]
pub struct Complex128 {
    pub re: f64,
    pub im: f64,
}

impl Complex128 {
    #[must_use]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Euclidean distance between two complex values.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.re - other.re).hypot(self.im - other.im)
    }
}

impl From<f64> for Complex128 {
    fn from(re: f64) -> Self {
        Self { re, im: 0.0 }
    }
}

/// Text helper used by tests and model code.
impl From<&str> for SgString<Char> {
    fn from(s: &str) -> Self {
        Self(s.bytes().map(Char).collect())
    }
}

impl SgString<Char> {
    /// Lossy text view of a char string.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.0.iter().map(|c| char::from(c.0)).collect()
    }
}
