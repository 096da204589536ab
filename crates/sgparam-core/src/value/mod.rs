//! Runtime storage for reflected fields.
//!
//! A field's value is a [`FieldValue`]: tags, lengths and a run of storage
//! [`Units`]. Every generic operation over the fifteen primitive kinds is one
//! exhaustive match inside [`PrimitiveBuf`], generated from a single
//! registry so that adding an operation touches one place.

#[macro_use]
mod macros;
mod element;
mod field;
mod primitive;
mod units;

pub use element::{Element, FieldType};
pub use field::FieldValue;
pub use primitive::{Primitive, PrimitiveBuf, Scalar};
pub use units::{SparseRun, Units};
