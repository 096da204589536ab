use crate::{
    object::ObjectRef,
    types::{Char, Complex128, FloatMax},
};
use serde::{Deserialize, Serialize};
use sgparam_primitives::PrimitiveType;
use std::fmt::Debug;

///
/// Primitive
///
/// Rust type that stores one raw primitive kind. Implemented for the
/// fourteen data-carrying kinds; object references go through
/// [`Element`](super::Element) directly.
///

pub trait Primitive: Copy + Debug + Default + PartialEq + 'static {
    const TYPE: PrimitiveType;

    fn into_scalar(self) -> Scalar;

    fn from_scalar(value: Scalar) -> Option<Self>;

    fn buf(values: Vec<Self>) -> PrimitiveBuf;

    fn slice(buf: &PrimitiveBuf) -> Option<&[Self]>;
}

primitive_value_registry!(define_primitive_values);

impl Scalar {
    /// Compare two values, with an absolute tolerance for inexact kinds.
    /// Values of different kinds never match.
    #[must_use]
    pub fn close_to(self, other: Self, accuracy: f64) -> bool {
        match (self, other) {
            (Self::Float32(a), Self::Float32(b)) => f64::from((a - b).abs()) <= accuracy,
            (Self::Float64(a), Self::Float64(b)) => (a - b).abs() <= accuracy,
            (Self::FloatMax(a), Self::FloatMax(b)) => (a.0 - b.0).abs() <= accuracy,
            (Self::Complex128(a), Self::Complex128(b)) => a.distance(b) <= accuracy,
            (a, b) => a == b,
        }
    }
}

impl PrimitiveBuf {
    #[must_use]
    pub fn object_at(&self, index: usize) -> Option<&Option<ObjectRef>> {
        match self {
            Self::SgObject(values) => values.get(index),
            _ => None,
        }
    }

    /// Store one object reference and hand back what the slot held.
    /// `None` when this is not an object run or `index` is out of range.
    pub fn replace_object(
        &mut self,
        index: usize,
        object: Option<ObjectRef>,
    ) -> Option<Option<ObjectRef>> {
        match self {
            Self::SgObject(values) => values
                .get_mut(index)
                .map(|slot| std::mem::replace(slot, object)),
            _ => None,
        }
    }
}

fn complex_le_bytes(value: Complex128) -> [u8; 16] {
    let mut out = [0u8; 16];
    out[..8].copy_from_slice(&value.re.to_le_bytes());
    out[8..].copy_from_slice(&value.im.to_le_bytes());

    out
}

///
/// TESTS
///
