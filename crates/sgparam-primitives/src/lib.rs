//! Closed tag enumerations shared by every sgparam layer.
//!
//! A reflected field is described by exactly one tag from each of the three
//! enumerations here. The crate carries no runtime values; element storage
//! and the descriptors built from these tags live in `sgparam-core`.

#[macro_use]
mod macros;

use serde::{Deserialize, Serialize};
use std::fmt;

///
/// PrimitiveType
///
/// Base element kind of a field.
/// `SgObject` elements are shared references to other reflected objects.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum PrimitiveType {
    Bool,
    Char,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    FloatMax,
    Complex128,
    SgObject,
}

impl PrimitiveType {
    /// Return the full metadata descriptor for one primitive type.
    #[must_use]
    pub const fn metadata(self) -> PrimitiveMetadata {
        primitive_type_registry!(metadata_from_registry, self)
    }

    /// Return the rendering used in type strings, e.g. `float64`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.metadata().label
    }

    /// Return the byte width of one raw value.
    /// `None` for `SgObject`, whose slot size depends on the object handle.
    #[must_use]
    pub const fn width(self) -> Option<usize> {
        self.metadata().width
    }

    #[must_use]
    pub const fn family(self) -> PrimitiveFamily {
        self.metadata().family
    }

    #[must_use]
    pub const fn is_object(self) -> bool {
        matches!(self, Self::SgObject)
    }

    /// Return whether values of this type compare with a tolerance.
    #[must_use]
    pub const fn is_inexact(self) -> bool {
        matches!(
            self.family(),
            PrimitiveFamily::Float | PrimitiveFamily::Complex
        )
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

///
/// PrimitiveMetadata
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PrimitiveMetadata {
    pub family: PrimitiveFamily,
    pub label: &'static str,
    pub width: Option<usize>,
}

///
/// PrimitiveFamily
///
/// Coarse grouping used when comparing and printing values.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PrimitiveFamily {
    Bool,
    Char,
    Integer,
    Float,
    Complex,
    Object,
}

/// Ordered list of all primitive types in registry order.
pub const ALL_PRIMITIVE_TYPES: [PrimitiveType; 15] =
    primitive_type_registry!(all_types_from_registry);

///
/// StructureType
///
/// How each storage unit wraps its primitive values.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum StructureType {
    /// One raw primitive value.
    None,
    /// A length-prefixed run of primitive values.
    String,
    /// A vector index plus `(feature index, value)` entries.
    Sparse,
}

impl StructureType {
    pub const ALL: [Self; 3] = [Self::None, Self::String, Self::Sparse];

    #[must_use]
    pub const fn is_wrapped(self) -> bool {
        !matches!(self, Self::None)
    }
}

///
/// ContainerType
///
/// Container shape of a field. `SgVector`/`SgMatrix` carry their lengths in
/// the same record as the data; `Vector`/`Matrix` were registered from a
/// buffer plus separate length values.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum ContainerType {
    Scalar,
    Vector,
    Matrix,
    SgVector,
    SgMatrix,
}

impl ContainerType {
    pub const ALL: [Self; 5] = [
        Self::Scalar,
        Self::Vector,
        Self::Matrix,
        Self::SgVector,
        Self::SgMatrix,
    ];

    /// Return whether the shape owns a buffer of storage units.
    #[must_use]
    pub const fn is_container(self) -> bool {
        !matches!(self, Self::Scalar)
    }

    #[must_use]
    pub const fn is_vector(self) -> bool {
        matches!(self, Self::Vector | Self::SgVector)
    }

    #[must_use]
    pub const fn is_matrix(self) -> bool {
        matches!(self, Self::Matrix | Self::SgMatrix)
    }

    /// Return the opening label used in type strings, if any.
    #[must_use]
    pub const fn label(self) -> Option<&'static str> {
        match self {
            Self::Scalar => None,
            Self::Vector => Some("Vector"),
            Self::Matrix => Some("Matrix"),
            Self::SgVector => Some("SGVector"),
            Self::SgMatrix => Some("SGMatrix"),
        }
    }
}

///
/// TESTS
///
