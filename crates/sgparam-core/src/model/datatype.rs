use crate::{
    error::Error,
    object::ObjectRef,
    value::{PrimitiveBuf, SparseRun},
};
use serde::{Deserialize, Serialize};
use sgparam_primitives::{ContainerType, PrimitiveType, StructureType};
use std::fmt;

///
/// DataType
///
/// The `(container, structure, primitive)` tag triple of one field.
///
/// Equality and ordering cover the three tags only. Lengths live with the
/// field value, so two vectors of `float64` are the same type whatever their
/// current size.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct DataType {
    container: ContainerType,
    structure: StructureType,
    primitive: PrimitiveType,
}

impl DataType {
    /// Build a type triple.
    ///
    /// Object references have no string or sparse form, so those
    /// combinations are rejected.
    pub fn new(
        container: ContainerType,
        structure: StructureType,
        primitive: PrimitiveType,
    ) -> Result<Self, Error> {
        if primitive.is_object() && structure.is_wrapped() {
            return Err(Error::datatype_unsupported(format!(
                "{primitive} values cannot be stored with {structure:?} structure"
            )));
        }

        Ok(Self::new_unchecked(container, structure, primitive))
    }

    /// Build a triple already known to be valid.
    pub(crate) const fn new_unchecked(
        container: ContainerType,
        structure: StructureType,
        primitive: PrimitiveType,
    ) -> Self {
        Self {
            container,
            structure,
            primitive,
        }
    }

    /// Build a plain scalar type; always valid.
    #[must_use]
    pub const fn scalar(primitive: PrimitiveType) -> Self {
        Self::new_unchecked(ContainerType::Scalar, StructureType::None, primitive)
    }

    #[must_use]
    pub const fn container(&self) -> ContainerType {
        self.container
    }

    #[must_use]
    pub const fn structure(&self) -> StructureType {
        self.structure
    }

    #[must_use]
    pub const fn primitive(&self) -> PrimitiveType {
        self.primitive
    }

    #[must_use]
    pub const fn is_scalar_object(&self) -> bool {
        matches!(self.container, ContainerType::Scalar)
            && matches!(self.structure, StructureType::None)
            && self.primitive.is_object()
    }

    /// Element count for the given lengths.
    /// `1` for scalars, `len_y` for vectors, `len_y * len_x` for matrices.
    #[must_use]
    pub const fn element_count(&self, len_y: usize, len_x: usize) -> usize {
        match self.container {
            ContainerType::Scalar => 1,
            ContainerType::Vector | ContainerType::SgVector => len_y,
            ContainerType::Matrix | ContainerType::SgMatrix => len_y.saturating_mul(len_x),
        }
    }

    /// Byte size of one raw primitive value, ignoring structure wrapping.
    #[must_use]
    pub const fn primitive_unit_size(&self) -> usize {
        match self.primitive.width() {
            Some(width) => width,
            None => size_of::<Option<ObjectRef>>(),
        }
    }

    /// Byte size of one storage unit for this structure and primitive.
    #[must_use]
    pub const fn storage_unit_size(&self) -> usize {
        match self.structure {
            StructureType::None => self.primitive_unit_size(),
            StructureType::String => size_of::<PrimitiveBuf>(),
            StructureType::Sparse => size_of::<SparseRun>(),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = self.container.label() {
            write!(f, "{label}<")?;
        }

        match self.structure {
            StructureType::None => write!(f, "{}", self.primitive)?,
            StructureType::String => write!(f, "String<{}>", self.primitive)?,
            StructureType::Sparse => write!(f, "Sparse<{}>", self.primitive)?,
        }

        if self.container.is_container() {
            f.write_str(">")?;
        }

        Ok(())
    }
}

///
/// TESTS
///
