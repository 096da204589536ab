//! Core runtime for sgparam: field descriptors, per-object registries, the
//! object model and factory, hashing, and the serializer protocol.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod error;
pub mod hash;
pub mod model;
pub mod object;
pub mod param;
pub mod registry;
pub mod serialize;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains only the vocabulary model code needs to declare and
/// register its fields. Serializers, factories and errors stay in their
/// modules.
///

pub mod prelude {
    pub use crate::{
        model::DataType,
        object::{ObjectRef, SgObject},
        param::Param,
        registry::Parameters,
        types::{
            Char, Complex128, FloatMax, SgMatrix, SgSparseVector, SgString, SgVector, SparseEntry,
        },
    };
    pub use sgparam_primitives::{ContainerType, PrimitiveType, StructureType};
}
