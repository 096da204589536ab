//! ## Crate layout
//! - `core`: field descriptors, registries, the object model and factory,
//!   hashing, and the serializer protocol with its token-stream backend.
//! - `primitives`: the container, structure and primitive tag enums.
//!
//! Model code usually only needs `prelude`; serializers and factories are
//! reached through `core::serialize` and `core::object`.

pub use sgparam_core as core;
pub use sgparam_primitives as primitives;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use crate::core::{
    error::{Error, ErrorClass, ErrorOrigin},
    object::{FactoryBuilder, ObjectFactory},
    param::Parameter,
};

///
/// Prelude
/// what a reflected model needs to declare, register and expose its fields
///

pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::{Error, FactoryBuilder, ObjectFactory};
}
