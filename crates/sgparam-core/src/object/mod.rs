mod factory;
mod trail;

pub use factory::{Constructor, FactoryBuilder, ObjectFactory};

pub(crate) use trail::Trail;

use crate::{
    error::Error,
    registry::Parameters,
    serialize::{Reader, Writer},
};
use sgparam_primitives::PrimitiveType;
use std::{any::Any, fmt, rc::Rc};
use tracing::debug;

///
/// SgObject
///
/// A reflected object: a class name, an optional generic element type, and
/// the registry of its fields. The lifecycle hooks run around save and
/// load; they default to doing nothing.
///

pub trait SgObject: Any {
    /// Class name used to reconstruct the object through a factory.
    fn name(&self) -> &str;

    /// Element type of a generic class, if the class is generic.
    fn generic(&self) -> Option<PrimitiveType> {
        None
    }

    fn parameters(&self) -> &Parameters;

    fn save_serializable_pre(&self) -> Result<(), Error> {
        Ok(())
    }

    fn save_serializable_post(&self) -> Result<(), Error> {
        Ok(())
    }

    fn load_serializable_pre(&self) -> Result<(), Error> {
        Ok(())
    }

    /// Called once all fields are loaded; rebuild derived state here.
    fn load_serializable_post(&self) -> Result<(), Error> {
        Ok(())
    }
}

/// Shared, reference-counted handle to a reflected object.
pub type ObjectRef = Rc<dyn SgObject>;

impl fmt::Debug for dyn SgObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SgObject")
            .field("class", &self.name())
            .field("generic", &self.generic())
            .finish_non_exhaustive()
    }
}

impl dyn SgObject {
    /// Address-based identity, stable for the object's lifetime.
    #[must_use]
    pub fn object_id(&self) -> usize {
        (self as *const dyn SgObject).cast::<()>().addr()
    }

    #[must_use]
    pub fn downcast_ref<T: SgObject>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref()
    }

    /// Save every field, depth first, with the lifecycle hooks around them.
    pub fn save_serializable(&self, writer: &mut dyn Writer, prefix: &str) -> Result<(), Error> {
        self.save_nested(writer, prefix, &mut Trail::default())
    }

    pub(crate) fn save_nested(
        &self,
        writer: &mut dyn Writer,
        prefix: &str,
        trail: &mut Trail,
    ) -> Result<(), Error> {
        trail.enter(self)?;
        debug!(class = self.name(), prefix, "saving object");

        self.save_serializable_pre()?;
        self.parameters().save_in(writer, prefix, trail)?;
        self.save_serializable_post()?;

        trail.leave();

        Ok(())
    }

    /// Load every field in registration order. Nested objects are rebuilt
    /// through `factory`.
    pub fn load_serializable(
        &self,
        reader: &mut dyn Reader,
        factory: &ObjectFactory,
        prefix: &str,
    ) -> Result<(), Error> {
        debug!(class = self.name(), prefix, "loading object");

        self.load_serializable_pre()?;
        self.parameters().load(reader, factory, prefix)?;
        self.load_serializable_post()?;

        debug!(class = self.name(), prefix, "loaded object");

        Ok(())
    }

    pub fn print_serializable(&self, out: &mut dyn fmt::Write, prefix: &str) -> Result<(), Error> {
        self.print_nested(out, prefix, &mut Trail::default())
    }

    pub(crate) fn print_nested(
        &self,
        out: &mut dyn fmt::Write,
        prefix: &str,
        trail: &mut Trail,
    ) -> Result<(), Error> {
        trail.enter(self)?;

        write!(out, "\n{}\n{}\n", self.name(), "=".repeat(80))?;
        self.parameters().print_in(out, prefix, trail)?;

        trail.leave();

        Ok(())
    }

    /// Compare class, generic type and every field value.
    /// Floating values match within `accuracy`.
    pub fn equals(&self, other: &dyn SgObject, accuracy: f64) -> Result<bool, Error> {
        self.equals_nested(other, accuracy, &mut Trail::default())
    }

    pub(crate) fn equals_nested(
        &self,
        other: &dyn SgObject,
        accuracy: f64,
        trail: &mut Trail,
    ) -> Result<bool, Error> {
        if self.object_id() == other.object_id() {
            return Ok(true);
        }
        if self.name() != other.name() || self.generic() != other.generic() {
            return Ok(false);
        }

        trail.enter(self)?;
        let equal = self
            .parameters()
            .equals_in(other.parameters(), accuracy, trail)?;
        trail.leave();

        Ok(equal)
    }
}
