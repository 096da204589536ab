//! Per-object field registry.
//!
//! An object registers each reflected field once, at construction, and
//! keeps the returned [`Param`] handle. Generic infrastructure then walks
//! the registry in registration order to print, hash, save, load, compare
//! and copy fields without knowing their concrete types.

#[cfg(test)]
mod tests;

use crate::{
    error::Error,
    hash::MurmurState,
    model::DataType,
    object::{ObjectFactory, Trail},
    param::{Param, Parameter, Slot},
    serialize::{Reader, Writer},
    types::{SgMatrix, SgVector},
    value::{Element, FieldType, FieldValue},
};
use sgparam_primitives::ContainerType;
use std::{cell::RefCell, fmt, rc::Rc};

///
/// Parameters
///
/// Ordered collection of field descriptors owned by one object.
/// Names are unique within one registry.
///

#[derive(Clone, Debug, Default)]
pub struct Parameters {
    params: Vec<Parameter>,
}

impl Parameters {
    #[must_use]
    pub const fn new() -> Self {
        Self { params: Vec::new() }
    }

    // ---- registration ----

    /// Register a scalar, an `SgVector` or an `SgMatrix` field.
    pub fn add<T: FieldType>(
        &mut self,
        name: &str,
        value: T,
        description: &str,
    ) -> Result<Param<T>, Error> {
        self.add_with_container(T::CONTAINER, name, value, description)
    }

    /// Register a vector field whose length is kept next to the data.
    pub fn add_vector<E: Element>(
        &mut self,
        name: &str,
        values: Vec<E>,
        description: &str,
    ) -> Result<Param<SgVector<E>>, Error> {
        self.add_with_container(ContainerType::Vector, name, SgVector(values), description)
    }

    /// Register a column-major matrix field whose shape is kept next to the
    /// data. Fails when `values.len() != rows * cols`.
    pub fn add_matrix<E: Element>(
        &mut self,
        name: &str,
        rows: usize,
        cols: usize,
        values: Vec<E>,
        description: &str,
    ) -> Result<Param<SgMatrix<E>>, Error> {
        let len = values.len();
        let matrix = SgMatrix::new(rows, cols, values).ok_or_else(|| {
            Error::registry_invariant(format!(
                "matrix `{name}` declared as {rows}x{cols} but holds {len} elements"
            ))
        })?;

        self.add_with_container(ContainerType::Matrix, name, matrix, description)
    }

    /// Single insertion point: validates the name, rejects duplicates and
    /// appends the descriptor.
    pub fn add_type(
        &mut self,
        datatype: DataType,
        slot: Slot,
        name: &str,
        description: &str,
    ) -> Result<(), Error> {
        let param = Parameter::new(datatype, slot, name, description)?;
        self.push(param)
    }

    fn add_with_container<T: FieldType>(
        &mut self,
        container: ContainerType,
        name: &str,
        value: T,
        description: &str,
    ) -> Result<Param<T>, Error> {
        let datatype = DataType::new(container, T::Elem::STRUCTURE, T::Elem::PRIMITIVE)?;
        let slot = Rc::new(RefCell::new(FieldValue::from_field(datatype, value)));

        self.add_type(datatype, Rc::clone(&slot), name, description)?;

        Ok(Param::new(slot))
    }

    fn push(&mut self, param: Parameter) -> Result<(), Error> {
        if self.contains_parameter(param.name()) {
            return Err(Error::registry_invariant(format!(
                "double parameter `{}`",
                param.name()
            )));
        }
        self.params.push(param);

        Ok(())
    }

    // ---- lookup ----

    #[must_use]
    pub fn get_parameter(&self, index: usize) -> Option<&Parameter> {
        self.params.get(index)
    }

    #[must_use]
    pub fn get_parameter_by_name(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|p| p.name() == name)
    }

    #[must_use]
    pub fn contains_parameter(&self, name: &str) -> bool {
        self.get_parameter_by_name(name).is_some()
    }

    #[must_use]
    pub const fn num_parameters(&self) -> usize {
        self.params.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter()
    }

    // ---- bulk operations ----

    /// Push the values of `other` into the same-named fields of `self`.
    ///
    /// Every field of `other` must exist here with the same type; all fields
    /// are checked before any value is copied.
    pub fn set_from_parameters(&self, other: &Self) -> Result<(), Error> {
        let mut pairs = Vec::with_capacity(other.params.len());

        for source in &other.params {
            let Some(target) = self.get_parameter_by_name(source.name()) else {
                return Err(Error::registry_not_found(format!(
                    "cannot find parameter `{}` to copy into",
                    source.name()
                )));
            };
            if target.datatype() != source.datatype() {
                return Err(Error::registry_invariant(format!(
                    "type mismatch for parameter `{}`: {} here, {} in source",
                    source.name(),
                    target.datatype(),
                    source.datatype()
                )));
            }
            pairs.push((target, source));
        }

        for (target, source) in pairs {
            target.copy_data(source)?;
        }

        Ok(())
    }

    /// Expose every field of `other` here as well. The fields share storage
    /// with `other`; names must not clash.
    pub fn add_parameters(&mut self, other: &Self) -> Result<(), Error> {
        for param in &other.params {
            self.push(param.clone())?;
        }

        Ok(())
    }

    pub fn print(&self, out: &mut dyn fmt::Write, prefix: &str) -> Result<(), Error> {
        self.print_in(out, prefix, &mut Trail::default())
    }

    pub(crate) fn print_in(
        &self,
        out: &mut dyn fmt::Write,
        prefix: &str,
        trail: &mut Trail,
    ) -> Result<(), Error> {
        for param in &self.params {
            param.print_in(out, prefix, trail)?;
        }

        Ok(())
    }

    /// Save every field in registration order, stopping at the first error.
    pub fn save(&self, writer: &mut dyn Writer, prefix: &str) -> Result<(), Error> {
        self.save_in(writer, prefix, &mut Trail::default())
    }

    pub(crate) fn save_in(
        &self,
        writer: &mut dyn Writer,
        prefix: &str,
        trail: &mut Trail,
    ) -> Result<(), Error> {
        for param in &self.params {
            param.save_in(writer, prefix, trail)?;
        }

        Ok(())
    }

    /// Load every field in registration order, stopping at the first error.
    pub fn load(
        &self,
        reader: &mut dyn Reader,
        factory: &ObjectFactory,
        prefix: &str,
    ) -> Result<(), Error> {
        for param in &self.params {
            param.load(reader, factory, prefix)?;
        }

        Ok(())
    }

    /// Feed every field into `state`, in registration order.
    pub fn incremental_hash(&self, state: &mut MurmurState) -> Result<(), Error> {
        for param in &self.params {
            param.incremental_hash(state)?;
        }

        Ok(())
    }

    /// Finalized hash of all fields.
    pub fn hash(&self) -> Result<u32, Error> {
        let mut state = MurmurState::default();
        self.incremental_hash(&mut state)?;

        Ok(state.finish())
    }

    /// Compare two registries field by field, in order.
    pub fn equals(&self, other: &Self, accuracy: f64) -> Result<bool, Error> {
        self.equals_in(other, accuracy, &mut Trail::default())
    }

    pub(crate) fn equals_in(
        &self,
        other: &Self,
        accuracy: f64,
        trail: &mut Trail,
    ) -> Result<bool, Error> {
        if self.params.len() != other.params.len() {
            return Ok(false);
        }

        for (a, b) in self.params.iter().zip(&other.params) {
            if !a.equals_in(b, accuracy, trail)? {
                return Ok(false);
            }
        }

        Ok(true)
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}
