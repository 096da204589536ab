mod compare;
mod handle;
mod hash;
mod load;
mod save;


pub use handle::Param;

use crate::{
    error::Error,
    model::DataType,
    object::{ObjectRef, Trail},
    serialize::Site,
    value::FieldValue,
};
use std::{cell::RefCell, fmt, rc::Rc};
use tracing::warn;

/// Shared storage of one field. Registries that expose the same field hold
/// clones of the same slot.
pub type Slot = Rc<RefCell<FieldValue>>;

///
/// Parameter
///
/// Descriptor of one reflected field: type, storage slot, name and
/// description. Cloning a descriptor shares the slot.
///

#[derive(Clone, Debug)]
pub struct Parameter {
    datatype: DataType,
    slot: Slot,
    name: String,
    description: String,
}

impl Parameter {
    /// Build a descriptor over an existing slot.
    ///
    /// The name must be non-empty ASCII letters, digits, `_` or `.`, and the
    /// slot must hold a value of `datatype`.
    pub fn new(
        datatype: DataType,
        slot: Slot,
        name: &str,
        description: &str,
    ) -> Result<Self, Error> {
        validate_name(name)?;

        let stored = slot.borrow().datatype();
        if stored != datatype {
            return Err(Error::parameter_invariant(format!(
                "parameter `{name}` declared as {datatype} but its slot holds {stored}"
            )));
        }

        Ok(Self {
            datatype,
            slot,
            name: name.to_string(),
            description: description.to_string(),
        })
    }

    /// Build a descriptor that owns fresh storage of the given extent.
    /// Used when loading data that has no live object to land in.
    pub fn allocate(
        datatype: DataType,
        name: &str,
        description: &str,
        len_y: usize,
        len_x: usize,
    ) -> Result<Self, Error> {
        let mut value = FieldValue::empty(datatype);
        value.new_cont(len_y, len_x);

        Self::new(datatype, Rc::new(RefCell::new(value)), name, description)
    }

    #[must_use]
    pub const fn datatype(&self) -> DataType {
        self.datatype
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn slot(&self) -> &Slot {
        &self.slot
    }

    /// Snapshot of the current value.
    #[must_use]
    pub fn value(&self) -> FieldValue {
        self.slot.borrow().clone()
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.slot.borrow().element_count()
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.slot.borrow().is_valid()
    }

    pub fn new_cont(&self, len_y: usize, len_x: usize) {
        self.slot.borrow_mut().new_cont(len_y, len_x);
    }

    pub fn delete_cont(&self) {
        self.slot.borrow_mut().delete_cont();
    }

    /// Render this field: description, name and type, then the nested
    /// object's own fields for a set scalar object reference.
    pub fn print(&self, out: &mut dyn fmt::Write, prefix: &str) -> Result<(), Error> {
        self.print_in(out, prefix, &mut Trail::default())
    }

    pub(crate) fn print_in(
        &self,
        out: &mut dyn fmt::Write,
        prefix: &str,
        trail: &mut Trail,
    ) -> Result<(), Error> {
        let description = if self.description.is_empty() {
            "(Parameter)"
        } else {
            self.description.as_str()
        };
        write!(
            out,
            "\n{prefix}\n{description:>35} {:>24} :{}\n",
            self.name, self.datatype
        )?;

        if self.datatype.is_scalar_object()
            && let Some(object) = self.scalar_object()
        {
            object.print_nested(out, &self.nested_prefix(prefix), trail)?;
        }

        Ok(())
    }

    pub(crate) fn site<'a>(&'a self, prefix: &'a str) -> Site<'a> {
        Site {
            datatype: self.datatype,
            name: self.name.as_str(),
            prefix,
        }
    }

    /// `prefix + name + "/"`, the prefix handed to a nested object.
    pub(crate) fn nested_prefix(&self, prefix: &str) -> String {
        format!("{prefix}{}/", self.name)
    }

    fn scalar_object(&self) -> Option<ObjectRef> {
        let value = self.slot.borrow();

        value
            .data()
            .and_then(|units| units.as_plain())
            .and_then(|buf| buf.object_at(0))
            .and_then(Clone::clone)
    }

    /// Lengths that can be walked without reading past the data.
    ///
    /// Released data with non-zero lengths, or data shorter than the
    /// lengths claim, is logged and treated as empty.
    pub(crate) fn checked_extent(&self, value: &FieldValue) -> (usize, usize) {
        let container = self.datatype.container();
        let (len_y, len_x) = value.lengths();
        let len_x = if container.is_vector() { 1 } else { len_x };
        let count = self.datatype.element_count(len_y, len_x);

        match value.data() {
            None if count != 0 => {
                warn!(
                    parameter = %self.name,
                    len_y,
                    len_x,
                    "data is released but lengths are non-zero, treating as empty"
                );
                (0, 0)
            }
            Some(units) if units.len() < count => {
                warn!(
                    parameter = %self.name,
                    len_y,
                    len_x,
                    units = units.len(),
                    "data is shorter than its lengths, treating as empty"
                );
                (0, 0)
            }
            _ => (len_y, len_x),
        }
    }
}

/// Check a parameter name: non-empty ASCII letters, digits, `_` or `.`.
pub(crate) fn validate_name(name: &str) -> Result<(), Error> {
    if name.is_empty() {
        return Err(Error::parameter_invariant("parameter name must not be empty"));
    }

    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '.'))
    {
        return Err(Error::parameter_invariant(format!(
            "parameter name `{name}` contains illegal character {c:?}"
        )));
    }

    Ok(())
}
