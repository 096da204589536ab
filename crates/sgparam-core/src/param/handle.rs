use crate::{
    param::Slot,
    value::{FieldType, FieldValue},
};
use std::{fmt, marker::PhantomData, mem, rc::Rc};

///
/// Param
///
/// Typed handle to a registered field. The owning object keeps it as the
/// field itself; the registry holds the same slot.
///

pub struct Param<T> {
    slot: Slot,
    marker: PhantomData<fn() -> T>,
}

impl<T: FieldType> Param<T> {
    pub(crate) const fn new(slot: Slot) -> Self {
        Self {
            slot,
            marker: PhantomData,
        }
    }

    /// Current value, or `None` when the stored lengths do not describe the
    /// stored data.
    #[must_use]
    pub fn get(&self) -> Option<T> {
        self.slot.borrow().to_field()
    }

    /// Replace the value; the container tag the field was registered with
    /// is kept.
    pub fn set(&self, value: T) {
        let datatype = self.slot.borrow().datatype();
        let next = FieldValue::from_field(datatype, value);

        // drop the previous value only after the borrow ends
        let previous = mem::replace(&mut *self.slot.borrow_mut(), next);
        drop(previous);
    }

    #[must_use]
    pub fn lengths(&self) -> (usize, usize) {
        self.slot.borrow().lengths()
    }

    /// Overwrite the length fields only, leaving the data as it is.
    pub fn set_lengths(&self, len_y: usize, len_x: usize) {
        self.slot.borrow_mut().set_lengths(len_y, len_x);
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

    #[must_use]
    pub const fn slot(&self) -> &Slot {
        &self.slot
    }
}

impl<T> Clone for Param<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
            marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Param<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Param").field(&self.slot).finish()
    }
}
