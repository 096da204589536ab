use crate::{
    error::Error,
    object::{ObjectRef, Trail},
    param::Parameter,
    value::{FieldValue, PrimitiveBuf, Units},
};
use std::{mem, rc::Rc};
use tracing::debug;

impl Parameter {
    /// Compare name, type and value with `other`.
    ///
    /// Floating and complex values match within `accuracy`. Nested objects
    /// are compared through their own fields.
    pub fn equals(&self, other: &Self, accuracy: f64) -> Result<bool, Error> {
        self.equals_in(other, accuracy, &mut Trail::default())
    }

    pub(crate) fn equals_in(
        &self,
        other: &Self,
        accuracy: f64,
        trail: &mut Trail,
    ) -> Result<bool, Error> {
        if self.name != other.name || self.datatype != other.datatype {
            debug!(left = %self.name, right = %other.name, "parameter name or type differs");
            return Ok(false);
        }
        if Rc::ptr_eq(&self.slot, &other.slot) {
            return Ok(true);
        }

        let objects = {
            let left = self.slot.borrow();
            let right = other.slot.borrow();

            let extent = self.compare_extent(&left);
            if extent != other.compare_extent(&right) {
                debug!(parameter = %self.name, "parameter extents differ");
                return Ok(false);
            }
            let count = self.datatype.element_count(extent.0, extent.1);
            if count == 0 {
                return Ok(true);
            }

            match (left.data(), right.data()) {
                (
                    Some(Units::Plain(PrimitiveBuf::SgObject(a))),
                    Some(Units::Plain(PrimitiveBuf::SgObject(b))),
                ) => {
                    // compared below, once the slots are no longer borrowed
                    a.iter()
                        .cloned()
                        .zip(b.iter().cloned())
                        .take(count)
                        .collect::<Vec<(Option<ObjectRef>, Option<ObjectRef>)>>()
                }
                (Some(a), Some(b)) => return Ok(units_close(a, b, count, accuracy)),
                _ => return Ok(false),
            }
        };

        for pair in objects {
            let equal = match pair {
                (None, None) => true,
                (Some(a), Some(b)) => a.equals_nested(&*b, accuracy, trail)?,
                _ => false,
            };
            if !equal {
                debug!(parameter = %self.name, "nested objects differ");
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Deep-copy the value of a same-typed descriptor into this one.
    /// Object references are shared, not cloned.
    pub fn copy_data(&self, source: &Self) -> Result<(), Error> {
        if self.datatype != source.datatype {
            return Err(Error::parameter_invariant(format!(
                "cannot copy {} parameter `{}` into {} parameter `{}`",
                source.datatype, source.name, self.datatype, self.name
            )));
        }
        if Rc::ptr_eq(&self.slot, &source.slot) {
            return Ok(());
        }

        let value = source.slot.borrow().clone();
        let previous = mem::replace(&mut *self.slot.borrow_mut(), value);
        drop(previous);

        Ok(())
    }

    fn compare_extent(&self, value: &FieldValue) -> (usize, usize) {
        if self.datatype.container().is_container() {
            self.checked_extent(value)
        } else {
            (1, 1)
        }
    }
}

fn units_close(a: &Units, b: &Units, count: usize, accuracy: f64) -> bool {
    (0..count).all(|i| match (a, b) {
        (Units::Plain(x), Units::Plain(y)) => values_close(x, y, i, i + 1, accuracy),
        (Units::Strings(_), Units::Strings(_)) => match (a.string_at(i), b.string_at(i)) {
            (Some(x), Some(y)) => x.len() == y.len() && values_close(x, y, 0, x.len(), accuracy),
            _ => false,
        },
        (Units::Sparse(_), Units::Sparse(_)) => match (a.sparse_at(i), b.sparse_at(i)) {
            (Some(x), Some(y)) => {
                x.vec_index == y.vec_index
                    && x.len() == y.len()
                    && x.feat_index[..x.len()] == y.feat_index[..y.len()]
                    && values_close(&x.values, &y.values, 0, x.len(), accuracy)
            }
            _ => false,
        },
        _ => false,
    })
}

fn values_close(a: &PrimitiveBuf, b: &PrimitiveBuf, from: usize, to: usize, accuracy: f64) -> bool {
    (from..to).all(|i| match (a.scalar_at(i), b.scalar_at(i)) {
        (Some(x), Some(y)) => x.close_to(y, accuracy),
        _ => false,
    })
}
