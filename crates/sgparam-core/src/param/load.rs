use crate::{
    error::Error,
    object::{ObjectFactory, ObjectRef},
    param::Parameter,
    serialize::{Reader, Site},
    value::{PrimitiveBuf, Scalar, SparseRun, Units},
};
use sgparam_primitives::{PrimitiveType, StructureType};
use tracing::{debug, warn};

impl Parameter {
    /// Read this field back through `reader`.
    ///
    /// Container storage is reallocated to the lengths found in the stream.
    /// Nested objects are constructed through `factory`. On failure the
    /// field may be partially loaded.
    pub fn load(
        &self,
        reader: &mut dyn Reader,
        factory: &ObjectFactory,
        prefix: &str,
    ) -> Result<(), Error> {
        let site = self.site(prefix);
        debug!(parameter = %site.path(), datatype = %self.datatype, "loading parameter");

        reader.read_type_begin(site)?;

        if self.datatype.container().is_container() {
            let (len_y, len_x) = reader.read_cont_begin(site)?;
            let len_x = if self.datatype.container().is_vector() {
                1
            } else {
                len_x
            };
            self.checked_stream_len(&*reader, site, len_y.checked_mul(len_x))?;
            self.new_cont(len_y, len_x);

            for x in 0..len_x {
                for y in 0..len_y {
                    reader.read_item_begin(site, y, x)?;
                    self.load_unit(reader, factory, site, x * len_y + y)?;
                    reader.read_item_end(site, y, x)?;
                }
            }
            reader.read_cont_end(site, len_y, len_x)?;
        } else {
            self.load_unit(reader, factory, site, 0)?;
        }

        reader.read_type_end(site)?;

        Ok(())
    }

    /// Structure step: one storage unit.
    fn load_unit(
        &self,
        reader: &mut dyn Reader,
        factory: &ObjectFactory,
        site: Site<'_>,
        index: usize,
    ) -> Result<(), Error> {
        let ptype = self.datatype.primitive();

        match self.datatype.structure() {
            StructureType::None if ptype.is_object() => {
                self.load_object(reader, factory, site, index)
            }

            StructureType::None => {
                let scalar = self.read_checked_scalar(reader, site)?;

                self.with_units(index, |units| {
                    units
                        .as_plain_mut()
                        .is_some_and(|buf| buf.set_scalar(index, scalar))
                })
            }

            StructureType::String => {
                let len = reader.read_string_begin(site)?;
                let len = self.checked_stream_len(&*reader, site, Some(len))?;
                let mut run = PrimitiveBuf::zeroed(ptype, len);
                for i in 0..len {
                    reader.read_stringentry_begin(site, i)?;
                    let scalar = self.read_checked_scalar(reader, site)?;
                    run.set_scalar(i, scalar);
                    reader.read_stringentry_end(site, i)?;
                }
                reader.read_string_end(site, len)?;

                self.with_units(index, |units| {
                    units
                        .string_at_mut(index)
                        .map(|slot| *slot = run)
                        .is_some()
                })
            }

            StructureType::Sparse => {
                let (vec_index, len) = reader.read_sparse_begin(site)?;
                let len = self.checked_stream_len(&*reader, site, Some(len))?;
                let mut run = SparseRun::zeroed(ptype, vec_index, len);
                for i in 0..len {
                    let feat_index = reader.read_sparseentry_begin(site, i)?;
                    let scalar = self.read_checked_scalar(reader, site)?;
                    run.feat_index[i] = feat_index;
                    run.values.set_scalar(i, scalar);
                    reader.read_sparseentry_end(site, feat_index, i)?;
                }
                reader.read_sparse_end(site, vec_index, len)?;

                self.with_units(index, |units| {
                    units
                        .sparse_at_mut(index)
                        .map(|slot| *slot = run)
                        .is_some()
                })
            }
        }
    }

    /// Primitive step for an object cell.
    ///
    /// An empty class name clears the cell. A class the factory cannot build
    /// fails the load.
    fn load_object(
        &self,
        reader: &mut dyn Reader,
        factory: &ObjectFactory,
        site: Site<'_>,
        index: usize,
    ) -> Result<(), Error> {
        let (class_name, generic) = reader.read_object_begin(site)?;

        if class_name.is_empty() {
            self.store_object(index, None)?;
        } else {
            let Some(object) = factory.construct(&class_name, generic) else {
                warn!(
                    class = %class_name,
                    parameter = %site.path(),
                    "cannot create object of class `{class_name}` for `{}`",
                    site.path()
                );
                return Err(Error::factory_not_found(format!(
                    "unknown class `{class_name}` while loading `{}`",
                    site.path()
                )));
            };

            self.store_object(index, Some(object.clone()))?;
            object.load_serializable(reader, factory, &self.nested_prefix(site.prefix))?;
        }

        reader.read_object_end(site, &class_name, generic)?;

        Ok(())
    }

    fn store_object(&self, index: usize, object: Option<ObjectRef>) -> Result<(), Error> {
        // the released reference drops after the borrow ends
        let mut previous = None;
        self.with_units(index, |units| {
            previous = units
                .as_plain_mut()
                .and_then(|buf| buf.replace_object(index, object));
            previous.is_some()
        })?;
        drop(previous);

        Ok(())
    }

    /// Length announced by the stream, rejected when it overflows or when
    /// the reader cannot supply that many values.
    fn checked_stream_len(
        &self,
        reader: &dyn Reader,
        site: Site<'_>,
        len: Option<usize>,
    ) -> Result<usize, Error> {
        match len {
            Some(len) if reader.remaining_hint().is_none_or(|max| len <= max) => Ok(len),
            _ => Err(Error::serialize_corruption(format!(
                "parameter `{}` announces more values than the stream holds",
                site.path()
            ))),
        }
    }

    fn read_checked_scalar(&self, reader: &mut dyn Reader, site: Site<'_>) -> Result<Scalar, Error> {
        let scalar = reader.read_scalar(site)?;
        let expected: PrimitiveType = self.datatype.primitive();

        if scalar.primitive_type() != expected {
            return Err(Error::serialize_corruption(format!(
                "parameter `{}` expects {expected} values but the stream holds {}",
                site.path(),
                scalar.primitive_type()
            )));
        }

        Ok(scalar)
    }

    /// Run a short mutation against the storage units.
    /// `apply` returns `false` when the unit does not exist.
    fn with_units(&self, index: usize, apply: impl FnOnce(&mut Units) -> bool) -> Result<(), Error> {
        let stored = {
            let mut value = self.slot.borrow_mut();
            value.data_mut().is_some_and(apply)
        };

        if stored {
            Ok(())
        } else {
            Err(self.missing_unit(index))
        }
    }
}
