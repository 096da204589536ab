use crate::{
    error::Error,
    object::Trail,
    param::Parameter,
    serialize::{Site, Writer},
    value::{FieldValue, PrimitiveBuf, Units},
};
use tracing::debug;

impl Parameter {
    /// Write this field through `writer`.
    ///
    /// The first failing writer call aborts the save and is returned.
    pub fn save(&self, writer: &mut dyn Writer, prefix: &str) -> Result<(), Error> {
        self.save_in(writer, prefix, &mut Trail::default())
    }

    pub(crate) fn save_in(
        &self,
        writer: &mut dyn Writer,
        prefix: &str,
        trail: &mut Trail,
    ) -> Result<(), Error> {
        let site = self.site(prefix);
        debug!(parameter = %site.path(), datatype = %self.datatype, "saving parameter");

        // save never mutates, so a shared borrow can span nested objects
        let value = self.slot.borrow();

        writer.write_type_begin(site)?;

        if self.datatype.container().is_container() {
            let (len_y, len_x) = self.checked_extent(&value);

            writer.write_cont_begin(site, len_y, len_x)?;
            for x in 0..len_x {
                for y in 0..len_y {
                    writer.write_item_begin(site, y, x)?;
                    self.save_unit(writer, site, &value, x * len_y + y, trail)?;
                    writer.write_item_end(site, y, x)?;
                }
            }
            writer.write_cont_end(site, len_y, len_x)?;
        } else {
            self.save_unit(writer, site, &value, 0, trail)?;
        }

        writer.write_type_end(site)?;

        Ok(())
    }

    /// Structure step: one storage unit.
    fn save_unit(
        &self,
        writer: &mut dyn Writer,
        site: Site<'_>,
        value: &FieldValue,
        index: usize,
        trail: &mut Trail,
    ) -> Result<(), Error> {
        let units = value.data().ok_or_else(|| self.missing_unit(index))?;

        match units {
            Units::Plain(buf) => self.save_primitive(writer, site, buf, index, trail),

            Units::Strings(_) => {
                let run = units
                    .string_at(index)
                    .ok_or_else(|| self.missing_unit(index))?;
                let len = run.len();

                writer.write_string_begin(site, len)?;
                for i in 0..len {
                    writer.write_stringentry_begin(site, i)?;
                    self.save_primitive(writer, site, run, i, trail)?;
                    writer.write_stringentry_end(site, i)?;
                }
                writer.write_string_end(site, len)?;

                Ok(())
            }

            Units::Sparse(_) => {
                let run = units
                    .sparse_at(index)
                    .ok_or_else(|| self.missing_unit(index))?;
                let len = run.len();

                writer.write_sparse_begin(site, run.vec_index, len)?;
                for (i, &feat_index) in run.feat_index.iter().take(len).enumerate() {
                    writer.write_sparseentry_begin(site, feat_index, i)?;
                    self.save_primitive(writer, site, &run.values, i, trail)?;
                    writer.write_sparseentry_end(site, feat_index, i)?;
                }
                writer.write_sparse_end(site, run.vec_index, len)?;

                Ok(())
            }
        }
    }

    /// Primitive step: one raw value, or one nested object.
    fn save_primitive(
        &self,
        writer: &mut dyn Writer,
        site: Site<'_>,
        buf: &PrimitiveBuf,
        index: usize,
        trail: &mut Trail,
    ) -> Result<(), Error> {
        if let PrimitiveBuf::SgObject(_) = buf {
            let object = buf
                .object_at(index)
                .ok_or_else(|| self.missing_unit(index))?
                .clone();
            let class_name = object.as_ref().map_or("", |o| o.name());
            let generic = object.as_ref().and_then(|o| o.generic());

            writer.write_object_begin(site, class_name, generic)?;
            if let Some(object) = &object {
                object.save_nested(writer, &self.nested_prefix(site.prefix), trail)?;
            }
            writer.write_object_end(site, class_name, generic)?;

            return Ok(());
        }

        let scalar = buf
            .scalar_at(index)
            .ok_or_else(|| self.missing_unit(index))?;
        writer.write_scalar(site, scalar)?;

        Ok(())
    }

    pub(super) fn missing_unit(&self, index: usize) -> Error {
        Error::parameter_invariant(format!(
            "parameter `{}` has no storage unit {index}",
            self.name
        ))
    }
}
