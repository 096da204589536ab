use crate::{error::Error, hash::MurmurState, param::Parameter};
use sgparam_primitives::StructureType;

impl Parameter {
    /// Feed this field's little-endian element bytes into `state`.
    ///
    /// Only plain primitive data has a byte form; object references and
    /// string or sparse structures are rejected.
    pub fn incremental_hash(&self, state: &mut MurmurState) -> Result<(), Error> {
        if self.datatype.primitive().is_object() || self.datatype.structure() != StructureType::None
        {
            return Err(Error::hash_unsupported(format!(
                "hashing parameter `{}` of type {} is not supported",
                self.name, self.datatype
            )));
        }

        let value = self.slot.borrow();
        let count = if self.datatype.container().is_container() {
            let (len_y, len_x) = self.checked_extent(&value);
            self.datatype.element_count(len_y, len_x)
        } else {
            1
        };
        if count == 0 {
            return Ok(());
        }

        let mut bytes = Vec::with_capacity(count * self.datatype.primitive_unit_size());
        if let Some(buf) = value.data().and_then(|units| units.as_plain()) {
            buf.write_le(count, &mut bytes);
        }
        state.update(&bytes);

        Ok(())
    }
}
