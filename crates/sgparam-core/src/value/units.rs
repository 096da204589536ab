use crate::{model::DataType, value::PrimitiveBuf};
use sgparam_primitives::{PrimitiveType, StructureType};

///
/// SparseRun
///
/// One stored sparse vector. `feat_index[i]` pairs with value `i`.
///

#[derive(Clone, Debug)]
pub struct SparseRun {
    pub vec_index: i32,
    pub feat_index: Vec<i32>,
    pub values: PrimitiveBuf,
}

impl SparseRun {
    #[must_use]
    pub fn empty(ptype: PrimitiveType) -> Self {
        Self {
            vec_index: 0,
            feat_index: Vec::new(),
            values: PrimitiveBuf::zeroed(ptype, 0),
        }
    }

    #[must_use]
    pub fn zeroed(ptype: PrimitiveType, vec_index: i32, len: usize) -> Self {
        Self {
            vec_index,
            feat_index: vec![0; len],
            values: PrimitiveBuf::zeroed(ptype, len),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.feat_index.len().min(self.values.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

///
/// Units
///
/// Storage units of one field, shaped by its structure type.
///

#[derive(Clone, Debug)]
pub enum Units {
    Plain(PrimitiveBuf),
    Strings(Vec<PrimitiveBuf>),
    Sparse(Vec<SparseRun>),
}

impl Units {
    /// Allocate `count` default storage units for `datatype`.
    /// Strings and sparse runs start empty; object slots start as `None`.
    #[must_use]
    pub fn zeroed(datatype: DataType, count: usize) -> Self {
        let ptype = datatype.primitive();

        match datatype.structure() {
            StructureType::None => Self::Plain(PrimitiveBuf::zeroed(ptype, count)),
            StructureType::String => Self::Strings(
                (0..count)
                    .map(|_| PrimitiveBuf::zeroed(ptype, 0))
                    .collect(),
            ),
            StructureType::Sparse => {
                Self::Sparse((0..count).map(|_| SparseRun::empty(ptype)).collect())
            }
        }
    }

    #[must_use]
    pub const fn structure(&self) -> StructureType {
        match self {
            Self::Plain(_) => StructureType::None,
            Self::Strings(_) => StructureType::String,
            Self::Sparse(_) => StructureType::Sparse,
        }
    }

    /// Number of storage units.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Plain(buf) => buf.len(),
            Self::Strings(runs) => runs.len(),
            Self::Sparse(runs) => runs.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn as_plain(&self) -> Option<&PrimitiveBuf> {
        match self {
            Self::Plain(buf) => Some(buf),
            _ => None,
        }
    }

    pub const fn as_plain_mut(&mut self) -> Option<&mut PrimitiveBuf> {
        match self {
            Self::Plain(buf) => Some(buf),
            _ => None,
        }
    }

    #[must_use]
    pub fn string_at(&self, index: usize) -> Option<&PrimitiveBuf> {
        match self {
            Self::Strings(runs) => runs.get(index),
            _ => None,
        }
    }

    pub fn string_at_mut(&mut self, index: usize) -> Option<&mut PrimitiveBuf> {
        match self {
            Self::Strings(runs) => runs.get_mut(index),
            _ => None,
        }
    }

    #[must_use]
    pub fn sparse_at(&self, index: usize) -> Option<&SparseRun> {
        match self {
            Self::Sparse(runs) => runs.get(index),
            _ => None,
        }
    }

    pub fn sparse_at_mut(&mut self, index: usize) -> Option<&mut SparseRun> {
        match self {
            Self::Sparse(runs) => runs.get_mut(index),
            _ => None,
        }
    }
}

///
/// TESTS
///
