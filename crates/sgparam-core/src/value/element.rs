use crate::{
    object::ObjectRef,
    types::{SgMatrix, SgSparseVector, SgString, SgVector, SparseEntry},
    value::{Primitive, PrimitiveBuf, SparseRun, Units},
};
use sgparam_primitives::{ContainerType, PrimitiveType, StructureType};

///
/// Element
///
/// Rust type of one storage unit: a raw primitive, a string of primitives,
/// a sparse vector of primitives, or an optional object reference.
///

pub trait Element: Clone + 'static {
    const STRUCTURE: StructureType;
    const PRIMITIVE: PrimitiveType;

    /// Move a run of elements into storage units.
    fn pack(values: Vec<Self>) -> Units;

    /// Copy storage units back out; `None` when the units hold another type.
    fn unpack(units: &Units) -> Option<Vec<Self>>;
}

impl<P: Primitive> Element for P {
    const STRUCTURE: StructureType = StructureType::None;
    const PRIMITIVE: PrimitiveType = P::TYPE;

    fn pack(values: Vec<Self>) -> Units {
        Units::Plain(P::buf(values))
    }

    fn unpack(units: &Units) -> Option<Vec<Self>> {
        units.as_plain().and_then(P::slice).map(<[P]>::to_vec)
    }
}

impl<P: Primitive> Element for SgString<P> {
    const STRUCTURE: StructureType = StructureType::String;
    const PRIMITIVE: PrimitiveType = P::TYPE;

    fn pack(values: Vec<Self>) -> Units {
        Units::Strings(values.into_iter().map(|s| P::buf(s.0)).collect())
    }

    fn unpack(units: &Units) -> Option<Vec<Self>> {
        let Units::Strings(runs) = units else {
            return None;
        };

        runs.iter()
            .map(|run| P::slice(run).map(|s| Self(s.to_vec())))
            .collect()
    }
}

impl<P: Primitive> Element for SgSparseVector<P> {
    const STRUCTURE: StructureType = StructureType::Sparse;
    const PRIMITIVE: PrimitiveType = P::TYPE;

    fn pack(values: Vec<Self>) -> Units {
        Units::Sparse(
            values
                .into_iter()
                .map(|v| {
                    let (feat_index, values) = v
                        .entries
                        .into_iter()
                        .map(|e| (e.feat_index, e.value))
                        .unzip();

                    SparseRun {
                        vec_index: v.vec_index,
                        feat_index,
                        values: P::buf(values),
                    }
                })
                .collect(),
        )
    }

    fn unpack(units: &Units) -> Option<Vec<Self>> {
        let Units::Sparse(runs) = units else {
            return None;
        };

        runs.iter()
            .map(|run| {
                let values = P::slice(&run.values)?;
                let entries = run
                    .feat_index
                    .iter()
                    .zip(values)
                    .map(|(&feat_index, &value)| SparseEntry { feat_index, value })
                    .collect();

                Some(Self::new(run.vec_index, entries))
            })
            .collect()
    }
}

impl Element for Option<ObjectRef> {
    const STRUCTURE: StructureType = StructureType::None;
    const PRIMITIVE: PrimitiveType = PrimitiveType::SgObject;

    fn pack(values: Vec<Self>) -> Units {
        Units::Plain(PrimitiveBuf::SgObject(values))
    }

    fn unpack(units: &Units) -> Option<Vec<Self>> {
        match units.as_plain()? {
            PrimitiveBuf::SgObject(values) => Some(values.clone()),
            _ => None,
        }
    }
}

///
/// FieldType
///
/// Rust type of a whole field: one element, an [`SgVector`], or an
/// [`SgMatrix`]. Converts to and from `(len_y, len_x, elements)`.
///

pub trait FieldType: Sized + 'static {
    type Elem: Element;

    /// Container tag used when the field is registered with `add`.
    const CONTAINER: ContainerType;

    /// Whether a field of this container shape can be read back as `Self`.
    fn accepts(container: ContainerType) -> bool;

    fn into_parts(self) -> (usize, usize, Vec<Self::Elem>);

    fn from_parts(len_y: usize, len_x: usize, items: Vec<Self::Elem>) -> Option<Self>;
}

impl<E: Element> FieldType for E {
    type Elem = E;

    const CONTAINER: ContainerType = ContainerType::Scalar;

    fn accepts(container: ContainerType) -> bool {
        !container.is_container()
    }

    fn into_parts(self) -> (usize, usize, Vec<E>) {
        (1, 1, vec![self])
    }

    fn from_parts(_: usize, _: usize, items: Vec<E>) -> Option<Self> {
        items.into_iter().next()
    }
}

impl<E: Element> FieldType for SgVector<E> {
    type Elem = E;

    const CONTAINER: ContainerType = ContainerType::SgVector;

    fn accepts(container: ContainerType) -> bool {
        container.is_vector()
    }

    fn into_parts(self) -> (usize, usize, Vec<E>) {
        (self.len(), 1, self.0)
    }

    fn from_parts(len_y: usize, _: usize, items: Vec<E>) -> Option<Self> {
        (items.len() == len_y).then_some(Self(items))
    }
}

impl<E: Element> FieldType for SgMatrix<E> {
    type Elem = E;

    const CONTAINER: ContainerType = ContainerType::SgMatrix;

    fn accepts(container: ContainerType) -> bool {
        container.is_matrix()
    }

    fn into_parts(self) -> (usize, usize, Vec<E>) {
        self.into_parts()
    }

    fn from_parts(len_y: usize, len_x: usize, items: Vec<E>) -> Option<Self> {
        Self::new(len_y, len_x, items)
    }
}
