use crate::{
    model::DataType,
    value::{Element, FieldType, Units},
};

///
/// FieldValue
///
/// Current value of one reflected field: the type tags, the two lengths and
/// the storage units. `data == None` is the released state; the lengths are
/// kept as they are so a stale length can be spotted and clamped.
///

#[derive(Clone, Debug)]
pub struct FieldValue {
    datatype: DataType,
    len_y: usize,
    len_x: usize,
    data: Option<Units>,
}

impl FieldValue {
    /// Fresh value for `datatype`: scalars hold one zeroed unit, containers
    /// start empty.
    #[must_use]
    pub fn empty(datatype: DataType) -> Self {
        if datatype.container().is_container() {
            Self {
                datatype,
                len_y: 0,
                len_x: 0,
                data: None,
            }
        } else {
            Self {
                datatype,
                len_y: 1,
                len_x: 1,
                data: Some(Units::zeroed(datatype, 1)),
            }
        }
    }

    /// Build from a typed value under the given container tag.
    pub(crate) fn from_field<T: FieldType>(datatype: DataType, value: T) -> Self {
        let (len_y, len_x, items) = value.into_parts();
        let data = if datatype.container().is_container() && items.is_empty() {
            None
        } else {
            Some(T::Elem::pack(items))
        };

        Self {
            datatype,
            len_y,
            len_x,
            data,
        }
    }

    /// Read back a typed value; `None` when the tags or shape do not fit.
    #[must_use]
    pub fn to_field<T: FieldType>(&self) -> Option<T> {
        let dt = self.datatype;
        if dt.structure() != T::Elem::STRUCTURE
            || dt.primitive() != T::Elem::PRIMITIVE
            || !T::accepts(dt.container())
        {
            return None;
        }

        match &self.data {
            Some(units) => {
                let items = T::Elem::unpack(units)?;
                T::from_parts(self.len_y, self.len_x, items)
            }
            None => T::from_parts(0, 0, Vec::new()),
        }
    }

    #[must_use]
    pub const fn datatype(&self) -> DataType {
        self.datatype
    }

    #[must_use]
    pub const fn lengths(&self) -> (usize, usize) {
        (self.len_y, self.len_x)
    }

    /// Overwrite the length fields without touching the data.
    pub const fn set_lengths(&mut self, len_y: usize, len_x: usize) {
        self.len_y = len_y;
        self.len_x = len_x;
    }

    #[must_use]
    pub const fn data(&self) -> Option<&Units> {
        self.data.as_ref()
    }

    pub const fn data_mut(&mut self) -> Option<&mut Units> {
        self.data.as_mut()
    }

    /// Number of addressable elements.
    /// `1` for scalars, `0` when the data is released.
    #[must_use]
    pub const fn element_count(&self) -> usize {
        if !self.datatype.container().is_container() {
            return 1;
        }

        match self.data {
            Some(_) => self.datatype.element_count(self.len_y, self.len_x),
            None => 0,
        }
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.element_count() > 0
    }

    /// Release container storage. Scalars are left alone; calling twice is
    /// harmless.
    pub fn delete_cont(&mut self) {
        if self.datatype.container().is_container() {
            self.data = None;
        }
    }

    /// Release storage, then allocate `len_y * len_x` zeroed units and
    /// record the lengths. Vectors always get `len_x == 1`.
    pub fn new_cont(&mut self, len_y: usize, len_x: usize) {
        if !self.datatype.container().is_container() {
            return;
        }

        self.delete_cont();

        let len_x = if self.datatype.container().is_vector() {
            1
        } else {
            len_x
        };
        let count = self.datatype.element_count(len_y, len_x);
        if count != 0 {
            self.data = Some(Units::zeroed(self.datatype, count));
        }

        self.len_y = len_y;
        self.len_x = len_x;
    }
}

///
/// TESTS
///
