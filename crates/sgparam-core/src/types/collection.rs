use derive_more::{Deref, DerefMut, From, IntoIterator};

///
/// SgString
///
/// Owned run of primitive values, e.g. one line of text.
///

#[derive(Clone, Debug, Default, Deref, DerefMut, Eq, From, IntoIterator, PartialEq)]
pub struct SgString<P>(pub Vec<P>);

impl<P> SgString<P> {
    #[must_use]
    pub const fn new(values: Vec<P>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<P> {
        self.0
    }
}

///
/// SparseEntry
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SparseEntry<P> {
    pub feat_index: i32,
    pub value: P,
}

impl<P> SparseEntry<P> {
    pub const fn new(feat_index: i32, value: P) -> Self {
        Self { feat_index, value }
    }
}

///
/// SgSparseVector
///
/// One sparse row: the row's vector index plus its non-zero entries.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SgSparseVector<P> {
    pub vec_index: i32,
    pub entries: Vec<SparseEntry<P>>,
}

impl<P> SgSparseVector<P> {
    #[must_use]
    pub const fn new(vec_index: i32, entries: Vec<SparseEntry<P>>) -> Self {
        Self { vec_index, entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P: Copy> SgSparseVector<P> {
    /// Build from `(feat_index, value)` pairs.
    pub fn from_pairs(vec_index: i32, pairs: impl IntoIterator<Item = (i32, P)>) -> Self {
        Self {
            vec_index,
            entries: pairs
                .into_iter()
                .map(|(feat_index, value)| SparseEntry::new(feat_index, value))
                .collect(),
        }
    }
}

///
/// SgVector
///
/// Vector value that carries its own length.
///

#[derive(Clone, Debug, Default, Deref, DerefMut, Eq, From, IntoIterator, PartialEq)]
pub struct SgVector<E>(pub Vec<E>);

impl<E> SgVector<E> {
    #[must_use]
    pub const fn new(values: Vec<E>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<E> {
        self.0
    }
}

///
/// SgMatrix
///
/// Column-major matrix value that carries its own shape.
/// Element `(row, col)` lives at `col * rows + row`.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SgMatrix<E> {
    rows: usize,
    cols: usize,
    data: Vec<E>,
}

impl<E> SgMatrix<E> {
    /// Build a matrix; `None` when `data.len() != rows * cols`.
    #[must_use]
    pub fn new(rows: usize, cols: usize, data: Vec<E>) -> Option<Self> {
        (rows.checked_mul(cols)? == data.len()).then_some(Self { rows, cols, data })
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn data(&self) -> &[E] {
        &self.data
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&E> {
        if row >= self.rows || col >= self.cols {
            return None;
        }

        self.data.get(col * self.rows + row)
    }

    #[must_use]
    pub fn into_parts(self) -> (usize, usize, Vec<E>) {
        (self.rows, self.cols, self.data)
    }
}

///
/// TESTS
///
