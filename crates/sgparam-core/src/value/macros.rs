///
/// Runtime value registry.
///
/// One entry per primitive kind that carries raw data: the tag variant, the
/// Rust storage type, and how one value is laid out as little-endian bytes.
/// `SgObject` is handled by hand next to the generated code.
///

macro_rules! primitive_value_registry {
    ($macro:ident) => {
        $macro! {
            (Bool, bool, |v| [u8::from(v)]),
            (Char, Char, |v| [v.0]),
            (Int8, i8, |v| v.to_le_bytes()),
            (UInt8, u8, |v| v.to_le_bytes()),
            (Int16, i16, |v| v.to_le_bytes()),
            (UInt16, u16, |v| v.to_le_bytes()),
            (Int32, i32, |v| v.to_le_bytes()),
            (UInt32, u32, |v| v.to_le_bytes()),
            (Int64, i64, |v| v.to_le_bytes()),
            (UInt64, u64, |v| v.to_le_bytes()),
            (Float32, f32, |v| v.to_le_bytes()),
            (Float64, f64, |v| v.to_le_bytes()),
            (FloatMax, FloatMax, |v| v.0.to_le_bytes()),
            (Complex128, Complex128, |v| complex_le_bytes(v)),
        }
    };
}

macro_rules! define_primitive_values {
    ( $( ($variant:ident, $ty:ty, |$v:ident| $le:expr) ),* $(,)? ) => {
        ///
        /// Scalar
        ///
        /// One primitive value with its kind attached. This is the leaf unit
        /// exchanged with a serializer.
        ///

        #[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
        pub enum Scalar {
            $( $variant($ty), )*
        }

        impl Scalar {
            #[must_use]
            pub const fn primitive_type(&self) -> PrimitiveType {
                match self {
                    $( Self::$variant(_) => PrimitiveType::$variant, )*
                }
            }
        }

        ///
        /// PrimitiveBuf
        ///
        /// Contiguous run of values of one primitive kind.
        ///

        #[derive(Clone, Debug)]
        pub enum PrimitiveBuf {
            $( $variant(Vec<$ty>), )*
            SgObject(Vec<Option<ObjectRef>>),
        }

        impl PrimitiveBuf {
            /// Allocate `len` default values; object slots start empty.
            #[must_use]
            pub fn zeroed(ptype: PrimitiveType, len: usize) -> Self {
                match ptype {
                    $( PrimitiveType::$variant => Self::$variant(vec![<$ty>::default(); len]), )*
                    PrimitiveType::SgObject => Self::SgObject(vec![None; len]),
                }
            }

            #[must_use]
            pub const fn primitive_type(&self) -> PrimitiveType {
                match self {
                    $( Self::$variant(_) => PrimitiveType::$variant, )*
                    Self::SgObject(_) => PrimitiveType::SgObject,
                }
            }

            #[must_use]
            pub fn len(&self) -> usize {
                match self {
                    $( Self::$variant(values) => values.len(), )*
                    Self::SgObject(values) => values.len(),
                }
            }

            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            /// Read one value; `None` when out of range or object-typed.
            #[must_use]
            pub fn scalar_at(&self, index: usize) -> Option<Scalar> {
                match self {
                    $( Self::$variant(values) => values.get(index).copied().map(Scalar::$variant), )*
                    Self::SgObject(_) => None,
                }
            }

            /// Store one value; `false` when out of range or of another kind.
            pub fn set_scalar(&mut self, index: usize, value: Scalar) -> bool {
                match (self, value) {
                    $(
                        (Self::$variant(values), Scalar::$variant(x)) => {
                            if let Some(slot) = values.get_mut(index) {
                                *slot = x;
                                true
                            } else {
                                false
                            }
                        }
                    )*
                    _ => false,
                }
            }

            /// Append the little-endian bytes of the first `count` values.
            /// Returns `false` for object runs, which have no byte form.
            pub fn write_le(&self, count: usize, out: &mut Vec<u8>) -> bool {
                match self {
                    $(
                        Self::$variant(values) => {
                            for &$v in values.iter().take(count) {
                                out.extend_from_slice(&$le);
                            }
                            true
                        }
                    )*
                    Self::SgObject(_) => false,
                }
            }
        }

        $(
            impl Primitive for $ty {
                const TYPE: PrimitiveType = PrimitiveType::$variant;

                fn into_scalar(self) -> Scalar {
                    Scalar::$variant(self)
                }

                fn from_scalar(value: Scalar) -> Option<Self> {
                    match value {
                        Scalar::$variant(x) => Some(x),
                        _ => None,
                    }
                }

                fn buf(values: Vec<Self>) -> PrimitiveBuf {
                    PrimitiveBuf::$variant(values)
                }

                fn slice(buf: &PrimitiveBuf) -> Option<&[Self]> {
                    match buf {
                        PrimitiveBuf::$variant(values) => Some(values),
                        _ => None,
                    }
                }
            }
        )*
    };
}
