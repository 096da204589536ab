#[macro_export]
macro_rules! primitive_type_registry_entries {
    ($macro:ident $(, @args $($args:tt)+ )?) => {
        $macro! {
            $(
                @args $($args)+;
            )?
            @entries
            (Bool, Bool, label = "bool", width = Some(1)),
            (Char, Char, label = "char", width = Some(1)),
            (Int8, Integer, label = "int8", width = Some(1)),
            (UInt8, Integer, label = "uint8", width = Some(1)),
            (Int16, Integer, label = "int16", width = Some(2)),
            (UInt16, Integer, label = "uint16", width = Some(2)),
            (Int32, Integer, label = "int32", width = Some(4)),
            (UInt32, Integer, label = "uint32", width = Some(4)),
            (Int64, Integer, label = "int64", width = Some(8)),
            (UInt64, Integer, label = "uint64", width = Some(8)),
            (Float32, Float, label = "float32", width = Some(4)),
            (Float64, Float, label = "float64", width = Some(8)),
            (FloatMax, Float, label = "floatmax", width = Some(8)),
            (Complex128, Complex, label = "complex128", width = Some(16)),
            (SgObject, Object, label = "SGObject", width = None),
        }
    };
}

#[macro_export]
macro_rules! primitive_type_registry {
    ($macro:ident) => {
        $crate::primitive_type_registry_entries!($macro)
    };
    ($macro:ident, $($args:tt)+) => {
        $crate::primitive_type_registry_entries!($macro, @args $($args)+)
    };
}

macro_rules! metadata_from_registry {
    ( @args $kind:expr; @entries $( ($ptype:ident, $family:ident, label = $label:expr, width = $width:expr) ),* $(,)? ) => {
        match $kind {
            $(
                $crate::PrimitiveType::$ptype => $crate::PrimitiveMetadata {
                    family: $crate::PrimitiveFamily::$family,
                    label: $label,
                    width: $width,
                },
            )*
        }
    };
}

macro_rules! all_types_from_registry {
    ( @entries $( ($ptype:ident, $family:ident, label = $label:expr, width = $width:expr) ),* $(,)? ) => {
        [ $( $crate::PrimitiveType::$ptype ),* ]
    };
}
