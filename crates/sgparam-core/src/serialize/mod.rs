//! Serializer collaborator protocol.
//!
//! Parameters drive a [`Writer`] or [`Reader`] through a fixed sequence of
//! bracketed calls; the byte layout is entirely the backend's business.
//! Size limits on decoded streams are caller policy, see
//! [`DEFAULT_MAX_STREAM_BYTES`].

pub mod cbor;
mod stream;

pub use stream::{StreamReader, StreamWriter, Token};

use crate::{
    error::{Error, ErrorClass, ErrorOrigin},
    model::DataType,
    value::Scalar,
};
use sgparam_primitives::PrimitiveType;
use std::fmt;
use thiserror::Error as ThisError;

/// Default upper bound on an encoded token stream accepted for decode.
pub const DEFAULT_MAX_STREAM_BYTES: usize = 64 * 1024 * 1024;

///
/// Site
///
/// Identifies the field every protocol call belongs to.
///

#[derive(Clone, Copy, Debug)]
pub struct Site<'a> {
    pub datatype: DataType,
    pub name: &'a str,
    pub prefix: &'a str,
}

impl Site<'_> {
    /// Hierarchical path, e.g. `machine/kernel/width`.
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}{}", self.prefix, self.name)
    }
}

///
/// Writer
///

pub trait Writer {
    fn write_type_begin(&mut self, site: Site<'_>) -> Result<(), SerializeError>;
    fn write_type_end(&mut self, site: Site<'_>) -> Result<(), SerializeError>;

    fn write_cont_begin(
        &mut self,
        site: Site<'_>,
        len_y: usize,
        len_x: usize,
    ) -> Result<(), SerializeError>;
    fn write_cont_end(
        &mut self,
        site: Site<'_>,
        len_y: usize,
        len_x: usize,
    ) -> Result<(), SerializeError>;

    fn write_item_begin(&mut self, site: Site<'_>, y: usize, x: usize)
    -> Result<(), SerializeError>;
    fn write_item_end(&mut self, site: Site<'_>, y: usize, x: usize) -> Result<(), SerializeError>;

    fn write_string_begin(&mut self, site: Site<'_>, len: usize) -> Result<(), SerializeError>;
    fn write_string_end(&mut self, site: Site<'_>, len: usize) -> Result<(), SerializeError>;

    fn write_stringentry_begin(&mut self, site: Site<'_>, i: usize)
    -> Result<(), SerializeError>;
    fn write_stringentry_end(&mut self, site: Site<'_>, i: usize) -> Result<(), SerializeError>;

    fn write_sparse_begin(
        &mut self,
        site: Site<'_>,
        vec_index: i32,
        len: usize,
    ) -> Result<(), SerializeError>;
    fn write_sparse_end(
        &mut self,
        site: Site<'_>,
        vec_index: i32,
        len: usize,
    ) -> Result<(), SerializeError>;

    fn write_sparseentry_begin(
        &mut self,
        site: Site<'_>,
        feat_index: i32,
        i: usize,
    ) -> Result<(), SerializeError>;
    fn write_sparseentry_end(
        &mut self,
        site: Site<'_>,
        feat_index: i32,
        i: usize,
    ) -> Result<(), SerializeError>;

    /// Open a nested object; `class_name` is empty for an unset reference.
    fn write_object_begin(
        &mut self,
        site: Site<'_>,
        class_name: &str,
        generic: Option<PrimitiveType>,
    ) -> Result<(), SerializeError>;
    fn write_object_end(
        &mut self,
        site: Site<'_>,
        class_name: &str,
        generic: Option<PrimitiveType>,
    ) -> Result<(), SerializeError>;

    fn write_scalar(&mut self, site: Site<'_>, value: Scalar) -> Result<(), SerializeError>;
}

///
/// Reader
///
/// Mirror of [`Writer`]. Lengths, indices and class names are supplied by
/// the stream on the `begin` calls and echoed back on the `end` calls.
///

pub trait Reader {
    fn read_type_begin(&mut self, site: Site<'_>) -> Result<(), SerializeError>;
    fn read_type_end(&mut self, site: Site<'_>) -> Result<(), SerializeError>;

    fn read_cont_begin(&mut self, site: Site<'_>) -> Result<(usize, usize), SerializeError>;
    fn read_cont_end(
        &mut self,
        site: Site<'_>,
        len_y: usize,
        len_x: usize,
    ) -> Result<(), SerializeError>;

    fn read_item_begin(&mut self, site: Site<'_>, y: usize, x: usize) -> Result<(), SerializeError>;
    fn read_item_end(&mut self, site: Site<'_>, y: usize, x: usize) -> Result<(), SerializeError>;

    fn read_string_begin(&mut self, site: Site<'_>) -> Result<usize, SerializeError>;
    fn read_string_end(&mut self, site: Site<'_>, len: usize) -> Result<(), SerializeError>;

    fn read_stringentry_begin(&mut self, site: Site<'_>, i: usize) -> Result<(), SerializeError>;
    fn read_stringentry_end(&mut self, site: Site<'_>, i: usize) -> Result<(), SerializeError>;

    fn read_sparse_begin(&mut self, site: Site<'_>) -> Result<(i32, usize), SerializeError>;
    fn read_sparse_end(
        &mut self,
        site: Site<'_>,
        vec_index: i32,
        len: usize,
    ) -> Result<(), SerializeError>;

    fn read_sparseentry_begin(&mut self, site: Site<'_>, i: usize) -> Result<i32, SerializeError>;
    fn read_sparseentry_end(
        &mut self,
        site: Site<'_>,
        feat_index: i32,
        i: usize,
    ) -> Result<(), SerializeError>;

    fn read_object_begin(
        &mut self,
        site: Site<'_>,
    ) -> Result<(String, Option<PrimitiveType>), SerializeError>;
    fn read_object_end(
        &mut self,
        site: Site<'_>,
        class_name: &str,
        generic: Option<PrimitiveType>,
    ) -> Result<(), SerializeError>;

    fn read_scalar(&mut self, site: Site<'_>) -> Result<Scalar, SerializeError>;

    /// Upper bound on the values still readable, when the backend knows it.
    /// Lengths read from the stream are checked against it before storage
    /// is allocated.
    fn remaining_hint(&self) -> Option<usize> {
        None
    }
}

///
/// SerializeError
///

#[derive(Debug, ThisError)]
pub enum SerializeError {
    #[error("serialize error: {0}")]
    Serialize(String),

    #[error("deserialize error: {0}")]
    Deserialize(String),

    #[error("deserialize size limit exceeded: {len} bytes (limit {max_bytes})")]
    DeserializeSizeLimitExceeded { len: usize, max_bytes: usize },

    #[error("protocol mismatch at `{path}`: expected {expected}, found {found}")]
    Protocol {
        path: String,
        expected: String,
        found: String,
    },

    #[error("unexpected end of stream at `{path}`: expected {expected}")]
    EndOfStream { path: String, expected: String },

    #[error("backend failure at `{path}`: {message}")]
    Backend { path: String, message: String },
}

///
/// SerializeErrorKind
///
/// Stable error-kind taxonomy for serializer failures.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SerializeErrorKind {
    Serialize,
    Deserialize,
    DeserializeSizeLimitExceeded,
    Protocol,
    EndOfStream,
    Backend,
}

impl SerializeErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Serialize => "serialize",
            Self::Deserialize => "deserialize",
            Self::DeserializeSizeLimitExceeded => "deserialize_size_limit_exceeded",
            Self::Protocol => "protocol",
            Self::EndOfStream => "end_of_stream",
            Self::Backend => "backend",
        }
    }

    /// Error class this kind maps to once it leaves the serializer.
    #[must_use]
    pub const fn class(self) -> ErrorClass {
        match self {
            Self::Serialize | Self::Backend => ErrorClass::Io,
            Self::Deserialize
            | Self::DeserializeSizeLimitExceeded
            | Self::Protocol
            | Self::EndOfStream => ErrorClass::Corruption,
        }
    }
}

impl fmt::Display for SerializeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SerializeError {
    /// Return a stable error kind independent of backend error-message text.
    #[must_use]
    pub const fn kind(&self) -> SerializeErrorKind {
        match self {
            Self::Serialize(_) => SerializeErrorKind::Serialize,
            Self::Deserialize(_) => SerializeErrorKind::Deserialize,
            Self::DeserializeSizeLimitExceeded { .. } => {
                SerializeErrorKind::DeserializeSizeLimitExceeded
            }
            Self::Protocol { .. } => SerializeErrorKind::Protocol,
            Self::EndOfStream { .. } => SerializeErrorKind::EndOfStream,
            Self::Backend { .. } => SerializeErrorKind::Backend,
        }
    }
}

impl From<SerializeError> for Error {
    fn from(err: SerializeError) -> Self {
        Self::new(err.kind().class(), ErrorOrigin::Serialize, err.to_string())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_error_classes() {
        let err: Error = SerializeError::Backend {
            path: "w".into(),
            message: "disk full".into(),
        }
        .into();
        assert_eq!(err.class, ErrorClass::Io);
        assert_eq!(err.origin, ErrorOrigin::Serialize);

        let err: Error = SerializeError::EndOfStream {
            path: "w".into(),
            expected: "scalar".into(),
        }
        .into();
        assert_eq!(err.class, ErrorClass::Corruption);
    }

    #[test]
    fn site_path_joins_prefix_and_name() {
        let site = Site {
            datatype: DataType::scalar(PrimitiveType::Int32),
            name: "width",
            prefix: "machine/kernel/",
        };

        assert_eq!(site.path(), "machine/kernel/width");
    }
}
