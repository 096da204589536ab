use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Structured error with a stable classification.
/// Every fallible operation in this crate reports through this type; the
/// serializer collaborator's own failures convert into it at the boundary.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct Error {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Construct a registry-origin invariant violation.
    pub(crate) fn registry_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Registry,
            message,
        )
    }

    /// Construct a parameter-origin invariant violation.
    pub(crate) fn parameter_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Parameter,
            message,
        )
    }

    /// Construct a datatype-origin unsupported error.
    pub(crate) fn datatype_unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Unsupported, ErrorOrigin::DataType, message)
    }

    /// Construct a hash-origin unsupported error.
    pub(crate) fn hash_unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Unsupported, ErrorOrigin::Hash, message)
    }

    /// Construct a serialize-origin corruption error.
    pub(crate) fn serialize_corruption(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Corruption, ErrorOrigin::Serialize, message)
    }

    /// Construct a registry-origin not-found error.
    pub(crate) fn registry_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::NotFound, ErrorOrigin::Registry, message)
    }

    /// Construct a factory-origin not-found error.
    pub(crate) fn factory_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::NotFound, ErrorOrigin::Factory, message)
    }

    /// Construct a factory-origin invariant violation.
    pub(crate) fn factory_invariant(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::InvariantViolation, ErrorOrigin::Factory, message)
    }

    /// Construct an object-origin cycle error.
    pub(crate) fn cycle(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Cycle, ErrorOrigin::Object, message)
    }

    /// Construct an object-origin internal error.
    pub(crate) fn object_internal(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Internal, ErrorOrigin::Object, message)
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.class, ErrorClass::NotFound)
    }

    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self.class, ErrorClass::Unsupported)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

impl From<fmt::Error> for Error {
    fn from(_: fmt::Error) -> Self {
        Self::object_internal("formatter error while printing parameters")
    }
}

///
/// ErrorClass
/// Error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// Programmer error: bad name, duplicate name, type mismatch.
    InvariantViolation,
    NotFound,
    Unsupported,
    /// The stream being read does not follow the expected protocol.
    Corruption,
    /// The serializer collaborator reported a failure.
    Io,
    /// An object graph revisited one of its own ancestors.
    Cycle,
    Internal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvariantViolation => "invariant_violation",
            Self::NotFound => "not_found",
            Self::Unsupported => "unsupported",
            Self::Corruption => "corruption",
            Self::Io => "io",
            Self::Cycle => "cycle",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Origin taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    DataType,
    Parameter,
    Registry,
    Hash,
    Serialize,
    Factory,
    Object,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::DataType => "datatype",
            Self::Parameter => "parameter",
            Self::Registry => "registry",
            Self::Hash => "hash",
            Self::Serialize => "serialize",
            Self::Factory => "factory",
            Self::Object => "object",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
