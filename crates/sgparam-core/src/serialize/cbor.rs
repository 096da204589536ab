use crate::serialize::{DEFAULT_MAX_STREAM_BYTES, SerializeError};
use serde::{Serialize, de::DeserializeOwned};
use serde_cbor::{from_slice, to_vec};
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Serialize a value into CBOR bytes.
pub fn serialize<T>(t: &T) -> Result<Vec<u8>, SerializeError>
where
    T: Serialize,
{
    to_vec(t).map_err(|e| SerializeError::Serialize(e.to_string()))
}

/// Deserialize CBOR bytes, bounded by [`DEFAULT_MAX_STREAM_BYTES`].
pub fn deserialize<T>(bytes: &[u8]) -> Result<T, SerializeError>
where
    T: DeserializeOwned,
{
    deserialize_bounded(bytes, DEFAULT_MAX_STREAM_BYTES)
}

/// Deserialize CBOR bytes with an explicit size limit.
///
/// Safety guarantees:
/// - Input size is bounded before decode.
/// - Any panic during decode is caught and reported as a deserialize error.
/// - No panic escapes this function.
pub fn deserialize_bounded<T>(bytes: &[u8], max_bytes: usize) -> Result<T, SerializeError>
where
    T: DeserializeOwned,
{
    if bytes.len() > max_bytes {
        return Err(SerializeError::DeserializeSizeLimitExceeded {
            len: bytes.len(),
            max_bytes,
        });
    }

    let result = catch_unwind(AssertUnwindSafe(|| from_slice(bytes)));

    match result {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(SerializeError::Deserialize(err.to_string())),
        Err(_) => Err(SerializeError::Deserialize(
            "panic during CBOR deserialization".into(),
        )),
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::SerializeErrorKind;

    #[test]
    fn deserialize_bounded_rejects_oversized_input() {
        let bytes = serialize(&vec![7u32; 64]).expect("encode");
        let err = deserialize_bounded::<Vec<u32>>(&bytes, 8).expect_err("too large");

        assert_eq!(err.kind(), SerializeErrorKind::DeserializeSizeLimitExceeded);
    }

    #[test]
    fn deserialize_reports_garbage_as_deserialize_error() {
        let err = deserialize::<Vec<u32>>(&[0xff, 0x00, 0x13]).expect_err("garbage");

        assert_eq!(err.kind(), SerializeErrorKind::Deserialize);
    }

    #[test]
    fn round_trips_within_limit() {
        let bytes = serialize(&("width", 3.5f64)).expect("encode");
        let decoded: (String, f64) = deserialize(&bytes).expect("decode");

        assert_eq!(decoded, ("width".to_string(), 3.5));
    }
}
