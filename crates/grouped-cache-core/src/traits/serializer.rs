//! Pluggable value serialization

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};

/// Converts values (and catalogs) to the bytes kept in the store
///
/// A `Deserialization` error is how the provider recognises "nothing usable
/// here": it substitutes the caller's default for entries and an empty
/// catalog for catalogs.
pub trait Serializer: Send + Sync + Clone + 'static {
    /// Name of the serializer (for logs)
    fn name(&self) -> &str;

    /// Serialize a value to bytes
    fn serialize<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CacheError>;

    /// Deserialize bytes to a value
    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CacheError>;
}

/// JSON serializer (default)
///
/// Readable with `redis-cli`, which helps when inspecting catalogs by hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CacheError> {
        serde_json::to_vec(value).map_err(|e| CacheError::Serialization(e.to_string()))
    }

    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CacheError> {
        serde_json::from_slice(bytes).map_err(|e| CacheError::Deserialization(e.to_string()))
    }
}

/// MessagePack serializer
///
/// Enable with the `msgpack` feature.
#[cfg(feature = "msgpack")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackSerializer;

#[cfg(feature = "msgpack")]
impl Serializer for MsgPackSerializer {
    fn name(&self) -> &str {
        "msgpack"
    }

    fn serialize<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CacheError> {
        rmp_serde::to_vec(value).map_err(|e| CacheError::Serialization(e.to_string()))
    }

    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CacheError> {
        rmp_serde::from_slice(bytes).map_err(|e| CacheError::Deserialization(e.to_string()))
    }
}

/// Bincode serializer
///
/// Compact but not self-describing: every process sharing a store must use
/// the same value types. Enable with the `bincode` feature.
#[cfg(feature = "bincode")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeSerializer;

#[cfg(feature = "bincode")]
impl Serializer for BincodeSerializer {
    fn name(&self) -> &str {
        "bincode"
    }

    fn serialize<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CacheError> {
        bincode::serde::encode_to_vec(value, bincode::config::standard())
            .map_err(|e| CacheError::Serialization(e.to_string()))
    }

    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CacheError> {
        let (val, _len) = bincode::serde::decode_from_slice(bytes, bincode::config::standard())
            .map_err(|e| CacheError::Deserialization(e.to_string()))?;
        Ok(val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Profile {
        name: String,
        age: u32,
    }

    #[test]
    fn test_json_struct() {
        let serializer = JsonSerializer;
        let value = Profile {
            name: "a".to_string(),
            age: 30,
        };

        let bytes = serializer.serialize(&value).unwrap();
        let decoded: Profile = serializer.deserialize(&bytes).unwrap();

        assert_eq!(value, decoded);
    }

    #[test]
    fn test_json_garbage_is_deserialization_error() {
        let result: Result<Profile, _> = JsonSerializer.deserialize(b"\x00\x01not json");
        assert!(matches!(result, Err(CacheError::Deserialization(_))));
    }

    #[test]
    fn test_json_shape_mismatch_is_deserialization_error() {
        let bytes = JsonSerializer.serialize(&42i32).unwrap();
        let result: Result<Profile, _> = JsonSerializer.deserialize(&bytes);
        assert!(matches!(result, Err(CacheError::Deserialization(_))));
    }

    #[test]
    fn test_json_serializer_name() {
        assert_eq!(JsonSerializer.name(), "json");
    }

    #[cfg(feature = "msgpack")]
    #[test]
    fn test_msgpack_struct() {
        let value = Profile {
            name: "b".to_string(),
            age: 7,
        };
        let bytes = MsgPackSerializer.serialize(&value).unwrap();
        let decoded: Profile = MsgPackSerializer.deserialize(&bytes).unwrap();
        assert_eq!(value, decoded);
    }
}
