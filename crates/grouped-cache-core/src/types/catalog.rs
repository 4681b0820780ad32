//! Group catalog type

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{Result, Serializer};

/// Marker stored against every member id
///
/// Only presence in the map carries meaning.
pub const MEMBER_MARKER: u8 = 1;

/// Per-group index of member ids, stored as a single entry in the same store
/// it indexes
///
/// Serializes as a plain map `{ member_id: 1, ... }`. A catalog may list ids
/// whose entries have already expired; those are dropped by a sweep or by
/// group invalidation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    members: BTreeMap<String, u8>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode stored catalog bytes
    ///
    /// Absent or malformed bytes yield an empty catalog; whatever was stored
    /// there is discarded on the next write.
    pub fn decode<S: Serializer>(serializer: &S, bytes: Option<&[u8]>) -> Self {
        match bytes {
            Some(bytes) => serializer.deserialize(bytes).unwrap_or_default(),
            None => Self::new(),
        }
    }

    /// Encode for storage
    pub fn encode<S: Serializer>(&self, serializer: &S) -> Result<Vec<u8>> {
        serializer.serialize(self)
    }

    /// Add (or refresh) a member
    ///
    /// Returns `true` if the id was not listed before.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.members.insert(id.into(), MEMBER_MARKER).is_none()
    }

    /// Remove a member
    pub fn remove(&mut self, id: &str) -> bool {
        self.members.remove(id).is_some()
    }

    /// Number of listed members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the catalog lists nothing
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterate member ids in sorted order
    pub fn member_ids(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    /// Consume the catalog into its member ids
    pub fn into_member_ids(self) -> Vec<String> {
        self.members.into_keys().collect()
    }

    /// Expiry (seconds, 0 = none) to store a catalog with after writing a
    /// member that lives for `entry_ttl` seconds
    ///
    /// `cap` is the configured catalog duration, 0 meaning unbounded. The
    /// entry's TTL wins when it is infinite or longer than a non-zero cap so
    /// the catalog never expires before a member it lists; otherwise the cap
    /// applies.
    pub fn ttl_for(entry_ttl: u64, cap: u64) -> u64 {
        if (entry_ttl == 0 || entry_ttl > cap) && cap != 0 {
            entry_ttl
        } else {
            cap
        }
    }
}

impl<S: Into<String>> FromIterator<S> for Catalog {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for id in iter {
            catalog.insert(id);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JsonSerializer;

    #[test]
    fn test_insert_is_idempotent() {
        let mut catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.insert("app:users:u1"));
        assert!(!catalog.insert("app:users:u1"));
        assert_eq!(catalog.member_ids().collect::<Vec<_>>(), vec!["app:users:u1"]);
    }

    #[test]
    fn test_remove() {
        let mut catalog: Catalog = ["a", "b", "c"].into_iter().collect();
        assert!(catalog.remove("b"));
        assert!(!catalog.remove("b"));
        assert_eq!(catalog.into_member_ids(), vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_wire_format_is_plain_map() {
        let catalog: Catalog = ["x:1", "x:2"].into_iter().collect();
        let bytes = catalog.encode(&JsonSerializer).unwrap();
        assert_eq!(bytes, br#"{"x:1":1,"x:2":1}"#.to_vec());
    }

    #[test]
    fn test_decode_stored_catalog() {
        let catalog: Catalog = ["x:1", "x:2"].into_iter().collect();
        let bytes = catalog.encode(&JsonSerializer).unwrap();
        assert_eq!(Catalog::decode(&JsonSerializer, Some(bytes.as_slice())), catalog);
    }

    #[test]
    fn test_decode_absent_is_empty() {
        assert!(Catalog::decode(&JsonSerializer, None).is_empty());
    }

    #[test]
    fn test_decode_malformed_is_empty() {
        assert!(Catalog::decode(&JsonSerializer, Some(&b"garbage"[..])).is_empty());
        assert!(Catalog::decode(&JsonSerializer, Some(&b"[1,2,3]"[..])).is_empty());
        assert!(Catalog::decode(&JsonSerializer, Some(&b"42"[..])).is_empty());
    }

    #[test]
    fn test_ttl_for_within_cap_uses_cap() {
        assert_eq!(Catalog::ttl_for(60, 3600), 3600);
        assert_eq!(Catalog::ttl_for(3600, 3600), 3600);
    }

    #[test]
    fn test_ttl_for_longer_than_cap_uses_entry_ttl() {
        assert_eq!(Catalog::ttl_for(7200, 3600), 7200);
    }

    #[test]
    fn test_ttl_for_infinite_entry_is_infinite() {
        assert_eq!(Catalog::ttl_for(0, 3600), 0);
    }

    #[test]
    fn test_ttl_for_unbounded_cap_is_infinite() {
        assert_eq!(Catalog::ttl_for(60, 0), 0);
        assert_eq!(Catalog::ttl_for(0, 0), 0);
    }
}
