//! Store-level identifier generation

/// Marker segment separating catalog ids from member ids
pub const CATALOG_SEGMENT: &str = "__catalog__";

/// Deterministic mapping from logical names to store ids
///
/// Both functions must be pure: the same inputs give the same id across
/// processes and restarts, otherwise catalogs written by one process can't be
/// found by another.
pub trait IdGenerator: Send + Sync + Clone + 'static {
    /// Id of the entry for `key` inside `group`
    fn member_id(&self, group: &str, key: &str) -> String;

    /// Id of the catalog indexing `group`
    fn catalog_id(&self, group: &str) -> String;
}

/// Default id scheme
///
/// - members: `schema:group:key`
/// - catalogs: `schema:__catalog__:group`
///
/// The schema segment is dropped when empty. A group literally named
/// `__catalog__` can collide with catalog ids and should not be used.
///
/// Segments are joined with `:` as-is, so `("a:b", "c")` and `("a", "b:c")`
/// map to the same member id. Keep `:` out of group names, or out of keys,
/// when such pairs could otherwise coexist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaIdGenerator {
    schema: String,
}

impl SchemaIdGenerator {
    /// Create a generator prefixing every id with `schema`
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
        }
    }

    /// The schema prefix
    pub fn schema(&self) -> &str {
        &self.schema
    }

    fn join(&self, first: &str, second: &str) -> String {
        if self.schema.is_empty() {
            format!("{}:{}", first, second)
        } else {
            format!("{}:{}:{}", self.schema, first, second)
        }
    }
}

impl IdGenerator for SchemaIdGenerator {
    fn member_id(&self, group: &str, key: &str) -> String {
        self.join(group, key)
    }

    fn catalog_id(&self, group: &str) -> String {
        self.join(CATALOG_SEGMENT, group)
    }
}
