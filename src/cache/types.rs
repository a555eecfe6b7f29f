use std::sync::Arc;

use crate::hashing::{ContentHash, hash_text};
use crate::model::EntityKind;

/// Shared, immutable embedding vector.
pub type Vector = Arc<[f32]>;

/// Identity of one cached embedding: who it belongs to and what text it was
/// computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    pub kind: EntityKind,
    pub entity_id: u64,
    pub hash: ContentHash,
}

impl CacheKey {
    #[inline]
    pub fn new(kind: EntityKind, entity_id: u64, hash: ContentHash) -> Self {
        Self {
            kind,
            entity_id,
            hash,
        }
    }

    /// Builds the key for `text` by hashing it.
    #[inline]
    pub fn for_text(kind: EntityKind, entity_id: u64, text: &str) -> Self {
        Self::new(kind, entity_id, hash_text(text))
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.kind, self.entity_id, self.hash)
    }
}

/// Where a resolved vector came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheStatus {
    HitL1,
    HitStore,
    Miss,
}

impl CacheStatus {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::HitL1 => "HIT_L1",
            CacheStatus::HitStore => "HIT_STORE",
            CacheStatus::Miss => "MISS",
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        !matches!(self, CacheStatus::Miss)
    }
}

impl std::fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
