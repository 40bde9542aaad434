//! Identity handling for records and entities
//!
//! Every record and entity carries a process-unique 128-bit identity assigned
//! at creation and never reused. The [`IdentityMap`] memoizes translation
//! results within one run; the [`UntranslatedSet`] collects records the run
//! produced nothing for.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use uuid::Uuid;

use crate::error::{BridgeError, Result};

/// Process-unique, immutable 128-bit identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordIdentity(Uuid);

impl RecordIdentity {
    /// Mint a fresh identity
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One-to-one, append-only map between source and target identities.
///
/// Populated during a single run and reset at run start. At most one target
/// entity per source record and vice versa; duplicate registration on either
/// side is rejected.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct IdentityMap {
    forward: HashMap<RecordIdentity, RecordIdentity>,
    reverse: HashMap<RecordIdentity, RecordIdentity>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source → target pairing
    pub fn insert(&mut self, source: RecordIdentity, target: RecordIdentity) -> Result<()> {
        if self.forward.contains_key(&source) {
            return Err(BridgeError::DuplicateMapping {
                identity: source.to_string(),
            });
        }
        if self.reverse.contains_key(&target) {
            return Err(BridgeError::DuplicateMapping {
                identity: target.to_string(),
            });
        }
        self.forward.insert(source, target);
        self.reverse.insert(target, source);
        Ok(())
    }

    /// Look up the target mapped to a source identity
    pub fn target_of(&self, source: RecordIdentity) -> Option<RecordIdentity> {
        self.forward.get(&source).copied()
    }

    /// Look up the source mapped to a target identity
    pub fn source_of(&self, target: RecordIdentity) -> Option<RecordIdentity> {
        self.reverse.get(&target).copied()
    }

    pub fn contains_source(&self, source: RecordIdentity) -> bool {
        self.forward.contains_key(&source)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

/// Records (or entities) that produced no counterpart and were not explicitly
/// ignored. First-encounter order, deduplicated.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct UntranslatedSet {
    order: Vec<RecordIdentity>,
    #[serde(skip)]
    seen: HashSet<RecordIdentity>,
}

impl UntranslatedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an identity; repeats are dropped
    pub fn insert(&mut self, identity: RecordIdentity) {
        if self.seen.insert(identity) {
            self.order.push(identity);
        }
    }

    pub fn contains(&self, identity: RecordIdentity) -> bool {
        self.seen.contains(&identity)
    }

    /// Identities in first-encounter order
    pub fn iter(&self) -> impl Iterator<Item = RecordIdentity> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identities_are_unique() {
        let a = RecordIdentity::new();
        let b = RecordIdentity::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_map_is_one_to_one() {
        let mut map = IdentityMap::new();
        let (s, t) = (RecordIdentity::new(), RecordIdentity::new());
        map.insert(s, t).unwrap();
        assert_eq!(map.target_of(s), Some(t));
        assert_eq!(map.source_of(t), Some(s));

        // Same source again
        assert!(map.insert(s, RecordIdentity::new()).is_err());
        // Same target again
        assert!(map.insert(RecordIdentity::new(), t).is_err());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_untranslated_dedup_preserves_order() {
        let mut set = UntranslatedSet::new();
        let (a, b) = (RecordIdentity::new(), RecordIdentity::new());
        set.insert(a);
        set.insert(b);
        set.insert(a);
        assert_eq!(set.len(), 2);
        let order: Vec<_> = set.iter().collect();
        assert_eq!(order, vec![a, b]);
    }
}
