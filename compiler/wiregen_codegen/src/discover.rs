//! Type reachability walker.
//!
//! Walks the schema graph from a root record, collecting every record type
//! reachable through classified members. The discovered set is insertion
//! ordered and deduplicated by type identity; that identity check is the
//! whole cycle story - mutually referencing records are each appended once
//! and the walk terminates because the set only grows and the schema is
//! finite. Output order is discovery order, never lexical order: emission
//! depends on it.

use rustc_hash::FxHashSet;
use wiregen_diagnostic::SchemaError;
use wiregen_ir::{SchemaArena, TypeId};

use crate::classify::{classify, MemberShape};

/// Insertion-ordered set of discovered record types.
#[derive(Clone, Debug, Default)]
pub struct DiscoveredTypes {
    order: Vec<TypeId>,
    seen: FxHashSet<TypeId>,
}

impl DiscoveredTypes {
    fn insert(&mut self, id: TypeId) -> bool {
        if self.seen.insert(id) {
            self.order.push(id);
            true
        } else {
            false
        }
    }

    /// Membership test, by identity.
    pub fn contains(&self, id: TypeId) -> bool {
        self.seen.contains(&id)
    }

    /// Discovered types, in discovery order.
    pub fn as_slice(&self) -> &[TypeId] {
        &self.order
    }

    /// Iterate in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.order.iter().copied()
    }

    /// Number of discovered types.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check whether nothing was discovered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Discover every record type reachable from `root`, including `root`
/// itself, in discovery order.
///
/// # Errors
/// Propagates the first classification failure encountered anywhere in the
/// reachable graph; discovery for this root is abandoned.
pub fn discover(arena: &SchemaArena, root: TypeId) -> Result<DiscoveredTypes, SchemaError> {
    let mut discovered = DiscoveredTypes::default();
    discovered.insert(root);

    // The order vec doubles as the worklist: types appended mid-walk are
    // themselves processed, in insertion order.
    let mut next = 0;
    while next < discovered.order.len() {
        let current = discovered.order[next];
        next += 1;

        for member in classify(arena, current)? {
            if let MemberShape::Record(nested) = member.shape {
                discovered.insert(nested);
            }
        }
    }

    Ok(discovered)
}
