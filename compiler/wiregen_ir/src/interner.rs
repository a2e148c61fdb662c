//! Name interner for identifier storage.
//!
//! Schemas carry far fewer distinct identifiers than a source language, so a
//! single storage table behind one lock is enough. Interned strings are
//! leaked to `'static`, which keeps lookups allocation-free; the table lives
//! as long as the process, matching the lifetime of a schema snapshot.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Interned identifier.
///
/// Equality and hashing are O(1) integer operations; two `Name`s are equal
/// exactly when they were interned from the same string.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Name(u32);

impl Name {
    /// Index into the interner's storage table.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

struct InternTable {
    /// Map from string content to index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents.
    strings: Vec<&'static str>,
}

/// Interner mapping identifier strings to `Name`s.
///
/// # Thread Safety
/// Uses an `RwLock` for concurrent read/write access, so a shared schema
/// snapshot can be consulted from parallel compilation workers.
pub struct NameInterner {
    table: RwLock<InternTable>,
}

impl NameInterner {
    /// Create an empty interner.
    pub fn new() -> Self {
        NameInterner {
            table: RwLock::new(InternTable {
                map: FxHashMap::default(),
                strings: Vec::with_capacity(64),
            }),
        }
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if the interner exceeds `u32::MAX` distinct strings.
    pub fn intern(&self, s: &str) -> Name {
        // Fast path: already interned
        {
            let guard = self.table.read();
            if let Some(&idx) = guard.map.get(s) {
                return Name(idx);
            }
        }

        let mut guard = self.table.write();

        // Double-check after acquiring the write lock
        if let Some(&idx) = guard.map.get(s) {
            return Name(idx);
        }

        // Leak the string to get 'static lifetime
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());

        let idx = u32::try_from(guard.strings.len()).unwrap_or_else(|_| {
            panic!("name interner exceeded u32::MAX strings")
        });
        guard.strings.push(leaked);
        guard.map.insert(leaked, idx);

        Name(idx)
    }

    /// Look up the string for a Name.
    ///
    /// # Panics
    /// Panics if `name` did not come from this interner.
    #[track_caller]
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table.read().strings[name.index()]
    }

    /// Number of distinct interned strings.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Check whether nothing has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for NameInterner {
    fn default() -> Self {
        Self::new()
    }
}
