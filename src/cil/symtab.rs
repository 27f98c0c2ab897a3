//! Scoped symbol tables
//!
//! Declarations in CIL are namespaced twice over: once by lexical scope
//! (each `block`, `macro`, and `optional` owns its own set of tables, as
//! does the policy root) and once by kind (types and roles named `foo` can
//! coexist). A [`SymtabSet`] is the per-scope bundle, one [`Symtab`] per
//! [`SymKind`] namespace.
//!
//! During the build pass the tables are only ever used to detect duplicate
//! declarations at insert time; lookup and iteration belong to the later
//! resolution stage. Entries therefore carry just enough to report a
//! conflict: the declaring statement keyword and the line it appeared on.

use serde::Serialize;
use std::collections::HashMap;

/// The declaration namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SymKind {
    /// `block`, `macro`, and `optional` share one namespace so that `call`
    /// and `blockinherit` references are unambiguous.
    Blocks,
    Classes,
    Commons,
    ClassPermSets,
    PermSets,
    Sids,
    Types,
    Roles,
    Users,
    Bools,
    Tunables,
    Sens,
    Cats,
    CatSets,
    Levels,
    LevelRanges,
    Contexts,
    PolicyCaps,
    IpAddrs,
}

impl SymKind {
    pub const ALL: [SymKind; 19] = [
        SymKind::Blocks,
        SymKind::Classes,
        SymKind::Commons,
        SymKind::ClassPermSets,
        SymKind::PermSets,
        SymKind::Sids,
        SymKind::Types,
        SymKind::Roles,
        SymKind::Users,
        SymKind::Bools,
        SymKind::Tunables,
        SymKind::Sens,
        SymKind::Cats,
        SymKind::CatSets,
        SymKind::Levels,
        SymKind::LevelRanges,
        SymKind::Contexts,
        SymKind::PolicyCaps,
        SymKind::IpAddrs,
    ];
}

/// What a table remembers about a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymEntry {
    /// Keyword of the declaring statement (`"type"`, `"macro"`, ...).
    pub declared_by: &'static str,
    pub line: u32,
}

/// Insert collision; the duplicate-name error the build layer reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateName {
    pub name: String,
}

/// One keyed namespace within one scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Symtab {
    entries: HashMap<String, SymEntry>,
}

impl Symtab {
    pub fn insert(&mut self, name: &str, entry: SymEntry) -> Result<(), DuplicateName> {
        if self.entries.contains_key(name) {
            return Err(DuplicateName {
                name: name.to_string(),
            });
        }
        self.entries.insert(name.to_string(), entry);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&SymEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The bundle of per-namespace tables owned by one scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SymtabSet {
    tables: HashMap<SymKind, Symtab>,
}

impl SymtabSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self, kind: SymKind) -> Option<&Symtab> {
        self.tables.get(&kind)
    }

    pub fn table_mut(&mut self, kind: SymKind) -> &mut Symtab {
        self.tables.entry(kind).or_default()
    }

    pub fn insert(
        &mut self,
        kind: SymKind,
        name: &str,
        entry: SymEntry,
    ) -> Result<(), DuplicateName> {
        self.table_mut(kind).insert(name, entry)
    }

    pub fn contains(&self, kind: SymKind, name: &str) -> bool {
        self.table(kind).is_some_and(|t| t.contains(name))
    }
}
