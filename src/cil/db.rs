//! Policy database
//!
//! The output of a successful build: the typed AST rooted at a synthetic
//! node, the global scope's symbol tables, and the database-wide flags.
//! Resolution and ordering passes operate on this structure afterwards.

use crate::cil::ast::{AstData, AstNode};
use crate::cil::symtab::SymtabSet;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Db {
    /// The synthetic root; its children are the top-level statements in
    /// source order.
    pub root: AstNode,
    /// Symbol tables of the global scope. Container scopes carry their own
    /// tables inside their datums.
    pub symtab: SymtabSet,
    /// Set by an `(mls true)` statement; defaults to off.
    pub mls: bool,
}

impl Db {
    pub fn new() -> Self {
        Self {
            root: AstNode::new(AstData::Root, 0),
            symtab: SymtabSet::new(),
            mls: false,
        }
    }
}

impl Default for Db {
    fn default() -> Self {
        Self::new()
    }
}
