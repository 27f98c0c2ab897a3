//! Testing utilities
//!
//! # Build Testing Guidelines
//!
//! Tests of the build stage should go through source text, not hand-built
//! parse trees. The reader is trivial and stable, and a test written as a
//! CIL snippet stays readable when a statement's shape changes.
//!
//! Two factories cover almost every test:
//!
//! - [`parse_source`] for tests of the reader itself
//! - [`build_source`] for everything downstream; unwrap it when the snippet
//!   is expected to be valid, match on the error kind otherwise
//!
//! Assert on the typed datums, not on dump output. [`node_at`] digs a node
//! out of the tree by child indexes so a test can reach a nested statement
//! in one line.

use crate::cil::ast::AstNode;
use crate::cil::build::build_ast;
use crate::cil::db::Db;
use crate::cil::error::BuildError;
use crate::cil::parsing::{read_tree, ParseTree};

/// Read a snippet into a parse tree, panicking on reader errors.
pub fn parse_source(source: &str) -> ParseTree {
    match read_tree(source, "<test>") {
        Ok(tree) => tree,
        Err(err) => panic!("test source failed to read: {}", err),
    }
}

/// Read and build a snippet.
pub fn build_source(source: &str) -> Result<Db, BuildError> {
    build_ast(&parse_source(source))
}

/// The node reached by following `path` as child indexes from the root.
pub fn node_at<'a>(db: &'a Db, path: &[usize]) -> &'a AstNode {
    let mut node = &db.root;
    for &i in path {
        node = node
            .children
            .get(i)
            .unwrap_or_else(|| panic!("no child {} under '{}'", i, node.kind_name()));
    }
    node
}
