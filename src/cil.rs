//! CIL front end
//!
//! The stages live in their own modules: [`lexing`] produces tokens,
//! [`parsing`] reads them into a generic parenthesized tree, and [`build`]
//! turns that tree into the typed AST inside a [`Db`]. [`compile`] chains
//! the stages for the common case of one source file.

pub mod ast;
pub mod build;
pub mod db;
pub mod error;
pub mod expr;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod symtab;
pub mod testing;

pub use build::build_ast;
pub use db::Db;
pub use error::{BuildError, BuildErrorKind};
pub use parsing::{read_tree, ParseTree, ReadError};

use std::fmt;

/// Any failure between source text and a built database.
#[derive(Debug, Clone, PartialEq)]
pub enum CilError {
    Read(ReadError),
    Build(BuildError),
}

impl fmt::Display for CilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CilError::Read(err) => write!(f, "{}", err),
            CilError::Build(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CilError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CilError::Read(err) => Some(err),
            CilError::Build(err) => Some(err),
        }
    }
}

impl From<ReadError> for CilError {
    fn from(err: ReadError) -> Self {
        CilError::Read(err)
    }
}

impl From<BuildError> for CilError {
    fn from(err: BuildError) -> Self {
        CilError::Build(err)
    }
}

/// Read one source file and build its database. `path` is carried for
/// diagnostics only.
pub fn compile(source: &str, path: &str) -> Result<Db, CilError> {
    let tree = read_tree(source, path)?;
    let db = build_ast(&tree)?;
    Ok(db)
}
