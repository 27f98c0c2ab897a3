//! Error types for AST construction
//!
//! The build stage works from one closed taxonomy of failures. Every
//! statement generator returns a [`BuildError`]; there is no local recovery.
//! The first error anywhere in the walk is fatal to the whole build and the
//! caller is expected to discard the database it was building into.

use std::fmt;

/// The kind of a build failure, independent of where it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildErrorKind {
    /// Fewer operands present than the statement requires. Carries a short
    /// description of what was expected.
    MissingOperand(&'static str),
    /// A parenthesized sub-list was found where a bare atom is required.
    UnexpectedList(&'static str),
    /// A bare atom was found where a parenthesized sub-list is required.
    ExpectedList(&'static str),
    /// More operands present than the statement allows.
    TrailingOperands,
    /// Keyword not recognized where a statement is expected.
    UnknownStatement(String),
    /// Keyword not recognized where an expression operator is expected.
    UnknownOperator(String),
    /// A token failed literal validation (malformed IP address, non-numeric
    /// port, bad boolean literal, a declared name containing `.`, ...).
    InvalidLiteral {
        kind: &'static str,
        value: String,
    },
    /// The two sides of a constraint comparison are not a legal combination.
    InvalidOperandPairing {
        left: String,
        right: String,
    },
    /// An operator or operand keyword that exists in the language but is not
    /// valid for this expression flavor (e.g. `l1` in a non-MLS constrain).
    FlavorMismatch(String),
    /// Re-declaration of a name already present in the same scope's table.
    DuplicateEntry(String),
    /// A statement that is syntactically valid but not allowed inside the
    /// enclosing container (e.g. `macro` inside `optional`).
    StatementNotAllowed {
        keyword: String,
        container: &'static str,
    },
}

impl fmt::Display for BuildErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildErrorKind::MissingOperand(what) => write!(f, "missing {}", what),
            BuildErrorKind::UnexpectedList(what) => {
                write!(f, "expected {} to be a token, found a list", what)
            }
            BuildErrorKind::ExpectedList(what) => {
                write!(f, "expected {} to be a list, found a token", what)
            }
            BuildErrorKind::TrailingOperands => write!(f, "too many operands"),
            BuildErrorKind::UnknownStatement(kw) => write!(f, "unknown statement '{}'", kw),
            BuildErrorKind::UnknownOperator(kw) => {
                write!(f, "unknown expression operator '{}'", kw)
            }
            BuildErrorKind::InvalidLiteral { kind, value } => {
                write!(f, "invalid {} '{}'", kind, value)
            }
            BuildErrorKind::InvalidOperandPairing { left, right } => {
                write!(f, "invalid operand pairing '{}' / '{}'", left, right)
            }
            BuildErrorKind::FlavorMismatch(kw) => {
                write!(f, "'{}' is not valid in this expression", kw)
            }
            BuildErrorKind::DuplicateEntry(name) => {
                write!(f, "'{}' is already declared in this scope", name)
            }
            BuildErrorKind::StatementNotAllowed { keyword, container } => {
                write!(f, "'{}' is not allowed in {}", keyword, container)
            }
        }
    }
}

/// A build failure plus the source line of the offending parse node.
///
/// The line is carried verbatim from the parse tree and is only used for
/// reporting; the source path lives on the [`ParseTree`](crate::cil::parsing::ParseTree)
/// the failing build was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildError {
    pub kind: BuildErrorKind,
    pub line: u32,
}

impl BuildError {
    pub fn new(kind: BuildErrorKind, line: u32) -> Self {
        Self { kind, line }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl std::error::Error for BuildError {}
