//! Conditional statements: `booleanif`/`tunableif` with their true/false
//! branches, and the `constrain`/`mlsconstrain` statements.

use crate::cil::ast::classes::ClassPermSet;
use crate::cil::ast::NamedOrAnon;
use crate::cil::expr::ExprToken;
use serde::Serialize;

/// Shared payload of `booleanif` and `tunableif`: the condition as a
/// postfix expression stack, plus which branches were present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CondIf {
    pub expr: Vec<ExprToken>,
    pub has_true: bool,
    pub has_false: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CondKind {
    True,
    False,
}

/// A `(true ...)` or `(false ...)` branch nested under a conditional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CondBlock {
    pub kind: CondKind,
}

/// Shared payload of `constrain` and `mlsconstrain`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constrain {
    pub classpermset: NamedOrAnon<ClassPermSet>,
    pub expr: Vec<ExprToken>,
}
