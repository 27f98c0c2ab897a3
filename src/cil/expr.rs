//! Expression stack builder
//!
//! Translates a parenthesized boolean or constraint expression into a flat
//! postfix sequence of operand and operator tokens, suitable for a later
//! stack-machine evaluator. `(and a b)` becomes `[a, b, and]`; `(not (neq
//! l1 l2))` becomes `[l1, l2, neq, not]`.
//!
//! The operator vocabulary depends on the expression flavor:
//!
//! - boolean (`booleanif`/`tunableif` conditions): `not`, `and`, `or`,
//!   `xor`, `eq`, `neq`, over boolean names
//! - constraint (`constrain`/`mlsconstrain`): `not`, `and`, `or`, plus the
//!   leaf comparisons `eq`, `neq`, `dom`, `domby`, `incomp` whose two sides
//!   must satisfy the operand pairing rules below
//! - set (`typeattributeset`): `not`, `and`, `or` over type/attribute names
//!
//! Constraint comparisons relate a policy keyword (`t1`, `r2`, `l1`, ...)
//! to either a concrete name or another keyword. Only some combinations are
//! meaningful, and the level keywords are rejected outright in non-MLS
//! constraints. Which names actually resolve is the resolver's problem; the
//! shape and pairing checks happen here.

use crate::cil::error::{BuildError, BuildErrorKind};
use crate::cil::parsing::{ParseNode, ParseValue};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Operators that may appear in an expression, across all flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExprOp {
    Not,
    And,
    Or,
    Xor,
    Eq,
    Neq,
    Dom,
    DomBy,
    Incomp,
}

impl ExprOp {
    pub fn keyword(self) -> &'static str {
        match self {
            ExprOp::Not => "not",
            ExprOp::And => "and",
            ExprOp::Or => "or",
            ExprOp::Xor => "xor",
            ExprOp::Eq => "eq",
            ExprOp::Neq => "neq",
            ExprOp::Dom => "dom",
            ExprOp::DomBy => "domby",
            ExprOp::Incomp => "incomp",
        }
    }

    fn arity(self) -> usize {
        match self {
            ExprOp::Not => 1,
            _ => 2,
        }
    }

    /// Comparison operators whose operands are atoms, not sub-expressions.
    fn is_leaf_comparison(self) -> bool {
        matches!(
            self,
            ExprOp::Eq | ExprOp::Neq | ExprOp::Dom | ExprOp::DomBy | ExprOp::Incomp
        )
    }
}

impl fmt::Display for ExprOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// One token of the flattened postfix sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ExprToken {
    Operand(String),
    Op(ExprOp),
}

/// Which expression grammar applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprFlavor {
    Bool,
    Constrain,
    MlsConstrain,
    Set,
}

impl ExprFlavor {
    fn operator(self, keyword: &str) -> Option<ExprOp> {
        let op = match keyword {
            "not" => ExprOp::Not,
            "and" => ExprOp::And,
            "or" => ExprOp::Or,
            "xor" => ExprOp::Xor,
            "eq" => ExprOp::Eq,
            "neq" => ExprOp::Neq,
            "dom" => ExprOp::Dom,
            "domby" => ExprOp::DomBy,
            "incomp" => ExprOp::Incomp,
            _ => return None,
        };
        let allowed = match self {
            ExprFlavor::Bool => matches!(
                op,
                ExprOp::Not | ExprOp::And | ExprOp::Or | ExprOp::Xor | ExprOp::Eq | ExprOp::Neq
            ),
            ExprFlavor::Constrain | ExprFlavor::MlsConstrain => !matches!(op, ExprOp::Xor),
            ExprFlavor::Set => matches!(op, ExprOp::Not | ExprOp::And | ExprOp::Or),
        };
        allowed.then_some(op)
    }
}

/// The constraint operand keywords, bucketed by what they stand for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConsOperand {
    U1,
    U2,
    U3,
    R1,
    R2,
    R3,
    T1,
    T2,
    T3,
    L1,
    L2,
    H1,
    H2,
}

static CONS_OPERANDS: Lazy<HashMap<&'static str, ConsOperand>> = Lazy::new(|| {
    HashMap::from([
        ("u1", ConsOperand::U1),
        ("u2", ConsOperand::U2),
        ("u3", ConsOperand::U3),
        ("r1", ConsOperand::R1),
        ("r2", ConsOperand::R2),
        ("r3", ConsOperand::R3),
        ("t1", ConsOperand::T1),
        ("t2", ConsOperand::T2),
        ("t3", ConsOperand::T3),
        ("l1", ConsOperand::L1),
        ("l2", ConsOperand::L2),
        ("h1", ConsOperand::H1),
        ("h2", ConsOperand::H2),
    ])
});

impl ConsOperand {
    fn is_level(self) -> bool {
        matches!(
            self,
            ConsOperand::L1 | ConsOperand::L2 | ConsOperand::H1 | ConsOperand::H2
        )
    }

    fn is_third(self) -> bool {
        matches!(self, ConsOperand::U3 | ConsOperand::R3 | ConsOperand::T3)
    }
}

/// Append the postfix translation of `node` to `stack`.
///
/// `node` is either a bare atom (the base case: a boolean name, or a
/// constraint operand keyword) or a list headed by an operator keyword.
/// On error the tokens already pushed are left in `stack`; the caller
/// discards the whole buffer.
pub fn build_expr_stack(
    node: &ParseNode,
    flavor: ExprFlavor,
    stack: &mut Vec<ExprToken>,
) -> Result<(), BuildError> {
    let items = match &node.value {
        ParseValue::Token(text) => {
            stack.push(ExprToken::Operand(text.to_string()));
            return Ok(());
        }
        ParseValue::List(items) => items,
    };
    let head = items.first().ok_or_else(|| {
        BuildError::new(
            BuildErrorKind::MissingOperand("expression operator"),
            node.line,
        )
    })?;
    let keyword = head.as_token().ok_or_else(|| {
        BuildError::new(
            BuildErrorKind::UnknownOperator("<list>".to_string()),
            head.line,
        )
    })?;
    let op = flavor.operator(keyword).ok_or_else(|| {
        BuildError::new(BuildErrorKind::UnknownOperator(keyword.to_string()), head.line)
    })?;

    let operands = &items[1..];
    if operands.len() < op.arity() {
        return Err(BuildError::new(
            BuildErrorKind::MissingOperand("expression operand"),
            node.line,
        ));
    }
    if operands.len() > op.arity() {
        return Err(BuildError::new(BuildErrorKind::TrailingOperands, node.line));
    }

    let constraint = matches!(flavor, ExprFlavor::Constrain | ExprFlavor::MlsConstrain);
    if constraint && op.is_leaf_comparison() {
        let left = operands[0].as_token().ok_or_else(|| {
            BuildError::new(
                BuildErrorKind::UnexpectedList("constraint operand"),
                operands[0].line,
            )
        })?;
        let right = operands[1].as_token().ok_or_else(|| {
            BuildError::new(
                BuildErrorKind::UnexpectedList("constraint operand"),
                operands[1].line,
            )
        })?;
        check_constraint_pair(left, right, op, flavor, node.line)?;
        stack.push(ExprToken::Operand(left.to_string()));
        stack.push(ExprToken::Operand(right.to_string()));
        stack.push(ExprToken::Op(op));
        return Ok(());
    }

    for operand in operands {
        build_expr_stack(operand, flavor, stack)?;
    }
    stack.push(ExprToken::Op(op));
    Ok(())
}

/// Validate the two sides of a constraint comparison.
///
/// The legality table, where an entry not listed is rejected:
///
/// - `u1 eq|neq u2`, `r1 OP r2`, `t1 eq|neq t2`
/// - `u1|u2|r1|r2|t1|t2 OP <name>`
/// - level family: right `l2` pairs with left `l1|h1`; right `h1` pairs
///   with left `l1`; right `h2` pairs with left `l1|l2|h1`
///
/// Non-MLS constraints reject the level keywords entirely.
fn check_constraint_pair(
    left: &str,
    right: &str,
    op: ExprOp,
    flavor: ExprFlavor,
    line: u32,
) -> Result<(), BuildError> {
    let pairing_err = || {
        BuildError::new(
            BuildErrorKind::InvalidOperandPairing {
                left: left.to_string(),
                right: right.to_string(),
            },
            line,
        )
    };

    let l = CONS_OPERANDS.get(left).copied();
    let r = CONS_OPERANDS.get(right).copied();

    if flavor == ExprFlavor::Constrain {
        for (kw, operand) in [(left, l), (right, r)] {
            if operand.is_some_and(ConsOperand::is_level) {
                return Err(BuildError::new(
                    BuildErrorKind::FlavorMismatch(kw.to_string()),
                    line,
                ));
            }
        }
    }

    // The left side must be an operand keyword; the u3/r3/t3 family belongs
    // to validatetrans rules, which this dialect does not have.
    let l = l.ok_or_else(pairing_err)?;
    if l.is_third() {
        return Err(BuildError::new(
            BuildErrorKind::FlavorMismatch(left.to_string()),
            line,
        ));
    }

    let Some(r) = r else {
        // Right side is a concrete user/role/type name; the level keywords
        // have nothing to compare a bare name against.
        if l.is_level() {
            return Err(pairing_err());
        }
        return Ok(());
    };

    match r {
        ConsOperand::U2 => {
            if l != ConsOperand::U1 || !matches!(op, ExprOp::Eq | ExprOp::Neq) {
                return Err(pairing_err());
            }
        }
        ConsOperand::R2 => {
            if l != ConsOperand::R1 {
                return Err(pairing_err());
            }
        }
        ConsOperand::T2 => {
            if l != ConsOperand::T1 || !matches!(op, ExprOp::Eq | ExprOp::Neq) {
                return Err(pairing_err());
            }
        }
        ConsOperand::L2 => {
            if !matches!(l, ConsOperand::L1 | ConsOperand::H1) {
                return Err(pairing_err());
            }
        }
        ConsOperand::H1 => {
            if l != ConsOperand::L1 {
                return Err(pairing_err());
            }
        }
        ConsOperand::H2 => {
            if !matches!(l, ConsOperand::L1 | ConsOperand::L2 | ConsOperand::H1) {
                return Err(pairing_err());
            }
        }
        // u1/r1/t1/l1 never appear on the right, and u3/r3/t3 never appear
        // at all in this dialect.
        _ => return Err(pairing_err()),
    }
    Ok(())
}

/// Translate a `typeattributeset` expression list.
///
/// The list is either a flat sequence of type/attribute names (an implicit
/// union) or a single `and`/`or`/`not` expression. A nested list that is
/// not operator-headed is rejected.
pub fn build_set_expr(node: &ParseNode) -> Result<Vec<ExprToken>, BuildError> {
    let items = node.as_list().ok_or_else(|| {
        BuildError::new(
            BuildErrorKind::ExpectedList("attribute set expression"),
            node.line,
        )
    })?;
    if items.is_empty() {
        return Err(BuildError::new(
            BuildErrorKind::MissingOperand("type or attribute name"),
            node.line,
        ));
    }

    let mut stack = Vec::new();
    let head_is_operator = items[0]
        .as_token()
        .is_some_and(|kw| ExprFlavor::Set.operator(kw).is_some());
    if head_is_operator {
        build_expr_stack(node, ExprFlavor::Set, &mut stack)?;
    } else {
        for item in items {
            let name = item.as_token().ok_or_else(|| {
                BuildError::new(
                    BuildErrorKind::UnexpectedList("type or attribute name"),
                    item.line,
                )
            })?;
            stack.push(ExprToken::Operand(name.to_string()));
        }
    }
    Ok(stack)
}
