//! Property-based tests for the expression stack builder: any boolean
//! expression tree, rendered back to source, builds to a well-formed
//! postfix stack that mirrors the tree.

use cil::cil::ast::AstData;
use cil::cil::expr::{ExprOp, ExprToken};
use cil::cil::testing::{build_source, node_at};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Tree {
    Name(String),
    Unary(ExprOp, Box<Tree>),
    Binary(ExprOp, Box<Tree>, Box<Tree>),
}

impl Tree {
    fn render(&self) -> String {
        match self {
            Tree::Name(name) => name.clone(),
            Tree::Unary(op, a) => format!("({} {})", op.keyword(), a.render()),
            Tree::Binary(op, a, b) => {
                format!("({} {} {})", op.keyword(), a.render(), b.render())
            }
        }
    }

    /// The postfix translation, derived independently of the builder.
    fn postfix(&self, out: &mut Vec<ExprToken>) {
        match self {
            Tree::Name(name) => out.push(ExprToken::Operand(name.clone())),
            Tree::Unary(op, a) => {
                a.postfix(out);
                out.push(ExprToken::Op(*op));
            }
            Tree::Binary(op, a, b) => {
                a.postfix(out);
                b.postfix(out);
                out.push(ExprToken::Op(*op));
            }
        }
    }
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}".prop_filter("operator keywords are not operands", |s| {
        !matches!(
            s.as_str(),
            "not" | "and" | "or" | "xor" | "eq" | "neq" | "dom" | "domby" | "incomp"
        )
    })
}

fn tree_strategy() -> impl Strategy<Value = Tree> {
    let leaf = name_strategy().prop_map(Tree::Name);
    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|a| Tree::Unary(ExprOp::Not, Box::new(a))),
            (
                prop_oneof![
                    Just(ExprOp::And),
                    Just(ExprOp::Or),
                    Just(ExprOp::Xor),
                    Just(ExprOp::Eq),
                    Just(ExprOp::Neq),
                ],
                inner.clone(),
                inner,
            )
                .prop_map(|(op, a, b)| Tree::Binary(op, Box::new(a), Box::new(b))),
        ]
    })
}

/// Replay the stack machine: operands push one value, operators pop their
/// arity and push one. A well-formed stack ends with exactly one value.
fn is_well_formed(stack: &[ExprToken]) -> bool {
    let mut depth: i64 = 0;
    for token in stack {
        match token {
            ExprToken::Operand(_) => depth += 1,
            ExprToken::Op(ExprOp::Not) => {
                if depth < 1 {
                    return false;
                }
            }
            ExprToken::Op(_) => {
                if depth < 2 {
                    return false;
                }
                depth -= 1;
            }
        }
    }
    depth == 1
}

proptest! {
    #[test]
    fn test_boolean_expression_round_trips_to_postfix(tree in tree_strategy()) {
        let source = format!(
            "(booleanif {} (true (allow a b (c (read)))))",
            tree.render()
        );
        let db = build_source(&source).unwrap();
        let expr = match &node_at(&db, &[0]).data {
            AstData::BooleanIf(cond) => cond.expr.clone(),
            other => panic!("expected booleanif, got {}", other.kind_name()),
        };

        let mut expected = Vec::new();
        tree.postfix(&mut expected);
        prop_assert_eq!(&expr, &expected);
        prop_assert!(is_well_formed(&expr));
    }
}
