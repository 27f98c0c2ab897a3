//! Integration tests for the type/role/user/sid declarations, the
//! access-vector and type rules, and the statement arity contracts.

use cil::cil::ast::classes::PermSet;
use cil::cil::ast::rules::{AvRuleKind, TypeRuleKind};
use cil::cil::ast::{AstData, NamedOrAnon};
use cil::cil::error::BuildErrorKind;
use cil::cil::expr::{ExprOp, ExprToken};
use cil::cil::symtab::SymKind;
use cil::cil::testing::{build_source, node_at};
use rstest::rstest;

/// Every fixed-arity statement reports a missing operand when one short
/// and trailing operands when one over.
#[rstest]
#[case::type_decl("(type a)")]
#[case::typeattribute("(typeattribute a)")]
#[case::typealias("(typealias a b)")]
#[case::typebounds("(typebounds a b)")]
#[case::typepermissive("(typepermissive a)")]
#[case::role("(role a)")]
#[case::roletype("(roletype a b)")]
#[case::roleallow("(roleallow a b)")]
#[case::roletransition("(roletransition a b c d)")]
#[case::rolebounds("(rolebounds a b)")]
#[case::user("(user a)")]
#[case::userrole("(userrole a b)")]
#[case::userbounds("(userbounds a b)")]
#[case::sid("(sid a)")]
#[case::boolean("(boolean a true)")]
#[case::tunable("(tunable a true)")]
#[case::policycap("(policycap a)")]
#[case::typetransition("(typetransition a b c d)")]
#[case::typechange("(typechange a b c d)")]
#[case::typemember("(typemember a b c d)")]
#[case::nametypetransition("(nametypetransition a b c d e)")]
#[case::classcommon("(classcommon a b)")]
fn test_statement_arity(#[case] source: &str) {
    assert!(build_source(source).is_ok(), "{} should build", source);

    let short = {
        let without_last = source[..source.len() - 1].trim_end();
        let mut s = without_last.rsplitn(2, ' ').nth(1).unwrap().to_string();
        s.push(')');
        s
    };
    let err = build_source(&short).unwrap_err();
    assert!(
        matches!(err.kind, BuildErrorKind::MissingOperand(_)),
        "{} should be missing an operand, got {:?}",
        short,
        err.kind
    );

    let long = format!("{} extra)", &source[..source.len() - 1]);
    let err = build_source(&long).unwrap_err();
    assert_eq!(
        err.kind,
        BuildErrorKind::TrailingOperands,
        "{} should have trailing operands",
        long
    );
}

#[test]
fn test_list_where_name_belongs() {
    let err = build_source("(type (a))").unwrap_err();
    assert_eq!(err.kind, BuildErrorKind::UnexpectedList("type name"));
}

#[test]
fn test_allow_rule_fields() {
    let db = build_source("(allow test foo (bar (read write)))").unwrap();
    match &node_at(&db, &[0]).data {
        AstData::AvRule(rule) => {
            assert_eq!(rule.kind, AvRuleKind::Allowed);
            assert_eq!(rule.src_str, "test");
            assert_eq!(rule.tgt_str, "foo");
            match &rule.classpermset {
                NamedOrAnon::Anon(cps) => {
                    assert_eq!(cps.class_str, "bar");
                    assert_eq!(
                        cps.permset,
                        NamedOrAnon::Anon(PermSet {
                            perms: vec!["read".to_string(), "write".to_string()]
                        })
                    );
                }
                NamedOrAnon::Named(name) => panic!("expected an anonymous pair, got '{}'", name),
            }
        }
        other => panic!("expected an allow rule, got {}", other.kind_name()),
    }
}

#[rstest]
#[case("allow", AvRuleKind::Allowed)]
#[case("auditallow", AvRuleKind::AuditAllow)]
#[case("dontaudit", AvRuleKind::DontAudit)]
#[case("neverallow", AvRuleKind::NeverAllow)]
fn test_av_rule_kinds(#[case] keyword: &str, #[case] kind: AvRuleKind) {
    let db = build_source(&format!("({} a b cps)", keyword)).unwrap();
    match &node_at(&db, &[0]).data {
        AstData::AvRule(rule) => {
            assert_eq!(rule.kind, kind);
            assert_eq!(rule.classpermset, NamedOrAnon::Named("cps".to_string()));
        }
        other => panic!("expected an av rule, got {}", other.kind_name()),
    }
}

#[rstest]
#[case("typetransition", TypeRuleKind::Transition)]
#[case("typechange", TypeRuleKind::Change)]
#[case("typemember", TypeRuleKind::Member)]
fn test_type_rule_kinds(#[case] keyword: &str, #[case] kind: TypeRuleKind) {
    let db = build_source(&format!("({} src tgt cls result)", keyword)).unwrap();
    match &node_at(&db, &[0]).data {
        AstData::TypeRule(rule) => {
            assert_eq!(rule.kind, kind);
            assert_eq!(rule.src_str, "src");
            assert_eq!(rule.tgt_str, "tgt");
            assert_eq!(rule.obj_str, "cls");
            assert_eq!(rule.result_str, "result");
        }
        other => panic!("expected a type rule, got {}", other.kind_name()),
    }
}

#[test]
fn test_typealias_path_may_be_dotted_but_alias_may_not() {
    let db = build_source("(typealias blk.deep_t shallow_t)").unwrap();
    match &node_at(&db, &[0]).data {
        AstData::TypeAlias(alias) => {
            assert_eq!(alias.type_str, "blk.deep_t");
            assert_eq!(alias.name, "shallow_t");
        }
        other => panic!("expected a typealias, got {}", other.kind_name()),
    }
    assert!(db.symtab.contains(SymKind::Types, "shallow_t"));

    let err = build_source("(typealias deep_t blk.alias_t)").unwrap_err();
    assert_eq!(
        err.kind,
        BuildErrorKind::InvalidLiteral {
            kind: "name",
            value: "blk.alias_t".to_string()
        }
    );
}

#[test]
fn test_typeattributeset_flat_and_expression_forms() {
    let db = build_source("(typeattributeset attr (t1_t t2_t))").unwrap();
    match &node_at(&db, &[0]).data {
        AstData::TypeAttributeSet(set) => {
            assert_eq!(set.attr_str, "attr");
            assert_eq!(
                set.expr,
                vec![
                    ExprToken::Operand("t1_t".to_string()),
                    ExprToken::Operand("t2_t".to_string()),
                ]
            );
        }
        other => panic!("expected typeattributeset, got {}", other.kind_name()),
    }

    let db = build_source("(typeattributeset attr (and base_t (not excluded_t)))").unwrap();
    match &node_at(&db, &[0]).data {
        AstData::TypeAttributeSet(set) => {
            assert_eq!(
                set.expr,
                vec![
                    ExprToken::Operand("base_t".to_string()),
                    ExprToken::Operand("excluded_t".to_string()),
                    ExprToken::Op(ExprOp::Not),
                    ExprToken::Op(ExprOp::And),
                ]
            );
        }
        other => panic!("expected typeattributeset, got {}", other.kind_name()),
    }
}

#[rstest]
#[case("(boolean b yes)", "yes")]
#[case("(tunable t 1)", "1")]
fn test_boolean_literals_are_strict(#[case] source: &str, #[case] bad: &str) {
    let err = build_source(source).unwrap_err();
    assert_eq!(
        err.kind,
        BuildErrorKind::InvalidLiteral {
            kind: "boolean literal",
            value: bad.to_string()
        }
    );
}

#[test]
fn test_boolean_and_tunable_use_separate_namespaces() {
    let db = build_source("(boolean cond true) (tunable cond false)").unwrap();
    assert!(db.symtab.contains(SymKind::Bools, "cond"));
    assert!(db.symtab.contains(SymKind::Tunables, "cond"));
    match &node_at(&db, &[1]).data {
        AstData::Tunable(t) => assert!(!t.value),
        other => panic!("expected a tunable, got {}", other.kind_name()),
    }
}

#[test]
fn test_mls_statement_flips_the_db_flag() {
    let db = build_source("(type foo)").unwrap();
    assert!(!db.mls);
    let db = build_source("(mls true) (type foo)").unwrap();
    assert!(db.mls);
    let db = build_source("(mls false)").unwrap();
    assert!(!db.mls);
}

#[test]
fn test_error_reports_the_statement_line() {
    let err = build_source("(type ok_t)\n(role ok_r)\n(type)").unwrap_err();
    assert_eq!(err.line, 3);
    assert_eq!(err.kind, BuildErrorKind::MissingOperand("type name"));
}

#[test]
fn test_first_error_wins() {
    let err = build_source("(type)\n(role)").unwrap_err();
    assert_eq!(err.line, 1);
}
