//! Integration tests for the MLS statements: sensitivities, categories,
//! levels, ranges, and their inline spellings inside user statements.

use cil::cil::ast::mls::{CatItem, Level};
use cil::cil::ast::{AstData, NamedOrAnon};
use cil::cil::error::BuildErrorKind;
use cil::cil::symtab::SymKind;
use cil::cil::testing::{build_source, node_at};

fn level(sens: &str, cats: &[&str]) -> Level {
    Level {
        sens_str: sens.to_string(),
        cats: cats.iter().map(|c| CatItem::Name(c.to_string())).collect(),
    }
}

#[test]
fn test_sensitivity_and_alias_share_a_namespace() {
    let db = build_source("(sensitivity s0) (sensitivityalias s0 unclassified)").unwrap();
    assert!(db.symtab.contains(SymKind::Sens, "s0"));
    assert!(db.symtab.contains(SymKind::Sens, "unclassified"));
    match &node_at(&db, &[1]).data {
        AstData::SensAlias(alias) => {
            assert_eq!(alias.sens_str, "s0");
            assert_eq!(alias.name, "unclassified");
        }
        other => panic!("expected sensitivityalias, got {}", other.kind_name()),
    }
    let err = build_source("(sensitivity s0) (sensitivityalias s0 s0)").unwrap_err();
    assert_eq!(err.kind, BuildErrorKind::DuplicateEntry("s0".to_string()));
}

#[test]
fn test_category_and_alias() {
    let db = build_source("(category c0) (categoryalias c0 payroll)").unwrap();
    assert!(db.symtab.contains(SymKind::Cats, "c0"));
    assert!(db.symtab.contains(SymKind::Cats, "payroll"));
}

#[test]
fn test_categoryset_keeps_groupings() {
    let db = build_source("(categoryset cs (c0 (c1 c2) c3))").unwrap();
    match &node_at(&db, &[0]).data {
        AstData::CatSet(set) => {
            assert_eq!(set.name, "cs");
            assert_eq!(
                set.items,
                vec![
                    CatItem::Name("c0".to_string()),
                    CatItem::List(vec!["c1".to_string(), "c2".to_string()]),
                    CatItem::Name("c3".to_string()),
                ]
            );
        }
        other => panic!("expected categoryset, got {}", other.kind_name()),
    }
    assert!(db.symtab.contains(SymKind::CatSets, "cs"));
}

#[test]
fn test_categoryset_rejects_deep_nesting_and_emptiness() {
    let err = build_source("(categoryset cs ((c0 (c1))))").unwrap_err();
    assert_eq!(err.kind, BuildErrorKind::UnexpectedList("category name"));
    let err = build_source("(categoryset cs ())").unwrap_err();
    assert_eq!(err.kind, BuildErrorKind::MissingOperand("category name"));
}

#[test]
fn test_categoryrange() {
    let db = build_source("(categoryrange cr (c0 c127))").unwrap();
    match &node_at(&db, &[0]).data {
        AstData::CatRange(range) => {
            assert_eq!(range.name, "cr");
            assert_eq!(range.low, "c0");
            assert_eq!(range.high, "c127");
        }
        other => panic!("expected categoryrange, got {}", other.kind_name()),
    }
    // named ranges are usable where category sets are
    assert!(db.symtab.contains(SymKind::CatSets, "cr"));

    let err = build_source("(categoryrange cr (c0 c1 c2))").unwrap_err();
    assert_eq!(err.kind, BuildErrorKind::TrailingOperands);
}

#[test]
fn test_categoryorder_and_dominance() {
    let db = build_source("(categoryorder (c0 c1 c2)) (dominance (s0 s1))").unwrap();
    match &node_at(&db, &[0]).data {
        AstData::CatOrder(order) => assert_eq!(order.cats, vec!["c0", "c1", "c2"]),
        other => panic!("expected categoryorder, got {}", other.kind_name()),
    }
    match &node_at(&db, &[1]).data {
        AstData::Dominance(dom) => assert_eq!(dom.sens, vec!["s0", "s1"]),
        other => panic!("expected dominance, got {}", other.kind_name()),
    }
    let err = build_source("(dominance ())").unwrap_err();
    assert_eq!(err.kind, BuildErrorKind::MissingOperand("sensitivity name"));
}

#[test]
fn test_sensitivitycategory() {
    let db = build_source("(sensitivitycategory s0 (c0 (c1 c2)))").unwrap();
    match &node_at(&db, &[0]).data {
        AstData::SensCat(sc) => {
            assert_eq!(sc.sens_str, "s0");
            assert_eq!(sc.cats.len(), 2);
        }
        other => panic!("expected sensitivitycategory, got {}", other.kind_name()),
    }
}

#[test]
fn test_level_with_and_without_categories() {
    let db = build_source("(level low (s0)) (level high (s1 (c0 c1)))").unwrap();
    match &node_at(&db, &[0]).data {
        AstData::Level(l) => {
            assert_eq!(l.name, "low");
            assert_eq!(l.level, level("s0", &[]));
        }
        other => panic!("expected level, got {}", other.kind_name()),
    }
    match &node_at(&db, &[1]).data {
        AstData::Level(l) => assert_eq!(l.level, level("s1", &["c0", "c1"])),
        other => panic!("expected level, got {}", other.kind_name()),
    }
    assert!(db.symtab.contains(SymKind::Levels, "low"));
}

#[test]
fn test_level_category_list_must_not_be_empty() {
    let err = build_source("(level low (s0 ()))").unwrap_err();
    assert_eq!(err.kind, BuildErrorKind::MissingOperand("category name"));
}

#[test]
fn test_levelrange_mixes_named_and_inline_ends() {
    let db = build_source("(levelrange lr (low (s1 (c0))))").unwrap();
    match &node_at(&db, &[0]).data {
        AstData::LevelRange(lr) => {
            assert_eq!(lr.name, "lr");
            assert_eq!(lr.range.low, NamedOrAnon::Named("low".to_string()));
            assert_eq!(lr.range.high, NamedOrAnon::Anon(level("s1", &["c0"])));
        }
        other => panic!("expected levelrange, got {}", other.kind_name()),
    }
    assert!(db.symtab.contains(SymKind::LevelRanges, "lr"));
}

#[test]
fn test_levelrange_needs_both_ends() {
    let err = build_source("(levelrange lr (low))").unwrap_err();
    assert_eq!(err.kind, BuildErrorKind::MissingOperand("high level"));
}

#[test]
fn test_userlevel_accepts_named_and_inline_levels() {
    let db = build_source("(userlevel u lowname) (userlevel u2 (s0 (c0)))").unwrap();
    match &node_at(&db, &[0]).data {
        AstData::UserLevel(ul) => {
            assert_eq!(ul.user_str, "u");
            assert_eq!(ul.level, NamedOrAnon::Named("lowname".to_string()));
        }
        other => panic!("expected userlevel, got {}", other.kind_name()),
    }
    match &node_at(&db, &[1]).data {
        AstData::UserLevel(ul) => assert_eq!(ul.level, NamedOrAnon::Anon(level("s0", &["c0"]))),
        other => panic!("expected userlevel, got {}", other.kind_name()),
    }
}

#[test]
fn test_userrange_with_inline_range() {
    let db = build_source("(userrange u ((s0) (s1 (c0 c1))))").unwrap();
    match &node_at(&db, &[0]).data {
        AstData::UserRange(ur) => match &ur.range {
            NamedOrAnon::Anon(range) => {
                assert_eq!(range.low, NamedOrAnon::Anon(level("s0", &[])));
                assert_eq!(range.high, NamedOrAnon::Anon(level("s1", &["c0", "c1"])));
            }
            NamedOrAnon::Named(name) => panic!("expected an inline range, got '{}'", name),
        },
        other => panic!("expected userrange, got {}", other.kind_name()),
    }
}

#[test]
fn test_rangetransition_takes_a_range_operand() {
    let db = build_source("(rangetransition init_t svc_exec_t process ((s0) (s0)))").unwrap();
    match &node_at(&db, &[0]).data {
        AstData::RangeTransition(rt) => {
            assert_eq!(rt.src_str, "init_t");
            assert_eq!(rt.tgt_str, "svc_exec_t");
            assert_eq!(rt.obj_str, "process");
            assert!(matches!(rt.range, NamedOrAnon::Anon(_)));
        }
        other => panic!("expected rangetransition, got {}", other.kind_name()),
    }
}
