//! Rule statements: access-vector rules, type rules, role rules, and the
//! transition statements.

use crate::cil::ast::classes::ClassPermSet;
use crate::cil::ast::mls::LevelRange;
use crate::cil::ast::NamedOrAnon;
use crate::cil::expr::ExprToken;
use serde::Serialize;

/// Which access-vector rule a shared [`AvRule`] datum represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AvRuleKind {
    Allowed,
    AuditAllow,
    DontAudit,
    NeverAllow,
}

impl AvRuleKind {
    pub fn keyword(self) -> &'static str {
        match self {
            AvRuleKind::Allowed => "allow",
            AvRuleKind::AuditAllow => "auditallow",
            AvRuleKind::DontAudit => "dontaudit",
            AvRuleKind::NeverAllow => "neverallow",
        }
    }
}

/// `(allow|auditallow|dontaudit|neverallow <src> <tgt> <classpermset>)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvRule {
    pub kind: AvRuleKind,
    pub src_str: String,
    pub tgt_str: String,
    pub classpermset: NamedOrAnon<ClassPermSet>,
}

/// Which of the three type rules a shared [`TypeRule`] datum represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TypeRuleKind {
    Transition,
    Change,
    Member,
}

impl TypeRuleKind {
    pub fn keyword(self) -> &'static str {
        match self {
            TypeRuleKind::Transition => "typetransition",
            TypeRuleKind::Change => "typechange",
            TypeRuleKind::Member => "typemember",
        }
    }
}

/// `(typetransition|typechange|typemember <src> <tgt> <class> <result>)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeRule {
    pub kind: TypeRuleKind,
    pub src_str: String,
    pub tgt_str: String,
    pub obj_str: String,
    pub result_str: String,
}

/// `(nametypetransition <name> <src> <tgt> <class> <result>)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameTypeTransition {
    pub name_str: String,
    pub src_str: String,
    pub tgt_str: String,
    pub obj_str: String,
    pub result_str: String,
}

/// `(rangetransition <src> <tgt> <class> <range>)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeTransition {
    pub src_str: String,
    pub tgt_str: String,
    pub obj_str: String,
    pub range: NamedOrAnon<LevelRange>,
}

/// `(roletransition <src> <tgt> <class> <result>)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleTransition {
    pub src_str: String,
    pub tgt_str: String,
    pub obj_str: String,
    pub result_str: String,
}

/// `(roleallow <src> <tgt>)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleAllow {
    pub src_str: String,
    pub tgt_str: String,
}

/// `(typeattributeset <attr> (<expr>))` — the expression is kept as a
/// postfix stack over type/attribute names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeAttributeSet {
    pub attr_str: String,
    pub expr: Vec<ExprToken>,
}
