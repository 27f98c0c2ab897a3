//! Scope-introducing containers: `block`, `macro`, `optional`, and the
//! `call` statement that instantiates a macro.
//!
//! Each container owns the symbol tables for the declarations made inside
//! it. The tables are filled while the container's body is walked and moved
//! into the datum when the scope closes.

use crate::cil::symtab::SymtabSet;
use serde::Serialize;

/// `(block <name> <statement>*)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub name: String,
    /// Set by a `blockabstract` statement during resolution; always false
    /// at build time.
    pub is_abstract: bool,
    pub symtab: SymtabSet,
}

/// `(blockinherit <name>)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockInherit {
    pub block_str: String,
}

/// `(blockabstract <name>)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockAbstract {
    pub block_str: String,
}

/// Whether an `optional` block survived resolution. Build always leaves
/// this `Unresolved`; the resolver flips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResolveState {
    Unresolved,
    Resolved,
    Failed,
}

/// `(optional <name> <statement>*)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Optional {
    pub name: String,
    pub state: ResolveState,
    pub symtab: SymtabSet,
}

/// The declared kind of one macro parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParamKind {
    Type,
    TypeAlias,
    Role,
    User,
    Sensitivity,
    Category,
    CategorySet,
    Level,
    LevelRange,
    Class,
    ClassPermissionSet,
    PermissionSet,
    Boolean,
    Name,
    IpAddr,
}

impl ParamKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "type" => ParamKind::Type,
            "typealias" => ParamKind::TypeAlias,
            "role" => ParamKind::Role,
            "user" => ParamKind::User,
            "sensitivity" => ParamKind::Sensitivity,
            "category" => ParamKind::Category,
            "categoryset" => ParamKind::CategorySet,
            "level" => ParamKind::Level,
            "levelrange" => ParamKind::LevelRange,
            "class" => ParamKind::Class,
            "classpermissionset" => ParamKind::ClassPermissionSet,
            "permissionset" => ParamKind::PermissionSet,
            "boolean" => ParamKind::Boolean,
            "name" => ParamKind::Name,
            "ipaddr" => ParamKind::IpAddr,
            _ => return None,
        })
    }
}

/// One `(<kind> <name>)` pair from a macro's parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MacroParam {
    pub kind: ParamKind,
    pub name: String,
}

/// `(macro <name> (<param>*) <statement>*)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Macro {
    pub name: String,
    pub params: Vec<MacroParam>,
    pub symtab: SymtabSet,
}

/// One positional argument of a `call`: an atom or an anonymous sub-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CallArg {
    Atom(String),
    List(Vec<CallArg>),
}

/// `(call <macro> (<arg>*))`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Call {
    pub macro_str: String,
    pub args: Vec<CallArg>,
}
