//! Simple declarations and two-name relation statements.

use crate::cil::ast::mls::{Level, LevelRange};
use crate::cil::ast::NamedOrAnon;
use serde::Serialize;

/// `(type <name>)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Type {
    pub name: String,
}

/// `(typeattribute <name>)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeAttribute {
    pub name: String,
}

/// `(typealias <path> <name>)` — `type_str` may be a dotted path into a
/// block; `name` is the bare alias being declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeAlias {
    pub type_str: String,
    pub name: String,
}

/// `(typepermissive <type>)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypePermissive {
    pub type_str: String,
}

/// Shared payload of `typebounds`/`rolebounds`/`userbounds`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bounds {
    pub parent_str: String,
    pub child_str: String,
}

/// `(role <name>)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    pub name: String,
}

/// `(roletype <role> <type>)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleType {
    pub role_str: String,
    pub type_str: String,
}

/// `(user <name>)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub name: String,
}

/// `(userrole <user> <role>)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRole {
    pub user_str: String,
    pub role_str: String,
}

/// `(userlevel <user> <level>)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserLevel {
    pub user_str: String,
    pub level: NamedOrAnon<Level>,
}

/// `(userrange <user> <range>)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRange {
    pub user_str: String,
    pub range: NamedOrAnon<LevelRange>,
}

/// `(sid <name>)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sid {
    pub name: String,
}

/// `(boolean <name> true|false)` and `(tunable <name> true|false)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Boolean {
    pub name: String,
    pub value: bool,
}

/// `(policycap <name>)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyCap {
    pub name: String,
}

/// `(mls true|false)` — flips the database-wide MLS flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mls {
    pub value: bool,
}
