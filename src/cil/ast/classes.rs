//! Classes, commons, and the permission-set indirection layers.
//!
//! A class owns its permission namespace: permission names are scoped
//! per-class, and each gets an auto-assigned bit value in declaration
//! order. `permissionset`/`classpermissionset`/`classmap`/`classmapping`
//! let rules refer to (class, permissions) pairs either by a declared name
//! or with an anonymous inline spelling.

use crate::cil::ast::NamedOrAnon;
use crate::cil::symtab::Symtab;
use serde::Serialize;

/// A single permission with its auto-assigned bit value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Perm {
    pub name: String,
    pub value: u32,
}

/// `(class <name> (<perm>*))`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Class {
    pub name: String,
    pub perms: Vec<Perm>,
    /// The per-class permission namespace; duplicate permission names
    /// collide here.
    pub perm_symtab: Symtab,
}

/// `(common <name> (<perm>+))`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Common {
    pub name: String,
    pub perms: Vec<Perm>,
    pub perm_symtab: Symtab,
}

/// `(classcommon <class> <common>)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassCommon {
    pub class_str: String,
    pub common_str: String,
}

/// An anonymous permission list, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermSet {
    pub perms: Vec<String>,
}

/// `(permissionset <name> (<perm>+))`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionSet {
    pub name: String,
    pub permset: PermSet,
}

/// A (class, permissions) pair; the permissions half may itself be a named
/// `permissionset` or an inline list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassPermSet {
    pub class_str: String,
    pub permset: NamedOrAnon<PermSet>,
}

/// `(classpermissionset <name> (<class> <perms>))`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassPermissionSet {
    pub name: String,
    pub classpermset: ClassPermSet,
}

/// `(classmap <name> (<perm>+))` — a map class whose permissions name
/// whole (class, permission-set) bundles instead of kernel bits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMap {
    pub name: String,
    pub perms: Vec<String>,
    pub perm_symtab: Symtab,
}

/// `(classmapping <map> <perm> <classpermset>+)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMapping {
    pub map_str: String,
    pub perm_str: String,
    pub classpermsets: Vec<NamedOrAnon<ClassPermSet>>,
}
