//! Generators for classes, commons, and the permission-set statements.

use crate::cil::ast::classes::{
    Class, ClassCommon, ClassMap, ClassMapping, ClassPermissionSet, Common, Perm, PermSet,
    PermissionSet,
};
use crate::cil::ast::AstData;
use crate::cil::build::{syntax, Builder};
use crate::cil::error::{BuildError, BuildErrorKind};
use crate::cil::parsing::ParseNode;
use crate::cil::symtab::{SymEntry, SymKind, Symtab};

/// Number a permission list and fill the owning class's permission table.
/// Values are assigned in declaration order starting at 1.
fn number_perms(
    names: Vec<String>,
    declared_by: &'static str,
    line: u32,
) -> Result<(Vec<Perm>, Symtab), BuildError> {
    let mut symtab = Symtab::default();
    let mut perms = Vec::with_capacity(names.len());
    for (i, name) in names.into_iter().enumerate() {
        symtab
            .insert(&name, SymEntry { declared_by, line })
            .map_err(|dup| BuildError::new(BuildErrorKind::DuplicateEntry(dup.name), line))?;
        perms.push(Perm {
            name,
            value: i as u32 + 1,
        });
    }
    Ok((perms, symtab))
}

pub(crate) fn class(
    b: &mut Builder,
    args: &[ParseNode],
    line: u32,
) -> Result<AstData, BuildError> {
    let name = syntax::atom(args, 0, "class name", line)?;
    let name = b.declare(SymKind::Classes, "class", name, line)?;
    let perm_list = syntax::list(args, 1, "permission list", line)?;
    // A class may start empty and pick its permissions up from a common.
    let names = if perm_list.is_empty() {
        Vec::new()
    } else {
        syntax::perms_nested(perm_list, line)?
    };
    syntax::end(args, 2)?;
    let (perms, perm_symtab) = number_perms(names, "class", line)?;
    Ok(AstData::Class(Class {
        name,
        perms,
        perm_symtab,
    }))
}

pub(crate) fn common(
    b: &mut Builder,
    args: &[ParseNode],
    line: u32,
) -> Result<AstData, BuildError> {
    let name = syntax::atom(args, 0, "common name", line)?;
    let name = b.declare(SymKind::Commons, "common", name, line)?;
    let perm_list = syntax::list(args, 1, "permission list", line)?;
    let names = syntax::perms_flat(perm_list, line)?;
    syntax::end(args, 2)?;
    let (perms, perm_symtab) = number_perms(names, "common", line)?;
    Ok(AstData::Common(Common {
        name,
        perms,
        perm_symtab,
    }))
}

pub(crate) fn classcommon(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let class_str = syntax::atom(args, 0, "class", line)?.to_string();
    let common_str = syntax::atom(args, 1, "common", line)?.to_string();
    syntax::end(args, 2)?;
    Ok(AstData::ClassCommon(ClassCommon {
        class_str,
        common_str,
    }))
}

pub(crate) fn permissionset(
    b: &mut Builder,
    args: &[ParseNode],
    line: u32,
) -> Result<AstData, BuildError> {
    let name = syntax::atom(args, 0, "permissionset name", line)?;
    let name = b.declare(SymKind::PermSets, "permissionset", name, line)?;
    let perm_list = syntax::list(args, 1, "permission list", line)?;
    let perms = syntax::perms_nested(perm_list, line)?;
    syntax::end(args, 2)?;
    Ok(AstData::PermissionSet(PermissionSet {
        name,
        permset: PermSet { perms },
    }))
}

pub(crate) fn classpermissionset(
    b: &mut Builder,
    args: &[ParseNode],
    line: u32,
) -> Result<AstData, BuildError> {
    let name = syntax::atom(args, 0, "classpermissionset name", line)?;
    let name = b.declare(SymKind::ClassPermSets, "classpermissionset", name, line)?;
    let pair = syntax::list(args, 1, "class permissions", line)?;
    let classpermset = syntax::anon_classpermset(pair, line)?;
    syntax::end(args, 2)?;
    Ok(AstData::ClassPermissionSet(ClassPermissionSet {
        name,
        classpermset,
    }))
}

/// `classmap` shares the class namespace: rules may name a map class
/// anywhere an ordinary class is accepted.
pub(crate) fn classmap(
    b: &mut Builder,
    args: &[ParseNode],
    line: u32,
) -> Result<AstData, BuildError> {
    let name = syntax::atom(args, 0, "classmap name", line)?;
    let name = b.declare(SymKind::Classes, "classmap", name, line)?;
    let perm_list = syntax::list(args, 1, "classmapping name list", line)?;
    let perms = syntax::perms_flat(perm_list, line)?;
    syntax::end(args, 2)?;
    let mut perm_symtab = Symtab::default();
    for perm in &perms {
        perm_symtab
            .insert(
                perm,
                SymEntry {
                    declared_by: "classmap",
                    line,
                },
            )
            .map_err(|dup| BuildError::new(BuildErrorKind::DuplicateEntry(dup.name), line))?;
    }
    Ok(AstData::ClassMap(ClassMap {
        name,
        perms,
        perm_symtab,
    }))
}

pub(crate) fn classmapping(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let map_str = syntax::atom(args, 0, "classmap", line)?.to_string();
    let perm_str = syntax::atom(args, 1, "classmapping name", line)?.to_string();
    if args.len() < 3 {
        return Err(BuildError::new(
            BuildErrorKind::MissingOperand("class permissions"),
            line,
        ));
    }
    let classpermsets = args[2..]
        .iter()
        .map(syntax::classpermset)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(AstData::ClassMapping(ClassMapping {
        map_str,
        perm_str,
        classpermsets,
    }))
}
