//! Generators for type, role, user, sid, and boolean declarations, the
//! access-vector and type rules, and the constraint statements.

use crate::cil::ast::conditional::Constrain;
use crate::cil::ast::decls::{
    Boolean, Bounds, Mls, PolicyCap, Role, RoleType, Sid, Type, TypeAlias, TypeAttribute,
    TypePermissive, User, UserLevel, UserRange, UserRole,
};
use crate::cil::ast::rules::{
    AvRule, AvRuleKind, NameTypeTransition, RangeTransition, RoleAllow, RoleTransition,
    TypeAttributeSet, TypeRule, TypeRuleKind,
};
use crate::cil::ast::AstData;
use crate::cil::build::{syntax, Builder};
use crate::cil::error::{BuildError, BuildErrorKind};
use crate::cil::expr::{build_expr_stack, build_set_expr, ExprFlavor};
use crate::cil::parsing::ParseNode;
use crate::cil::symtab::SymKind;

pub(crate) fn type_decl(
    b: &mut Builder,
    args: &[ParseNode],
    line: u32,
) -> Result<AstData, BuildError> {
    let name = syntax::atom(args, 0, "type name", line)?;
    let name = b.declare(SymKind::Types, "type", name, line)?;
    syntax::end(args, 1)?;
    Ok(AstData::Type(Type { name }))
}

pub(crate) fn typeattribute(
    b: &mut Builder,
    args: &[ParseNode],
    line: u32,
) -> Result<AstData, BuildError> {
    let name = syntax::atom(args, 0, "attribute name", line)?;
    let name = b.declare(SymKind::Types, "typeattribute", name, line)?;
    syntax::end(args, 1)?;
    Ok(AstData::TypeAttribute(TypeAttribute { name }))
}

pub(crate) fn typeattributeset(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let attr_str = syntax::atom(args, 0, "attribute name", line)?.to_string();
    let expr_node = syntax::operand(args, 1, "attribute set expression", line)?;
    let expr = build_set_expr(expr_node)?;
    syntax::end(args, 2)?;
    Ok(AstData::TypeAttributeSet(TypeAttributeSet { attr_str, expr }))
}

/// The first operand of `typealias` refers to the aliased type and may be a
/// dotted path; only the alias name itself is declared here.
pub(crate) fn typealias(
    b: &mut Builder,
    args: &[ParseNode],
    line: u32,
) -> Result<AstData, BuildError> {
    let type_str = syntax::atom(args, 0, "type", line)?.to_string();
    let name = syntax::atom(args, 1, "alias name", line)?;
    let name = b.declare(SymKind::Types, "typealias", name, line)?;
    syntax::end(args, 2)?;
    Ok(AstData::TypeAlias(TypeAlias { type_str, name }))
}

fn bounds(args: &[ParseNode], line: u32) -> Result<Bounds, BuildError> {
    let parent_str = syntax::atom(args, 0, "parent", line)?.to_string();
    let child_str = syntax::atom(args, 1, "child", line)?.to_string();
    syntax::end(args, 2)?;
    Ok(Bounds {
        parent_str,
        child_str,
    })
}

pub(crate) fn typebounds(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    Ok(AstData::TypeBounds(bounds(args, line)?))
}

pub(crate) fn rolebounds(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    Ok(AstData::RoleBounds(bounds(args, line)?))
}

pub(crate) fn userbounds(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    Ok(AstData::UserBounds(bounds(args, line)?))
}

pub(crate) fn typepermissive(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let type_str = syntax::atom(args, 0, "type", line)?.to_string();
    syntax::end(args, 1)?;
    Ok(AstData::TypePermissive(TypePermissive { type_str }))
}

pub(crate) fn role(b: &mut Builder, args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let name = syntax::atom(args, 0, "role name", line)?;
    let name = b.declare(SymKind::Roles, "role", name, line)?;
    syntax::end(args, 1)?;
    Ok(AstData::Role(Role { name }))
}

pub(crate) fn roletype(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let role_str = syntax::atom(args, 0, "role", line)?.to_string();
    let type_str = syntax::atom(args, 1, "type", line)?.to_string();
    syntax::end(args, 2)?;
    Ok(AstData::RoleType(RoleType { role_str, type_str }))
}

pub(crate) fn roleallow(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let src_str = syntax::atom(args, 0, "source role", line)?.to_string();
    let tgt_str = syntax::atom(args, 1, "target role", line)?.to_string();
    syntax::end(args, 2)?;
    Ok(AstData::RoleAllow(RoleAllow { src_str, tgt_str }))
}

pub(crate) fn roletransition(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let src_str = syntax::atom(args, 0, "source role", line)?.to_string();
    let tgt_str = syntax::atom(args, 1, "target type", line)?.to_string();
    let obj_str = syntax::atom(args, 2, "object class", line)?.to_string();
    let result_str = syntax::atom(args, 3, "result role", line)?.to_string();
    syntax::end(args, 4)?;
    Ok(AstData::RoleTransition(RoleTransition {
        src_str,
        tgt_str,
        obj_str,
        result_str,
    }))
}

pub(crate) fn user(b: &mut Builder, args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let name = syntax::atom(args, 0, "user name", line)?;
    let name = b.declare(SymKind::Users, "user", name, line)?;
    syntax::end(args, 1)?;
    Ok(AstData::User(User { name }))
}

pub(crate) fn userrole(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let user_str = syntax::atom(args, 0, "user", line)?.to_string();
    let role_str = syntax::atom(args, 1, "role", line)?.to_string();
    syntax::end(args, 2)?;
    Ok(AstData::UserRole(UserRole { user_str, role_str }))
}

pub(crate) fn userlevel(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let user_str = syntax::atom(args, 0, "user", line)?.to_string();
    let level = syntax::level(syntax::operand(args, 1, "level", line)?)?;
    syntax::end(args, 2)?;
    Ok(AstData::UserLevel(UserLevel { user_str, level }))
}

pub(crate) fn userrange(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let user_str = syntax::atom(args, 0, "user", line)?.to_string();
    let range = syntax::levelrange(syntax::operand(args, 1, "level range", line)?)?;
    syntax::end(args, 2)?;
    Ok(AstData::UserRange(UserRange { user_str, range }))
}

pub(crate) fn sid(b: &mut Builder, args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let name = syntax::atom(args, 0, "sid name", line)?;
    let name = b.declare(SymKind::Sids, "sid", name, line)?;
    syntax::end(args, 1)?;
    Ok(AstData::Sid(Sid { name }))
}

pub(crate) fn boolean(
    b: &mut Builder,
    args: &[ParseNode],
    line: u32,
) -> Result<AstData, BuildError> {
    let name = syntax::atom(args, 0, "boolean name", line)?;
    let name = b.declare(SymKind::Bools, "boolean", name, line)?;
    let value = syntax::bool_literal(syntax::atom(args, 1, "boolean value", line)?, line)?;
    syntax::end(args, 2)?;
    Ok(AstData::Boolean(Boolean { name, value }))
}

pub(crate) fn tunable(
    b: &mut Builder,
    args: &[ParseNode],
    line: u32,
) -> Result<AstData, BuildError> {
    let name = syntax::atom(args, 0, "tunable name", line)?;
    let name = b.declare(SymKind::Tunables, "tunable", name, line)?;
    let value = syntax::bool_literal(syntax::atom(args, 1, "tunable value", line)?, line)?;
    syntax::end(args, 2)?;
    Ok(AstData::Tunable(Boolean { name, value }))
}

pub(crate) fn policycap(
    b: &mut Builder,
    args: &[ParseNode],
    line: u32,
) -> Result<AstData, BuildError> {
    let name = syntax::atom(args, 0, "policycap name", line)?;
    let name = b.declare(SymKind::PolicyCaps, "policycap", name, line)?;
    syntax::end(args, 1)?;
    Ok(AstData::PolicyCap(PolicyCap { name }))
}

pub(crate) fn mls_flag(
    b: &mut Builder,
    args: &[ParseNode],
    line: u32,
) -> Result<AstData, BuildError> {
    let value = syntax::bool_literal(syntax::atom(args, 0, "mls value", line)?, line)?;
    syntax::end(args, 1)?;
    b.set_mls(value);
    Ok(AstData::Mls(Mls { value }))
}

pub(crate) fn av_rule(keyword: &str, args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let kind = match keyword {
        "allow" => AvRuleKind::Allowed,
        "auditallow" => AvRuleKind::AuditAllow,
        "dontaudit" => AvRuleKind::DontAudit,
        _ => AvRuleKind::NeverAllow,
    };
    let src_str = syntax::atom(args, 0, "source", line)?.to_string();
    let tgt_str = syntax::atom(args, 1, "target", line)?.to_string();
    let classpermset = syntax::classpermset(syntax::operand(args, 2, "class permissions", line)?)?;
    syntax::end(args, 3)?;
    Ok(AstData::AvRule(AvRule {
        kind,
        src_str,
        tgt_str,
        classpermset,
    }))
}

pub(crate) fn type_rule(
    keyword: &str,
    args: &[ParseNode],
    line: u32,
) -> Result<AstData, BuildError> {
    let kind = match keyword {
        "typetransition" => TypeRuleKind::Transition,
        "typechange" => TypeRuleKind::Change,
        _ => TypeRuleKind::Member,
    };
    let src_str = syntax::atom(args, 0, "source", line)?.to_string();
    let tgt_str = syntax::atom(args, 1, "target", line)?.to_string();
    let obj_str = syntax::atom(args, 2, "object class", line)?.to_string();
    let result_str = syntax::atom(args, 3, "result type", line)?.to_string();
    syntax::end(args, 4)?;
    Ok(AstData::TypeRule(TypeRule {
        kind,
        src_str,
        tgt_str,
        obj_str,
        result_str,
    }))
}

pub(crate) fn nametypetransition(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let name_str = syntax::atom(args, 0, "object name", line)?.to_string();
    let src_str = syntax::atom(args, 1, "source", line)?.to_string();
    let tgt_str = syntax::atom(args, 2, "target", line)?.to_string();
    let obj_str = syntax::atom(args, 3, "object class", line)?.to_string();
    let result_str = syntax::atom(args, 4, "result type", line)?.to_string();
    syntax::end(args, 5)?;
    Ok(AstData::NameTypeTransition(NameTypeTransition {
        name_str,
        src_str,
        tgt_str,
        obj_str,
        result_str,
    }))
}

pub(crate) fn rangetransition(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let src_str = syntax::atom(args, 0, "source", line)?.to_string();
    let tgt_str = syntax::atom(args, 1, "target", line)?.to_string();
    let obj_str = syntax::atom(args, 2, "object class", line)?.to_string();
    let range = syntax::levelrange(syntax::operand(args, 3, "level range", line)?)?;
    syntax::end(args, 4)?;
    Ok(AstData::RangeTransition(RangeTransition {
        src_str,
        tgt_str,
        obj_str,
        range,
    }))
}

/// `constrain` and `mlsconstrain` differ only in which expression operands
/// are legal; the MLS flavor admits the level keywords.
pub(crate) fn constrain(args: &[ParseNode], line: u32, mls: bool) -> Result<AstData, BuildError> {
    let classpermset = syntax::classpermset(syntax::operand(args, 0, "class permissions", line)?)?;
    let expr_node = syntax::operand(args, 1, "constraint expression", line)?;
    if !expr_node.is_list() {
        return Err(BuildError::new(
            BuildErrorKind::ExpectedList("constraint expression"),
            expr_node.line,
        ));
    }
    let flavor = if mls {
        ExprFlavor::MlsConstrain
    } else {
        ExprFlavor::Constrain
    };
    let mut expr = Vec::new();
    build_expr_stack(expr_node, flavor, &mut expr)?;
    syntax::end(args, 2)?;

    let datum = Constrain { classpermset, expr };
    Ok(if mls {
        AstData::MlsConstrain(datum)
    } else {
        AstData::Constrain(datum)
    })
}
