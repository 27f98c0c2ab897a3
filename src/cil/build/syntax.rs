//! Operand extraction helpers shared by the statement generators.
//!
//! Every generator receives the operand slice (the statement's list minus
//! the keyword) and the line of the statement. The helpers here turn
//! positional operands into atoms, lists, numbers, and the recurring
//! compound operands (permission lists, class-permission pairs, levels,
//! ranges, contexts) with uniform error reporting: a missing operand names
//! what was expected, a list where an atom belongs (or vice versa) names
//! the operand, and anything left over past the last expected position is
//! [`TrailingOperands`](BuildErrorKind::TrailingOperands).

use crate::cil::ast::classes::{ClassPermSet, PermSet};
use crate::cil::ast::contexts::Context;
use crate::cil::ast::mls::{CatItem, Level, LevelRange};
use crate::cil::ast::NamedOrAnon;
use crate::cil::error::{BuildError, BuildErrorKind};
use crate::cil::parsing::ParseNode;
use std::net::IpAddr;
use std::str::FromStr;

/// The operand at position `i`, required to be a bare atom.
pub fn atom<'a>(
    args: &'a [ParseNode],
    i: usize,
    what: &'static str,
    line: u32,
) -> Result<&'a str, BuildError> {
    let node = args
        .get(i)
        .ok_or_else(|| BuildError::new(BuildErrorKind::MissingOperand(what), line))?;
    node.as_token()
        .ok_or_else(|| BuildError::new(BuildErrorKind::UnexpectedList(what), node.line))
}

/// The operand at position `i`, required to be a parenthesized list.
pub fn list<'a>(
    args: &'a [ParseNode],
    i: usize,
    what: &'static str,
    line: u32,
) -> Result<&'a [ParseNode], BuildError> {
    let node = args
        .get(i)
        .ok_or_else(|| BuildError::new(BuildErrorKind::MissingOperand(what), line))?;
    node.as_list()
        .ok_or_else(|| BuildError::new(BuildErrorKind::ExpectedList(what), node.line))
}

/// The operand at position `i`, atom or list.
pub fn operand<'a>(
    args: &'a [ParseNode],
    i: usize,
    what: &'static str,
    line: u32,
) -> Result<&'a ParseNode, BuildError> {
    args.get(i)
        .ok_or_else(|| BuildError::new(BuildErrorKind::MissingOperand(what), line))
}

/// Reject operands past position `n`.
pub fn end(args: &[ParseNode], n: usize) -> Result<(), BuildError> {
    if args.len() > n {
        return Err(BuildError::new(
            BuildErrorKind::TrailingOperands,
            args[n].line,
        ));
    }
    Ok(())
}

/// Parse an atom as a number, reporting the literal on failure.
pub fn number<T: FromStr>(text: &str, kind: &'static str, line: u32) -> Result<T, BuildError> {
    text.parse().map_err(|_| {
        BuildError::new(
            BuildErrorKind::InvalidLiteral {
                kind,
                value: text.to_string(),
            },
            line,
        )
    })
}

/// Parse an atom as an IP address literal.
pub fn ip_literal(text: &str, line: u32) -> Result<IpAddr, BuildError> {
    text.parse().map_err(|_| {
        BuildError::new(
            BuildErrorKind::InvalidLiteral {
                kind: "IP address",
                value: text.to_string(),
            },
            line,
        )
    })
}

/// Parse a `true`/`false` atom.
pub fn bool_literal(text: &str, line: u32) -> Result<bool, BuildError> {
    match text {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(BuildError::new(
            BuildErrorKind::InvalidLiteral {
                kind: "boolean literal",
                value: text.to_string(),
            },
            line,
        )),
    }
}

/// A flat list of permission names; sub-lists are rejected.
pub fn perms_flat(items: &[ParseNode], line: u32) -> Result<Vec<String>, BuildError> {
    if items.is_empty() {
        return Err(BuildError::new(
            BuildErrorKind::MissingOperand("permission name"),
            line,
        ));
    }
    items
        .iter()
        .map(|item| {
            item.as_token().map(str::to_string).ok_or_else(|| {
                BuildError::new(BuildErrorKind::UnexpectedList("permission name"), item.line)
            })
        })
        .collect()
}

/// A permission list that tolerates one level of grouping parentheses;
/// groups are flattened in order. Deeper nesting is rejected.
pub fn perms_nested(items: &[ParseNode], line: u32) -> Result<Vec<String>, BuildError> {
    let mut perms = Vec::new();
    collect_perms(items, &mut perms, true)?;
    if perms.is_empty() {
        return Err(BuildError::new(
            BuildErrorKind::MissingOperand("permission name"),
            line,
        ));
    }
    Ok(perms)
}

fn collect_perms(
    items: &[ParseNode],
    perms: &mut Vec<String>,
    allow_group: bool,
) -> Result<(), BuildError> {
    for item in items {
        match item.as_token() {
            Some(name) => perms.push(name.to_string()),
            None => {
                let inner = item.as_list().unwrap_or_default();
                if !allow_group {
                    return Err(BuildError::new(
                        BuildErrorKind::UnexpectedList("permission name"),
                        item.line,
                    ));
                }
                collect_perms(inner, perms, false)?;
            }
        }
    }
    Ok(())
}

/// An anonymous `(<class> <perms>)` pair; the permissions half is a named
/// `permissionset` or an inline list.
pub fn anon_classpermset(items: &[ParseNode], line: u32) -> Result<ClassPermSet, BuildError> {
    let class_str = atom(items, 0, "class name", line)?.to_string();
    let perms_node = operand(items, 1, "permission set", line)?;
    let permset = match perms_node.as_token() {
        Some(name) => NamedOrAnon::Named(name.to_string()),
        None => {
            let inner = perms_node.as_list().unwrap_or_default();
            NamedOrAnon::Anon(PermSet {
                perms: perms_nested(inner, perms_node.line)?,
            })
        }
    };
    end(items, 2)?;
    Ok(ClassPermSet { class_str, permset })
}

/// A class-permission operand: the name of a declared
/// `classpermissionset`, or an anonymous `(<class> <perms>)` pair.
pub fn classpermset(node: &ParseNode) -> Result<NamedOrAnon<ClassPermSet>, BuildError> {
    match node.as_token() {
        Some(name) => Ok(NamedOrAnon::Named(name.to_string())),
        None => {
            let items = node.as_list().unwrap_or_default();
            Ok(NamedOrAnon::Anon(anon_classpermset(items, node.line)?))
        }
    }
}

/// A category list: names and one-level `(low ... high)` groupings.
pub fn cat_items(items: &[ParseNode], line: u32) -> Result<Vec<CatItem>, BuildError> {
    if items.is_empty() {
        return Err(BuildError::new(
            BuildErrorKind::MissingOperand("category name"),
            line,
        ));
    }
    items
        .iter()
        .map(|item| match item.as_token() {
            Some(name) => Ok(CatItem::Name(name.to_string())),
            None => {
                let inner = item.as_list().unwrap_or_default();
                let names = inner
                    .iter()
                    .map(|sub| {
                        sub.as_token().map(str::to_string).ok_or_else(|| {
                            BuildError::new(
                                BuildErrorKind::UnexpectedList("category name"),
                                sub.line,
                            )
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                if names.is_empty() {
                    return Err(BuildError::new(
                        BuildErrorKind::MissingOperand("category name"),
                        item.line,
                    ));
                }
                Ok(CatItem::List(names))
            }
        })
        .collect()
}

/// An anonymous level: `(<sens>)` or `(<sens> (<cat>+))`.
pub fn anon_level(items: &[ParseNode], line: u32) -> Result<Level, BuildError> {
    let sens_str = atom(items, 0, "sensitivity", line)?.to_string();
    let cats = match items.get(1) {
        Some(node) => {
            let inner = node.as_list().ok_or_else(|| {
                BuildError::new(BuildErrorKind::ExpectedList("category list"), node.line)
            })?;
            cat_items(inner, node.line)?
        }
        None => Vec::new(),
    };
    end(items, 2)?;
    Ok(Level { sens_str, cats })
}

/// A level operand: a declared level's name or an inline level.
pub fn level(node: &ParseNode) -> Result<NamedOrAnon<Level>, BuildError> {
    match node.as_token() {
        Some(name) => Ok(NamedOrAnon::Named(name.to_string())),
        None => {
            let items = node.as_list().unwrap_or_default();
            Ok(NamedOrAnon::Anon(anon_level(items, node.line)?))
        }
    }
}

/// An anonymous level range: `(<low> <high>)`.
pub fn anon_levelrange(items: &[ParseNode], line: u32) -> Result<LevelRange, BuildError> {
    let low = level(operand(items, 0, "low level", line)?)?;
    let high = level(operand(items, 1, "high level", line)?)?;
    end(items, 2)?;
    Ok(LevelRange { low, high })
}

/// A range operand: a declared range's name or an inline `(<low> <high>)`.
pub fn levelrange(node: &ParseNode) -> Result<NamedOrAnon<LevelRange>, BuildError> {
    match node.as_token() {
        Some(name) => Ok(NamedOrAnon::Named(name.to_string())),
        None => {
            let items = node.as_list().unwrap_or_default();
            Ok(NamedOrAnon::Anon(anon_levelrange(items, node.line)?))
        }
    }
}

/// An anonymous context body: `(<user> <role> <type> <range>)` with the
/// range as one operand, or spelled out as `(<user> <role> <type> <low>
/// <high>)`.
pub fn anon_context(items: &[ParseNode], line: u32) -> Result<Context, BuildError> {
    let user_str = atom(items, 0, "user", line)?.to_string();
    let role_str = atom(items, 1, "role", line)?.to_string();
    let type_str = atom(items, 2, "type", line)?.to_string();
    let range = match items.len() {
        0..=3 => {
            return Err(BuildError::new(
                BuildErrorKind::MissingOperand("level range"),
                line,
            ))
        }
        4 => levelrange(&items[3])?,
        5 => NamedOrAnon::Anon(LevelRange {
            low: level(&items[3])?,
            high: level(&items[4])?,
        }),
        _ => {
            return Err(BuildError::new(
                BuildErrorKind::TrailingOperands,
                items[5].line,
            ))
        }
    };
    Ok(Context {
        user_str,
        role_str,
        type_str,
        range,
    })
}

/// A context operand: a declared context's name or an inline body.
pub fn context(node: &ParseNode) -> Result<NamedOrAnon<Context>, BuildError> {
    match node.as_token() {
        Some(name) => Ok(NamedOrAnon::Named(name.to_string())),
        None => {
            let items = node.as_list().unwrap_or_default();
            Ok(NamedOrAnon::Anon(anon_context(items, node.line)?))
        }
    }
}

/// A `nodecon` address or mask: a literal IP parses to an anonymous
/// address; anything that merely looks like one (contains `.` or `:`) is
/// malformed; a plain name refers to a declared `ipaddr`.
pub fn node_addr(node: &ParseNode) -> Result<NamedOrAnon<IpAddr>, BuildError> {
    match node.as_token() {
        Some(text) => {
            if let Ok(ip) = text.parse() {
                return Ok(NamedOrAnon::Anon(ip));
            }
            if text.contains('.') || text.contains(':') {
                return Err(BuildError::new(
                    BuildErrorKind::InvalidLiteral {
                        kind: "IP address",
                        value: text.to_string(),
                    },
                    node.line,
                ));
            }
            Ok(NamedOrAnon::Named(text.to_string()))
        }
        None => {
            let items = node.as_list().unwrap_or_default();
            let text = atom(items, 0, "IP address", node.line)?;
            let ip = ip_literal(text, node.line)?;
            end(items, 1)?;
            Ok(NamedOrAnon::Anon(ip))
        }
    }
}

/// A numeric range operand: a single value (low == high) or a `(<low>
/// <high>)` pair.
pub fn number_range<T: FromStr + Copy>(
    node: &ParseNode,
    kind: &'static str,
) -> Result<(T, T), BuildError> {
    match node.as_token() {
        Some(text) => {
            let value = number(text, kind, node.line)?;
            Ok((value, value))
        }
        None => {
            let items = node.as_list().unwrap_or_default();
            let low = number(atom(items, 0, kind, node.line)?, kind, node.line)?;
            let high = number(atom(items, 1, kind, node.line)?, kind, node.line)?;
            end(items, 2)?;
            Ok((low, high))
        }
    }
}
