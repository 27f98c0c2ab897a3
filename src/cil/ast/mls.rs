//! MLS statements: sensitivities, categories, levels, and level ranges.
//!
//! Levels and ranges are frequently spelled inline inside other statements
//! (`userlevel`, `rangetransition`, contexts), so the anonymous payloads
//! ([`Level`], [`LevelRange`]) are separate from the declaring statements
//! that give them names ([`NamedLevel`], [`NamedLevelRange`]).

use crate::cil::ast::NamedOrAnon;
use serde::Serialize;

/// `(sensitivity <name>)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sensitivity {
    pub name: String,
}

/// `(sensitivityalias <sens> <name>)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensAlias {
    pub sens_str: String,
    pub name: String,
}

/// `(category <name>)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
}

/// `(categoryalias <cat> <name>)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatAlias {
    pub cat_str: String,
    pub name: String,
}

/// One item of a category list: a bare name, or a parenthesized run of
/// names. Lists nest at most one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CatItem {
    Name(String),
    List(Vec<String>),
}

/// `(categoryset <name> (<cat>+))`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatSet {
    pub name: String,
    pub items: Vec<CatItem>,
}

/// `(categoryrange <name> (<low> <high>))`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatRange {
    pub name: String,
    pub low: String,
    pub high: String,
}

/// `(categoryorder (<cat>+))`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatOrder {
    pub cats: Vec<String>,
}

/// `(dominance (<sens>+))` — sensitivity ordering, lowest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dominance {
    pub sens: Vec<String>,
}

/// `(sensitivitycategory <sens> (<cat>+))`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensCat {
    pub sens_str: String,
    pub cats: Vec<CatItem>,
}

/// An anonymous level: a sensitivity plus an optional category list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Level {
    pub sens_str: String,
    pub cats: Vec<CatItem>,
}

/// `(level <name> (<sens> [(<cat>+)]))`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedLevel {
    pub name: String,
    pub level: Level,
}

/// An anonymous level range: each end is a declared level's name or an
/// inline level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelRange {
    pub low: NamedOrAnon<Level>,
    pub high: NamedOrAnon<Level>,
}

/// `(levelrange <name> (<low> <high>))`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedLevelRange {
    pub name: String,
    pub range: LevelRange,
}
