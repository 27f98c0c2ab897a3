//! Generators for the MLS statements: sensitivities, categories, levels,
//! level ranges, and their orderings.

use crate::cil::ast::mls::{
    CatAlias, CatOrder, CatRange, CatSet, Category, Dominance, NamedLevel, NamedLevelRange,
    SensAlias, SensCat, Sensitivity,
};
use crate::cil::ast::AstData;
use crate::cil::build::{syntax, Builder};
use crate::cil::error::{BuildError, BuildErrorKind};
use crate::cil::parsing::ParseNode;
use crate::cil::symtab::SymKind;

pub(crate) fn sensitivity(
    b: &mut Builder,
    args: &[ParseNode],
    line: u32,
) -> Result<AstData, BuildError> {
    let name = syntax::atom(args, 0, "sensitivity name", line)?;
    let name = b.declare(SymKind::Sens, "sensitivity", name, line)?;
    syntax::end(args, 1)?;
    Ok(AstData::Sensitivity(Sensitivity { name }))
}

pub(crate) fn sensitivityalias(
    b: &mut Builder,
    args: &[ParseNode],
    line: u32,
) -> Result<AstData, BuildError> {
    let sens_str = syntax::atom(args, 0, "sensitivity", line)?.to_string();
    let name = syntax::atom(args, 1, "alias name", line)?;
    let name = b.declare(SymKind::Sens, "sensitivityalias", name, line)?;
    syntax::end(args, 2)?;
    Ok(AstData::SensAlias(SensAlias { sens_str, name }))
}

pub(crate) fn category(
    b: &mut Builder,
    args: &[ParseNode],
    line: u32,
) -> Result<AstData, BuildError> {
    let name = syntax::atom(args, 0, "category name", line)?;
    let name = b.declare(SymKind::Cats, "category", name, line)?;
    syntax::end(args, 1)?;
    Ok(AstData::Category(Category { name }))
}

pub(crate) fn categoryalias(
    b: &mut Builder,
    args: &[ParseNode],
    line: u32,
) -> Result<AstData, BuildError> {
    let cat_str = syntax::atom(args, 0, "category", line)?.to_string();
    let name = syntax::atom(args, 1, "alias name", line)?;
    let name = b.declare(SymKind::Cats, "categoryalias", name, line)?;
    syntax::end(args, 2)?;
    Ok(AstData::CatAlias(CatAlias { cat_str, name }))
}

pub(crate) fn categoryset(
    b: &mut Builder,
    args: &[ParseNode],
    line: u32,
) -> Result<AstData, BuildError> {
    let name = syntax::atom(args, 0, "categoryset name", line)?;
    let name = b.declare(SymKind::CatSets, "categoryset", name, line)?;
    let list = syntax::list(args, 1, "category list", line)?;
    let items = syntax::cat_items(list, line)?;
    syntax::end(args, 2)?;
    Ok(AstData::CatSet(CatSet { name, items }))
}

pub(crate) fn categoryrange(
    b: &mut Builder,
    args: &[ParseNode],
    line: u32,
) -> Result<AstData, BuildError> {
    let name = syntax::atom(args, 0, "categoryrange name", line)?;
    let name = b.declare(SymKind::CatSets, "categoryrange", name, line)?;
    let pair = syntax::list(args, 1, "category range", line)?;
    let low = syntax::atom(pair, 0, "low category", line)?.to_string();
    let high = syntax::atom(pair, 1, "high category", line)?.to_string();
    syntax::end(pair, 2)?;
    syntax::end(args, 2)?;
    Ok(AstData::CatRange(CatRange { name, low, high }))
}

fn name_list(
    args: &[ParseNode],
    what: &'static str,
    line: u32,
) -> Result<Vec<String>, BuildError> {
    let list = syntax::list(args, 0, what, line)?;
    if list.is_empty() {
        return Err(BuildError::new(BuildErrorKind::MissingOperand(what), line));
    }
    let names = list
        .iter()
        .map(|item| {
            item.as_token()
                .map(str::to_string)
                .ok_or_else(|| BuildError::new(BuildErrorKind::UnexpectedList(what), item.line))
        })
        .collect::<Result<Vec<_>, _>>()?;
    syntax::end(args, 1)?;
    Ok(names)
}

pub(crate) fn categoryorder(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let cats = name_list(args, "category name", line)?;
    Ok(AstData::CatOrder(CatOrder { cats }))
}

/// The dominance list orders sensitivities lowest first.
pub(crate) fn dominance(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let sens = name_list(args, "sensitivity name", line)?;
    Ok(AstData::Dominance(Dominance { sens }))
}

pub(crate) fn sensitivitycategory(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let sens_str = syntax::atom(args, 0, "sensitivity", line)?.to_string();
    let list = syntax::list(args, 1, "category list", line)?;
    let cats = syntax::cat_items(list, line)?;
    syntax::end(args, 2)?;
    Ok(AstData::SensCat(SensCat { sens_str, cats }))
}

pub(crate) fn level(
    b: &mut Builder,
    args: &[ParseNode],
    line: u32,
) -> Result<AstData, BuildError> {
    let name = syntax::atom(args, 0, "level name", line)?;
    let name = b.declare(SymKind::Levels, "level", name, line)?;
    let body = syntax::list(args, 1, "level", line)?;
    let level = syntax::anon_level(body, line)?;
    syntax::end(args, 2)?;
    Ok(AstData::Level(NamedLevel { name, level }))
}

pub(crate) fn levelrange(
    b: &mut Builder,
    args: &[ParseNode],
    line: u32,
) -> Result<AstData, BuildError> {
    let name = syntax::atom(args, 0, "levelrange name", line)?;
    let name = b.declare(SymKind::LevelRanges, "levelrange", name, line)?;
    let body = syntax::list(args, 1, "level range", line)?;
    let range = syntax::anon_levelrange(body, line)?;
    syntax::end(args, 2)?;
    Ok(AstData::LevelRange(NamedLevelRange { name, range }))
}
