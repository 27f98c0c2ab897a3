//! AST build pass
//!
//! Walks a [`ParseTree`] and turns every list into a typed [`AstNode`],
//! producing a [`Db`] or the first [`BuildError`] encountered. The walk is
//! a single pass: names are recorded in the symbol tables of the scope they
//! were declared in but never resolved, so forward references are fine and
//! dangling ones are caught later.
//!
//! Scopes are a stack. The builder pushes a fresh [`SymtabSet`] when it
//! enters a `block`, `macro`, or `optional`, fills it while walking the
//! body, and moves it into the container's datum on the way out.
//! Conditionals do not open a scope; declarations inside a `booleanif`
//! branch land in the enclosing container.

pub mod classes;
pub mod core;
pub mod labeling;
pub mod mls;
pub mod syntax;

use crate::cil::ast::containers::{
    Block, BlockAbstract, BlockInherit, Call, CallArg, Macro, MacroParam, Optional, ParamKind,
    ResolveState,
};
use crate::cil::ast::conditional::{CondBlock, CondIf, CondKind};
use crate::cil::ast::{AstData, AstNode};
use crate::cil::db::Db;
use crate::cil::error::{BuildError, BuildErrorKind};
use crate::cil::expr::{build_expr_stack, ExprFlavor};
use crate::cil::parsing::{ParseNode, ParseTree};
use crate::cil::symtab::{SymEntry, SymKind, SymtabSet};

/// Build the typed AST for one parse tree.
pub fn build_ast(tree: &ParseTree) -> Result<Db, BuildError> {
    let mut builder = Builder::new();
    let mut root = AstNode::new(AstData::Root, 0);
    for node in &tree.root {
        root.children.push(builder.statement(node)?);
    }
    let symtab = builder.scopes.pop().unwrap_or_default();
    Ok(Db {
        root,
        symtab,
        mls: builder.mls,
    })
}

/// Which container the walk is currently inside, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContainerKind {
    Root,
    Block,
    Macro,
    Optional,
    BooleanIf,
    TunableIf,
}

impl ContainerKind {
    fn name(self) -> &'static str {
        match self {
            ContainerKind::Root => "the policy root",
            ContainerKind::Block => "a block",
            ContainerKind::Macro => "a macro",
            ContainerKind::Optional => "an optional",
            ContainerKind::BooleanIf => "a booleanif",
            ContainerKind::TunableIf => "a tunableif",
        }
    }
}

pub struct Builder {
    scopes: Vec<SymtabSet>,
    containers: Vec<ContainerKind>,
    mls: bool,
}

impl Builder {
    fn new() -> Self {
        Self {
            scopes: vec![SymtabSet::new()],
            containers: vec![ContainerKind::Root],
            mls: false,
        }
    }

    /// Record a declaration in the current scope. The declared name must be
    /// a bare identifier; dotted paths only ever refer, never declare.
    pub(crate) fn declare(
        &mut self,
        kind: SymKind,
        declared_by: &'static str,
        name: &str,
        line: u32,
    ) -> Result<String, BuildError> {
        if name.contains('.') {
            return Err(BuildError::new(
                BuildErrorKind::InvalidLiteral {
                    kind: "name",
                    value: name.to_string(),
                },
                line,
            ));
        }
        let scope = self
            .scopes
            .last_mut()
            .expect("the scope stack always holds the current scope");
        scope
            .insert(kind, name, SymEntry { declared_by, line })
            .map_err(|dup| BuildError::new(BuildErrorKind::DuplicateEntry(dup.name), line))?;
        Ok(name.to_string())
    }

    pub(crate) fn set_mls(&mut self, value: bool) {
        self.mls = value;
    }

    /// Some statements are syntactically fine but banned inside certain
    /// containers; the check walks every enclosing container, not just the
    /// innermost one.
    fn check_context(&self, keyword: &str, line: u32) -> Result<(), BuildError> {
        for container in self.containers.iter().rev() {
            let illegal = match container {
                ContainerKind::Macro => matches!(
                    keyword,
                    "tunable" | "block" | "blockinherit" | "blockabstract" | "macro"
                ),
                ContainerKind::Optional => {
                    matches!(keyword, "tunable" | "block" | "blockabstract" | "macro")
                }
                ContainerKind::TunableIf => keyword == "tunable",
                _ => false,
            };
            if illegal {
                return Err(BuildError::new(
                    BuildErrorKind::StatementNotAllowed {
                        keyword: keyword.to_string(),
                        container: container.name(),
                    },
                    line,
                ));
            }
        }
        Ok(())
    }

    fn statement(&mut self, node: &ParseNode) -> Result<AstNode, BuildError> {
        let items = node.as_list().ok_or_else(|| {
            BuildError::new(BuildErrorKind::ExpectedList("statement"), node.line)
        })?;
        let head = items.first().ok_or_else(|| {
            BuildError::new(BuildErrorKind::MissingOperand("statement keyword"), node.line)
        })?;
        let keyword = head.as_token().ok_or_else(|| {
            BuildError::new(BuildErrorKind::UnexpectedList("statement keyword"), head.line)
        })?;
        self.check_context(keyword, node.line)?;

        let args = &items[1..];
        match keyword {
            "block" => self.block(args, node.line),
            "optional" => self.optional(args, node.line),
            "macro" => self.macro_decl(args, node.line),
            "booleanif" => self.conditional(args, node.line, false),
            "tunableif" => self.conditional(args, node.line, true),
            _ => {
                let data = self.leaf(keyword, args, node.line)?;
                Ok(AstNode::new(data, node.line))
            }
        }
    }

    /// Walk a container body under a fresh scope; yields the children and
    /// the scope's filled tables.
    fn scoped(
        &mut self,
        kind: ContainerKind,
        body: &[ParseNode],
    ) -> Result<(Vec<AstNode>, SymtabSet), BuildError> {
        self.scopes.push(SymtabSet::new());
        self.containers.push(kind);
        let mut children = Vec::with_capacity(body.len());
        for stmt in body {
            children.push(self.statement(stmt)?);
        }
        self.containers.pop();
        let symtab = self.scopes.pop().unwrap_or_default();
        Ok((children, symtab))
    }

    fn block(&mut self, args: &[ParseNode], line: u32) -> Result<AstNode, BuildError> {
        let name = syntax::atom(args, 0, "block name", line)?;
        let name = self.declare(SymKind::Blocks, "block", name, line)?;
        let (children, symtab) = self.scoped(ContainerKind::Block, &args[1..])?;
        let mut node = AstNode::new(
            AstData::Block(Block {
                name,
                is_abstract: false,
                symtab,
            }),
            line,
        );
        node.children = children;
        Ok(node)
    }

    fn optional(&mut self, args: &[ParseNode], line: u32) -> Result<AstNode, BuildError> {
        let name = syntax::atom(args, 0, "optional name", line)?;
        let name = self.declare(SymKind::Blocks, "optional", name, line)?;
        let (children, symtab) = self.scoped(ContainerKind::Optional, &args[1..])?;
        let mut node = AstNode::new(
            AstData::Optional(Optional {
                name,
                state: ResolveState::Unresolved,
                symtab,
            }),
            line,
        );
        node.children = children;
        Ok(node)
    }

    fn macro_decl(&mut self, args: &[ParseNode], line: u32) -> Result<AstNode, BuildError> {
        let name = syntax::atom(args, 0, "macro name", line)?;
        let name = self.declare(SymKind::Blocks, "macro", name, line)?;

        let param_list = syntax::list(args, 1, "parameter list", line)?;
        let mut params: Vec<MacroParam> = Vec::with_capacity(param_list.len());
        for item in param_list {
            let pair = item.as_list().ok_or_else(|| {
                BuildError::new(BuildErrorKind::ExpectedList("macro parameter"), item.line)
            })?;
            let kind_kw = syntax::atom(pair, 0, "parameter kind", item.line)?;
            let kind = ParamKind::from_keyword(kind_kw).ok_or_else(|| {
                BuildError::new(
                    BuildErrorKind::InvalidLiteral {
                        kind: "parameter kind",
                        value: kind_kw.to_string(),
                    },
                    item.line,
                )
            })?;
            let param_name = syntax::atom(pair, 1, "parameter name", item.line)?;
            syntax::end(pair, 2)?;
            if param_name.contains('.') {
                return Err(BuildError::new(
                    BuildErrorKind::InvalidLiteral {
                        kind: "name",
                        value: param_name.to_string(),
                    },
                    item.line,
                ));
            }
            if params.iter().any(|p| p.kind == kind && p.name == param_name) {
                return Err(BuildError::new(
                    BuildErrorKind::DuplicateEntry(param_name.to_string()),
                    item.line,
                ));
            }
            params.push(MacroParam {
                kind,
                name: param_name.to_string(),
            });
        }

        let (children, symtab) = self.scoped(ContainerKind::Macro, &args[2..])?;
        let mut node = AstNode::new(
            AstData::Macro(Macro {
                name,
                params,
                symtab,
            }),
            line,
        );
        node.children = children;
        Ok(node)
    }

    /// `booleanif` and `tunableif` share one shape: a condition expression
    /// followed by one or two `true`/`false` branches in either order.
    fn conditional(
        &mut self,
        args: &[ParseNode],
        line: u32,
        tunable: bool,
    ) -> Result<AstNode, BuildError> {
        let cond = syntax::operand(args, 0, "condition expression", line)?;
        let mut expr = Vec::new();
        build_expr_stack(cond, ExprFlavor::Bool, &mut expr)?;

        let branches = &args[1..];
        if branches.is_empty() {
            return Err(BuildError::new(
                BuildErrorKind::MissingOperand("condition block"),
                line,
            ));
        }
        if branches.len() > 2 {
            return Err(BuildError::new(
                BuildErrorKind::TrailingOperands,
                branches[2].line,
            ));
        }

        let container = if tunable {
            ContainerKind::TunableIf
        } else {
            ContainerKind::BooleanIf
        };
        let mut has_true = false;
        let mut has_false = false;
        let mut children = Vec::with_capacity(branches.len());
        for branch in branches {
            let items = branch.as_list().ok_or_else(|| {
                BuildError::new(BuildErrorKind::ExpectedList("condition block"), branch.line)
            })?;
            let head = syntax::atom(items, 0, "condition branch", branch.line)?;
            let (kind, seen) = match head {
                "true" => (CondKind::True, &mut has_true),
                "false" => (CondKind::False, &mut has_false),
                _ => {
                    return Err(BuildError::new(
                        BuildErrorKind::UnknownStatement(head.to_string()),
                        branch.line,
                    ))
                }
            };
            if *seen {
                return Err(BuildError::new(
                    BuildErrorKind::DuplicateEntry(head.to_string()),
                    branch.line,
                ));
            }
            *seen = true;

            self.containers.push(container);
            let mut body = Vec::with_capacity(items.len() - 1);
            for stmt in &items[1..] {
                body.push(self.statement(stmt)?);
            }
            self.containers.pop();

            let mut node = AstNode::new(AstData::CondBlock(CondBlock { kind }), branch.line);
            node.children = body;
            children.push(node);
        }

        let cond_if = CondIf {
            expr,
            has_true,
            has_false,
        };
        let data = if tunable {
            AstData::TunableIf(cond_if)
        } else {
            AstData::BooleanIf(cond_if)
        };
        let mut node = AstNode::new(data, line);
        node.children = children;
        Ok(node)
    }

    fn call(&mut self, args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
        let macro_str = syntax::atom(args, 0, "macro name", line)?.to_string();
        let call_args = match args.get(1) {
            Some(node) => {
                let items = node.as_list().ok_or_else(|| {
                    BuildError::new(BuildErrorKind::ExpectedList("argument list"), node.line)
                })?;
                call_args(items)?
            }
            None => Vec::new(),
        };
        syntax::end(args, 2)?;
        Ok(AstData::Call(Call {
            macro_str,
            args: call_args,
        }))
    }

    fn leaf(&mut self, keyword: &str, args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
        match keyword {
            "blockinherit" => {
                let block_str = syntax::atom(args, 0, "block name", line)?.to_string();
                syntax::end(args, 1)?;
                Ok(AstData::BlockInherit(BlockInherit { block_str }))
            }
            "blockabstract" => {
                let block_str = syntax::atom(args, 0, "block name", line)?.to_string();
                syntax::end(args, 1)?;
                Ok(AstData::BlockAbstract(BlockAbstract { block_str }))
            }
            "call" => self.call(args, line),

            "type" => core::type_decl(self, args, line),
            "typeattribute" => core::typeattribute(self, args, line),
            "typeattributeset" => core::typeattributeset(args, line),
            "typealias" => core::typealias(self, args, line),
            "typebounds" => core::typebounds(args, line),
            "typepermissive" => core::typepermissive(args, line),
            "role" => core::role(self, args, line),
            "roletype" => core::roletype(args, line),
            "roleallow" => core::roleallow(args, line),
            "roletransition" => core::roletransition(args, line),
            "rolebounds" => core::rolebounds(args, line),
            "user" => core::user(self, args, line),
            "userrole" => core::userrole(args, line),
            "userlevel" => core::userlevel(args, line),
            "userrange" => core::userrange(args, line),
            "userbounds" => core::userbounds(args, line),
            "sid" => core::sid(self, args, line),
            "boolean" => core::boolean(self, args, line),
            "tunable" => core::tunable(self, args, line),
            "policycap" => core::policycap(self, args, line),
            "mls" => core::mls_flag(self, args, line),
            "allow" | "auditallow" | "dontaudit" | "neverallow" => {
                core::av_rule(keyword, args, line)
            }
            "typetransition" | "typechange" | "typemember" => {
                core::type_rule(keyword, args, line)
            }
            "nametypetransition" => core::nametypetransition(args, line),
            "rangetransition" => core::rangetransition(args, line),
            "constrain" => core::constrain(args, line, false),
            "mlsconstrain" => core::constrain(args, line, true),

            "class" => classes::class(self, args, line),
            "common" => classes::common(self, args, line),
            "classcommon" => classes::classcommon(args, line),
            "permissionset" => classes::permissionset(self, args, line),
            "classpermissionset" => classes::classpermissionset(self, args, line),
            "classmap" => classes::classmap(self, args, line),
            "classmapping" => classes::classmapping(args, line),

            "sensitivity" => mls::sensitivity(self, args, line),
            "sensitivityalias" => mls::sensitivityalias(self, args, line),
            "category" => mls::category(self, args, line),
            "categoryalias" => mls::categoryalias(self, args, line),
            "categoryset" => mls::categoryset(self, args, line),
            "categoryrange" => mls::categoryrange(self, args, line),
            "categoryorder" => mls::categoryorder(args, line),
            "dominance" => mls::dominance(args, line),
            "sensitivitycategory" => mls::sensitivitycategory(args, line),
            "level" => mls::level(self, args, line),
            "levelrange" => mls::levelrange(self, args, line),

            "context" => labeling::context(self, args, line),
            "sidcontext" => labeling::sidcontext(args, line),
            "filecon" => labeling::filecon(args, line),
            "portcon" => labeling::portcon(args, line),
            "nodecon" => labeling::nodecon(args, line),
            "genfscon" => labeling::genfscon(args, line),
            "netifcon" => labeling::netifcon(args, line),
            "pirqcon" => labeling::pirqcon(args, line),
            "iomemcon" => labeling::iomemcon(args, line),
            "ioportcon" => labeling::ioportcon(args, line),
            "pcidevicecon" => labeling::pcidevicecon(args, line),
            "fsuse" => labeling::fsuse(args, line),
            "ipaddr" => labeling::ipaddr(self, args, line),

            _ => Err(BuildError::new(
                BuildErrorKind::UnknownStatement(keyword.to_string()),
                line,
            )),
        }
    }
}

/// Recursively convert a `call` argument list. An empty sub-list carries no
/// argument and is rejected.
fn call_args(items: &[ParseNode]) -> Result<Vec<CallArg>, BuildError> {
    items
        .iter()
        .map(|item| match item.as_token() {
            Some(text) => Ok(CallArg::Atom(text.to_string())),
            None => {
                let inner = item.as_list().unwrap_or_default();
                if inner.is_empty() {
                    return Err(BuildError::new(
                        BuildErrorKind::MissingOperand("call argument"),
                        item.line,
                    ));
                }
                Ok(CallArg::List(call_args(inner)?))
            }
        })
        .collect()
}
