//! Typed AST
//!
//! One node per recognized statement, mirroring the parse tree's shape but
//! carrying a typed datum instead of raw tokens. The statement kind and its
//! payload live together in the [`AstData`] enum, so a node can never claim
//! to be one kind while holding another kind's data.
//!
//! Names inside datums are owned, unresolved strings (`src_str`-style
//! references); turning them into links to the declarations they name is
//! the resolver's job and happens after this crate is done.
//!
//! Children are an ordered vector. Statement order inside a block is
//! semantically meaningful in CIL, so insertion order is preserved
//! everywhere.

pub mod classes;
pub mod conditional;
pub mod containers;
pub mod contexts;
pub mod decls;
pub mod mls;
pub mod rules;

pub use classes::{
    Class, ClassCommon, ClassMap, ClassMapping, ClassPermSet, ClassPermissionSet, Common, Perm,
    PermSet, PermissionSet,
};
pub use conditional::{CondBlock, CondKind, Constrain, CondIf};
pub use containers::{Block, BlockAbstract, BlockInherit, Call, CallArg, Macro, MacroParam, Optional, ParamKind, ResolveState};
pub use contexts::{
    Context, FileCon, FileType, FsUse, FsUseKind, GenFsCon, IoMemCon, IoPortCon, IpAddrDecl,
    NamedContext, NetifCon, NodeCon, PciDeviceCon, PirqCon, PortCon, Protocol, SidContext,
};
pub use decls::{
    Boolean, Bounds, Mls, PolicyCap, Role, RoleType, Sid, Type, TypeAlias, TypeAttribute,
    TypePermissive, User, UserLevel, UserRange, UserRole,
};
pub use mls::{
    CatAlias, CatItem, CatOrder, CatRange, CatSet, Category, Dominance, Level, LevelRange,
    NamedLevel, NamedLevelRange, SensAlias, SensCat, Sensitivity,
};
pub use rules::{
    AvRule, AvRuleKind, NameTypeTransition, RangeTransition, RoleAllow, RoleTransition,
    TypeAttributeSet, TypeRule, TypeRuleKind,
};

use serde::Serialize;

/// A reference that is either a name declared elsewhere or an anonymous
/// inline value. Several statement operands (contexts, levels, ranges,
/// class-permission sets, IP addresses) allow both spellings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NamedOrAnon<T> {
    Named(String),
    Anon(T),
}

/// A node of the typed AST.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AstNode {
    pub data: AstData,
    pub children: Vec<AstNode>,
    pub line: u32,
}

impl AstNode {
    pub fn new(data: AstData, line: u32) -> Self {
        Self {
            data,
            children: Vec::new(),
            line,
        }
    }

    /// The statement keyword this node was built from.
    pub fn kind_name(&self) -> &'static str {
        self.data.kind_name()
    }

    /// Depth-first pre-order traversal over this node and its descendants.
    pub fn iter_all_nodes(&self) -> Box<dyn Iterator<Item = &AstNode> + '_> {
        Box::new(
            std::iter::once(self).chain(self.children.iter().flat_map(|c| c.iter_all_nodes())),
        )
    }
}

/// The statement kind and its payload, together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AstData {
    /// The synthetic root above all top-level statements.
    Root,

    Block(Block),
    BlockInherit(BlockInherit),
    BlockAbstract(BlockAbstract),
    Optional(Optional),
    Macro(Macro),
    Call(Call),

    Class(Class),
    ClassCommon(ClassCommon),
    Common(Common),
    PermissionSet(PermissionSet),
    ClassPermissionSet(ClassPermissionSet),
    ClassMap(ClassMap),
    ClassMapping(ClassMapping),

    Sid(Sid),
    SidContext(SidContext),

    Type(Type),
    TypeAttribute(TypeAttribute),
    TypeAttributeSet(TypeAttributeSet),
    TypeAlias(TypeAlias),
    TypeBounds(Bounds),
    TypePermissive(TypePermissive),

    Role(Role),
    RoleType(RoleType),
    RoleAllow(RoleAllow),
    RoleTransition(RoleTransition),
    RoleBounds(Bounds),

    User(User),
    UserRole(UserRole),
    UserLevel(UserLevel),
    UserRange(UserRange),
    UserBounds(Bounds),

    AvRule(AvRule),
    TypeRule(TypeRule),
    NameTypeTransition(NameTypeTransition),
    RangeTransition(RangeTransition),

    Boolean(Boolean),
    Tunable(Boolean),
    BooleanIf(CondIf),
    TunableIf(CondIf),
    CondBlock(CondBlock),

    Constrain(Constrain),
    MlsConstrain(Constrain),

    Sensitivity(Sensitivity),
    SensAlias(SensAlias),
    Category(Category),
    CatAlias(CatAlias),
    CatSet(CatSet),
    CatRange(CatRange),
    CatOrder(CatOrder),
    Dominance(Dominance),
    SensCat(SensCat),
    Level(NamedLevel),
    LevelRange(NamedLevelRange),
    Mls(Mls),

    Context(NamedContext),
    FileCon(FileCon),
    PortCon(PortCon),
    NodeCon(NodeCon),
    GenFsCon(GenFsCon),
    NetifCon(NetifCon),
    PirqCon(PirqCon),
    IoMemCon(IoMemCon),
    IoPortCon(IoPortCon),
    PciDeviceCon(PciDeviceCon),
    FsUse(FsUse),

    PolicyCap(PolicyCap),
    Ipaddr(IpAddrDecl),
}

impl AstData {
    /// The CIL keyword of the statement this datum belongs to.
    pub fn kind_name(&self) -> &'static str {
        match self {
            AstData::Root => "<root>",
            AstData::Block(_) => "block",
            AstData::BlockInherit(_) => "blockinherit",
            AstData::BlockAbstract(_) => "blockabstract",
            AstData::Optional(_) => "optional",
            AstData::Macro(_) => "macro",
            AstData::Call(_) => "call",
            AstData::Class(_) => "class",
            AstData::ClassCommon(_) => "classcommon",
            AstData::Common(_) => "common",
            AstData::PermissionSet(_) => "permissionset",
            AstData::ClassPermissionSet(_) => "classpermissionset",
            AstData::ClassMap(_) => "classmap",
            AstData::ClassMapping(_) => "classmapping",
            AstData::Sid(_) => "sid",
            AstData::SidContext(_) => "sidcontext",
            AstData::Type(_) => "type",
            AstData::TypeAttribute(_) => "typeattribute",
            AstData::TypeAttributeSet(_) => "typeattributeset",
            AstData::TypeAlias(_) => "typealias",
            AstData::TypeBounds(_) => "typebounds",
            AstData::TypePermissive(_) => "typepermissive",
            AstData::Role(_) => "role",
            AstData::RoleType(_) => "roletype",
            AstData::RoleAllow(_) => "roleallow",
            AstData::RoleTransition(_) => "roletransition",
            AstData::RoleBounds(_) => "rolebounds",
            AstData::User(_) => "user",
            AstData::UserRole(_) => "userrole",
            AstData::UserLevel(_) => "userlevel",
            AstData::UserRange(_) => "userrange",
            AstData::UserBounds(_) => "userbounds",
            AstData::AvRule(rule) => rule.kind.keyword(),
            AstData::TypeRule(rule) => rule.kind.keyword(),
            AstData::NameTypeTransition(_) => "nametypetransition",
            AstData::RangeTransition(_) => "rangetransition",
            AstData::Boolean(_) => "boolean",
            AstData::Tunable(_) => "tunable",
            AstData::BooleanIf(_) => "booleanif",
            AstData::TunableIf(_) => "tunableif",
            AstData::CondBlock(block) => match block.kind {
                CondKind::True => "true",
                CondKind::False => "false",
            },
            AstData::Constrain(_) => "constrain",
            AstData::MlsConstrain(_) => "mlsconstrain",
            AstData::Sensitivity(_) => "sensitivity",
            AstData::SensAlias(_) => "sensitivityalias",
            AstData::Category(_) => "category",
            AstData::CatAlias(_) => "categoryalias",
            AstData::CatSet(_) => "categoryset",
            AstData::CatRange(_) => "categoryrange",
            AstData::CatOrder(_) => "categoryorder",
            AstData::Dominance(_) => "dominance",
            AstData::SensCat(_) => "sensitivitycategory",
            AstData::Level(_) => "level",
            AstData::LevelRange(_) => "levelrange",
            AstData::Mls(_) => "mls",
            AstData::Context(_) => "context",
            AstData::FileCon(_) => "filecon",
            AstData::PortCon(_) => "portcon",
            AstData::NodeCon(_) => "nodecon",
            AstData::GenFsCon(_) => "genfscon",
            AstData::NetifCon(_) => "netifcon",
            AstData::PirqCon(_) => "pirqcon",
            AstData::IoMemCon(_) => "iomemcon",
            AstData::IoPortCon(_) => "ioportcon",
            AstData::PciDeviceCon(_) => "pcidevicecon",
            AstData::FsUse(_) => "fsuse",
            AstData::PolicyCap(_) => "policycap",
            AstData::Ipaddr(_) => "ipaddr",
        }
    }

    /// The declared or primary name, for display purposes.
    pub fn display_label(&self) -> Option<&str> {
        match self {
            AstData::Block(d) => Some(&d.name),
            AstData::BlockInherit(d) => Some(&d.block_str),
            AstData::BlockAbstract(d) => Some(&d.block_str),
            AstData::Optional(d) => Some(&d.name),
            AstData::Macro(d) => Some(&d.name),
            AstData::Call(d) => Some(&d.macro_str),
            AstData::Class(d) => Some(&d.name),
            AstData::Common(d) => Some(&d.name),
            AstData::PermissionSet(d) => Some(&d.name),
            AstData::ClassPermissionSet(d) => Some(&d.name),
            AstData::ClassMap(d) => Some(&d.name),
            AstData::ClassMapping(d) => Some(&d.map_str),
            AstData::Sid(d) => Some(&d.name),
            AstData::SidContext(d) => Some(&d.sid_str),
            AstData::Type(d) => Some(&d.name),
            AstData::TypeAttribute(d) => Some(&d.name),
            AstData::TypeAttributeSet(d) => Some(&d.attr_str),
            AstData::TypeAlias(d) => Some(&d.name),
            AstData::TypePermissive(d) => Some(&d.type_str),
            AstData::Role(d) => Some(&d.name),
            AstData::User(d) => Some(&d.name),
            AstData::Boolean(d) | AstData::Tunable(d) => Some(&d.name),
            AstData::Sensitivity(d) => Some(&d.name),
            AstData::SensAlias(d) => Some(&d.name),
            AstData::Category(d) => Some(&d.name),
            AstData::CatAlias(d) => Some(&d.name),
            AstData::CatSet(d) => Some(&d.name),
            AstData::CatRange(d) => Some(&d.name),
            AstData::Level(d) => Some(&d.name),
            AstData::LevelRange(d) => Some(&d.name),
            AstData::Context(d) => Some(&d.name),
            AstData::PolicyCap(d) => Some(&d.name),
            AstData::Ipaddr(d) => Some(&d.name),
            _ => None,
        }
    }
}
