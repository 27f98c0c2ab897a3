//! Security contexts and the labeling statements that attach them to
//! files, network objects, and devices.

use crate::cil::ast::mls::LevelRange;
use crate::cil::ast::NamedOrAnon;
use serde::Serialize;
use std::net::IpAddr;

/// An anonymous security context: user, role, type, and an MLS range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Context {
    pub user_str: String,
    pub role_str: String,
    pub type_str: String,
    pub range: NamedOrAnon<LevelRange>,
}

/// `(context <name> (<user> <role> <type> <range>))`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedContext {
    pub name: String,
    pub context: Context,
}

/// `(sidcontext <sid> <context>)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidContext {
    pub sid_str: String,
    pub context: NamedOrAnon<Context>,
}

/// The object-kind selector of a `filecon` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileType {
    Any,
    File,
    Dir,
    Char,
    Block,
    Socket,
    Pipe,
    Symlink,
}

impl FileType {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "any" => FileType::Any,
            "file" => FileType::File,
            "dir" => FileType::Dir,
            "char" => FileType::Char,
            "block" => FileType::Block,
            "socket" => FileType::Socket,
            "pipe" => FileType::Pipe,
            "symlink" => FileType::Symlink,
            _ => return None,
        })
    }
}

/// `(filecon <root> <path> <type> <context>)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileCon {
    pub root_str: String,
    pub path_str: String,
    pub file_type: FileType,
    pub context: NamedOrAnon<Context>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Protocol {
    Tcp,
    Udp,
}

impl Protocol {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "tcp" => Protocol::Tcp,
            "udp" => Protocol::Udp,
            _ => return None,
        })
    }
}

/// `(portcon tcp|udp <port>|(<low> <high>) <context>)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortCon {
    pub proto: Protocol,
    pub port_low: u32,
    pub port_high: u32,
    pub context: NamedOrAnon<Context>,
}

/// `(nodecon <addr> <mask> <context>)` — address and mask are declared
/// `ipaddr` names or literal addresses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeCon {
    pub addr: NamedOrAnon<IpAddr>,
    pub mask: NamedOrAnon<IpAddr>,
    pub context: NamedOrAnon<Context>,
}

/// `(genfscon <fs> <path> <context>)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenFsCon {
    pub fs_str: String,
    pub path_str: String,
    pub context: NamedOrAnon<Context>,
}

/// `(netifcon <interface> <if-context> <packet-context>)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetifCon {
    pub interface_str: String,
    pub if_context: NamedOrAnon<Context>,
    pub packet_context: NamedOrAnon<Context>,
}

/// `(pirqcon <irq> <context>)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PirqCon {
    pub pirq: u32,
    pub context: NamedOrAnon<Context>,
}

/// `(iomemcon <addr>|(<low> <high>) <context>)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IoMemCon {
    pub low: u64,
    pub high: u64,
    pub context: NamedOrAnon<Context>,
}

/// `(ioportcon <port>|(<low> <high>) <context>)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IoPortCon {
    pub low: u32,
    pub high: u32,
    pub context: NamedOrAnon<Context>,
}

/// `(pcidevicecon <device> <context>)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PciDeviceCon {
    pub device: u32,
    pub context: NamedOrAnon<Context>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FsUseKind {
    Xattr,
    Task,
    Trans,
}

impl FsUseKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "xattr" => FsUseKind::Xattr,
            "task" => FsUseKind::Task,
            "trans" => FsUseKind::Trans,
            _ => return None,
        })
    }
}

/// `(fsuse xattr|task|trans <fs> <context>)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FsUse {
    pub kind: FsUseKind,
    pub fs_str: String,
    pub context: NamedOrAnon<Context>,
}

/// `(ipaddr <name> <address>)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpAddrDecl {
    pub name: String,
    pub ip: IpAddr,
}
