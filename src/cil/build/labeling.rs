//! Generators for contexts and the in-policy labeling statements (file,
//! network, and device contexts).

use crate::cil::ast::contexts::{
    FileCon, FileType, FsUse, FsUseKind, GenFsCon, IoMemCon, IoPortCon, IpAddrDecl, NamedContext,
    NetifCon, NodeCon, PciDeviceCon, PirqCon, PortCon, Protocol, SidContext,
};
use crate::cil::ast::AstData;
use crate::cil::build::{syntax, Builder};
use crate::cil::error::{BuildError, BuildErrorKind};
use crate::cil::parsing::ParseNode;
use crate::cil::symtab::SymKind;

/// A named context must spell the range as one operand; the five-field
/// form is only accepted anonymously.
pub(crate) fn context(
    b: &mut Builder,
    args: &[ParseNode],
    line: u32,
) -> Result<AstData, BuildError> {
    let name = syntax::atom(args, 0, "context name", line)?;
    let name = b.declare(SymKind::Contexts, "context", name, line)?;
    let body = syntax::list(args, 1, "context", line)?;
    syntax::end(body, 4)?;
    let context = syntax::anon_context(body, line)?;
    syntax::end(args, 2)?;
    Ok(AstData::Context(NamedContext { name, context }))
}

pub(crate) fn sidcontext(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let sid_str = syntax::atom(args, 0, "sid", line)?.to_string();
    let context = syntax::context(syntax::operand(args, 1, "context", line)?)?;
    syntax::end(args, 2)?;
    Ok(AstData::SidContext(SidContext { sid_str, context }))
}

pub(crate) fn filecon(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let root_str = syntax::atom(args, 0, "root path", line)?.to_string();
    let path_str = syntax::atom(args, 1, "path", line)?.to_string();
    let type_kw = syntax::atom(args, 2, "file type", line)?;
    let file_type = FileType::from_keyword(type_kw).ok_or_else(|| {
        BuildError::new(
            BuildErrorKind::InvalidLiteral {
                kind: "file type",
                value: type_kw.to_string(),
            },
            line,
        )
    })?;
    let context = syntax::context(syntax::operand(args, 3, "context", line)?)?;
    syntax::end(args, 4)?;
    Ok(AstData::FileCon(FileCon {
        root_str,
        path_str,
        file_type,
        context,
    }))
}

pub(crate) fn portcon(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let proto_kw = syntax::atom(args, 0, "protocol", line)?;
    let proto = Protocol::from_keyword(proto_kw).ok_or_else(|| {
        BuildError::new(
            BuildErrorKind::InvalidLiteral {
                kind: "protocol",
                value: proto_kw.to_string(),
            },
            line,
        )
    })?;
    let (port_low, port_high) =
        syntax::number_range(syntax::operand(args, 1, "port", line)?, "port")?;
    let context = syntax::context(syntax::operand(args, 2, "context", line)?)?;
    syntax::end(args, 3)?;
    Ok(AstData::PortCon(PortCon {
        proto,
        port_low,
        port_high,
        context,
    }))
}

pub(crate) fn nodecon(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let addr = syntax::node_addr(syntax::operand(args, 0, "node address", line)?)?;
    let mask = syntax::node_addr(syntax::operand(args, 1, "node mask", line)?)?;
    let context = syntax::context(syntax::operand(args, 2, "context", line)?)?;
    syntax::end(args, 3)?;
    Ok(AstData::NodeCon(NodeCon {
        addr,
        mask,
        context,
    }))
}

pub(crate) fn genfscon(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let fs_str = syntax::atom(args, 0, "filesystem", line)?.to_string();
    let path_str = syntax::atom(args, 1, "path", line)?.to_string();
    let context = syntax::context(syntax::operand(args, 2, "context", line)?)?;
    syntax::end(args, 3)?;
    Ok(AstData::GenFsCon(GenFsCon {
        fs_str,
        path_str,
        context,
    }))
}

pub(crate) fn netifcon(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let interface_str = syntax::atom(args, 0, "interface", line)?.to_string();
    let if_context = syntax::context(syntax::operand(args, 1, "interface context", line)?)?;
    let packet_context = syntax::context(syntax::operand(args, 2, "packet context", line)?)?;
    syntax::end(args, 3)?;
    Ok(AstData::NetifCon(NetifCon {
        interface_str,
        if_context,
        packet_context,
    }))
}

pub(crate) fn pirqcon(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let pirq = syntax::number(syntax::atom(args, 0, "irq", line)?, "irq", line)?;
    let context = syntax::context(syntax::operand(args, 1, "context", line)?)?;
    syntax::end(args, 2)?;
    Ok(AstData::PirqCon(PirqCon { pirq, context }))
}

pub(crate) fn iomemcon(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let (low, high) =
        syntax::number_range(syntax::operand(args, 0, "memory address", line)?, "memory address")?;
    let context = syntax::context(syntax::operand(args, 1, "context", line)?)?;
    syntax::end(args, 2)?;
    Ok(AstData::IoMemCon(IoMemCon { low, high, context }))
}

pub(crate) fn ioportcon(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let (low, high) =
        syntax::number_range(syntax::operand(args, 0, "io port", line)?, "io port")?;
    let context = syntax::context(syntax::operand(args, 1, "context", line)?)?;
    syntax::end(args, 2)?;
    Ok(AstData::IoPortCon(IoPortCon { low, high, context }))
}

pub(crate) fn pcidevicecon(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let device = syntax::number(syntax::atom(args, 0, "device", line)?, "device", line)?;
    let context = syntax::context(syntax::operand(args, 1, "context", line)?)?;
    syntax::end(args, 2)?;
    Ok(AstData::PciDeviceCon(PciDeviceCon { device, context }))
}

pub(crate) fn fsuse(args: &[ParseNode], line: u32) -> Result<AstData, BuildError> {
    let kind_kw = syntax::atom(args, 0, "fsuse type", line)?;
    let kind = FsUseKind::from_keyword(kind_kw).ok_or_else(|| {
        BuildError::new(
            BuildErrorKind::InvalidLiteral {
                kind: "fsuse type",
                value: kind_kw.to_string(),
            },
            line,
        )
    })?;
    let fs_str = syntax::atom(args, 1, "filesystem", line)?.to_string();
    let context = syntax::context(syntax::operand(args, 2, "context", line)?)?;
    syntax::end(args, 3)?;
    Ok(AstData::FsUse(FsUse {
        kind,
        fs_str,
        context,
    }))
}

pub(crate) fn ipaddr(
    b: &mut Builder,
    args: &[ParseNode],
    line: u32,
) -> Result<AstData, BuildError> {
    let name = syntax::atom(args, 0, "ipaddr name", line)?;
    let name = b.declare(SymKind::IpAddrs, "ipaddr", name, line)?;
    let text = syntax::atom(args, 1, "IP address", line)?;
    let ip = syntax::ip_literal(text, line)?;
    syntax::end(args, 2)?;
    Ok(AstData::Ipaddr(IpAddrDecl { name, ip }))
}
