//! Integration tests for contexts and the file/network/device labeling
//! statements.

use cil::cil::ast::contexts::{FileType, FsUseKind, Protocol};
use cil::cil::ast::{AstData, NamedOrAnon};
use cil::cil::error::BuildErrorKind;
use cil::cil::symtab::SymKind;
use cil::cil::testing::{build_source, node_at};
use rstest::rstest;
use std::net::IpAddr;

#[test]
fn test_context_declaration_takes_a_range_operand() {
    let db = build_source("(context con (u r t ((s0) (s0))))").unwrap();
    match &node_at(&db, &[0]).data {
        AstData::Context(named) => {
            assert_eq!(named.name, "con");
            assert_eq!(named.context.user_str, "u");
            assert_eq!(named.context.role_str, "r");
            assert_eq!(named.context.type_str, "t");
            assert!(matches!(named.context.range, NamedOrAnon::Anon(_)));
        }
        other => panic!("expected context, got {}", other.kind_name()),
    }
    assert!(db.symtab.contains(SymKind::Contexts, "con"));
}

#[test]
fn test_context_declaration_rejects_the_five_field_form() {
    let err = build_source("(context con (u r t low high))").unwrap_err();
    assert_eq!(err.kind, BuildErrorKind::TrailingOperands);
}

#[test]
fn test_anonymous_context_accepts_five_fields() {
    let db = build_source("(sidcontext kernel (u r t low high))").unwrap();
    match &node_at(&db, &[0]).data {
        AstData::SidContext(sc) => {
            assert_eq!(sc.sid_str, "kernel");
            match &sc.context {
                NamedOrAnon::Anon(con) => match &con.range {
                    NamedOrAnon::Anon(range) => {
                        assert_eq!(range.low, NamedOrAnon::Named("low".to_string()));
                        assert_eq!(range.high, NamedOrAnon::Named("high".to_string()));
                    }
                    NamedOrAnon::Named(name) => panic!("expected a spelled range, got '{}'", name),
                },
                NamedOrAnon::Named(name) => panic!("expected an inline context, got '{}'", name),
            }
        }
        other => panic!("expected sidcontext, got {}", other.kind_name()),
    }
}

#[test]
fn test_sidcontext_with_named_context() {
    let db = build_source("(sidcontext kernel kernel_con)").unwrap();
    match &node_at(&db, &[0]).data {
        AstData::SidContext(sc) => {
            assert_eq!(sc.context, NamedOrAnon::Named("kernel_con".to_string()));
        }
        other => panic!("expected sidcontext, got {}", other.kind_name()),
    }
}

#[rstest]
#[case("any", FileType::Any)]
#[case("file", FileType::File)]
#[case("dir", FileType::Dir)]
#[case("char", FileType::Char)]
#[case("block", FileType::Block)]
#[case("socket", FileType::Socket)]
#[case("pipe", FileType::Pipe)]
#[case("symlink", FileType::Symlink)]
fn test_filecon_file_types(#[case] keyword: &str, #[case] file_type: FileType) {
    let source = format!(r#"(filecon "/" "/bin" {} bin_con)"#, keyword);
    let db = build_source(&source).unwrap();
    match &node_at(&db, &[0]).data {
        AstData::FileCon(fc) => {
            assert_eq!(fc.root_str, "/");
            assert_eq!(fc.path_str, "/bin");
            assert_eq!(fc.file_type, file_type);
            assert_eq!(fc.context, NamedOrAnon::Named("bin_con".to_string()));
        }
        other => panic!("expected filecon, got {}", other.kind_name()),
    }
}

#[test]
fn test_filecon_rejects_unknown_file_type() {
    let err = build_source(r#"(filecon "/" "/bin" folder bin_con)"#).unwrap_err();
    assert_eq!(
        err.kind,
        BuildErrorKind::InvalidLiteral {
            kind: "file type",
            value: "folder".to_string()
        }
    );
}

#[test]
fn test_portcon_single_port_and_range() {
    let db = build_source("(portcon tcp 80 http_con) (portcon udp (1024 65535) high_con)")
        .unwrap();
    match &node_at(&db, &[0]).data {
        AstData::PortCon(pc) => {
            assert_eq!(pc.proto, Protocol::Tcp);
            assert_eq!((pc.port_low, pc.port_high), (80, 80));
        }
        other => panic!("expected portcon, got {}", other.kind_name()),
    }
    match &node_at(&db, &[1]).data {
        AstData::PortCon(pc) => {
            assert_eq!(pc.proto, Protocol::Udp);
            assert_eq!((pc.port_low, pc.port_high), (1024, 65535));
        }
        other => panic!("expected portcon, got {}", other.kind_name()),
    }
}

#[test]
fn test_portcon_rejects_bad_protocol_and_port() {
    let err = build_source("(portcon sctp 80 con)").unwrap_err();
    assert_eq!(
        err.kind,
        BuildErrorKind::InvalidLiteral {
            kind: "protocol",
            value: "sctp".to_string()
        }
    );
    let err = build_source("(portcon tcp eighty con)").unwrap_err();
    assert_eq!(
        err.kind,
        BuildErrorKind::InvalidLiteral {
            kind: "port",
            value: "eighty".to_string()
        }
    );
}

#[test]
fn test_nodecon_literal_named_and_malformed_addresses() {
    let db = build_source("(nodecon 10.0.0.0 255.0.0.0 net_con)").unwrap();
    match &node_at(&db, &[0]).data {
        AstData::NodeCon(nc) => {
            let expected: IpAddr = "10.0.0.0".parse().unwrap();
            assert_eq!(nc.addr, NamedOrAnon::Anon(expected));
        }
        other => panic!("expected nodecon, got {}", other.kind_name()),
    }

    let db = build_source("(nodecon lan_addr lan_mask net_con)").unwrap();
    match &node_at(&db, &[0]).data {
        AstData::NodeCon(nc) => {
            assert_eq!(nc.addr, NamedOrAnon::Named("lan_addr".to_string()));
            assert_eq!(nc.mask, NamedOrAnon::Named("lan_mask".to_string()));
        }
        other => panic!("expected nodecon, got {}", other.kind_name()),
    }

    // looks like an address but is not one
    let err = build_source("(nodecon 10.0.0.256 255.0.0.0 net_con)").unwrap_err();
    assert_eq!(
        err.kind,
        BuildErrorKind::InvalidLiteral {
            kind: "IP address",
            value: "10.0.0.256".to_string()
        }
    );
}

#[test]
fn test_nodecon_accepts_ipv6() {
    let db = build_source("(nodecon ::1 ffff:: net_con)").unwrap();
    match &node_at(&db, &[0]).data {
        AstData::NodeCon(nc) => {
            let expected: IpAddr = "::1".parse().unwrap();
            assert_eq!(nc.addr, NamedOrAnon::Anon(expected));
        }
        other => panic!("expected nodecon, got {}", other.kind_name()),
    }
}

#[test]
fn test_genfscon_and_netifcon() {
    let db = build_source(r#"(genfscon proc "/" proc_con) (netifcon eth0 if_con pkt_con)"#)
        .unwrap();
    match &node_at(&db, &[0]).data {
        AstData::GenFsCon(g) => {
            assert_eq!(g.fs_str, "proc");
            assert_eq!(g.path_str, "/");
        }
        other => panic!("expected genfscon, got {}", other.kind_name()),
    }
    match &node_at(&db, &[1]).data {
        AstData::NetifCon(n) => {
            assert_eq!(n.interface_str, "eth0");
            assert_eq!(n.if_context, NamedOrAnon::Named("if_con".to_string()));
            assert_eq!(n.packet_context, NamedOrAnon::Named("pkt_con".to_string()));
        }
        other => panic!("expected netifcon, got {}", other.kind_name()),
    }
}

#[test]
fn test_device_labeling_statements() {
    let db = build_source(
        "(pirqcon 9 irq_con)\n\
         (iomemcon (1024 4095) mem_con)\n\
         (ioportcon 514 port_con)\n\
         (pcidevicecon 51200 dev_con)",
    )
    .unwrap();
    match &node_at(&db, &[0]).data {
        AstData::PirqCon(p) => assert_eq!(p.pirq, 9),
        other => panic!("expected pirqcon, got {}", other.kind_name()),
    }
    match &node_at(&db, &[1]).data {
        AstData::IoMemCon(m) => assert_eq!((m.low, m.high), (1024, 4095)),
        other => panic!("expected iomemcon, got {}", other.kind_name()),
    }
    match &node_at(&db, &[2]).data {
        AstData::IoPortCon(p) => assert_eq!((p.low, p.high), (514, 514)),
        other => panic!("expected ioportcon, got {}", other.kind_name()),
    }
    match &node_at(&db, &[3]).data {
        AstData::PciDeviceCon(d) => assert_eq!(d.device, 51200),
        other => panic!("expected pcidevicecon, got {}", other.kind_name()),
    }
}

#[rstest]
#[case("xattr", FsUseKind::Xattr)]
#[case("task", FsUseKind::Task)]
#[case("trans", FsUseKind::Trans)]
fn test_fsuse_kinds(#[case] keyword: &str, #[case] kind: FsUseKind) {
    let db = build_source(&format!("(fsuse {} ext4 fs_con)", keyword)).unwrap();
    match &node_at(&db, &[0]).data {
        AstData::FsUse(f) => {
            assert_eq!(f.kind, kind);
            assert_eq!(f.fs_str, "ext4");
        }
        other => panic!("expected fsuse, got {}", other.kind_name()),
    }
}

#[test]
fn test_fsuse_rejects_unknown_kind() {
    let err = build_source("(fsuse label ext4 fs_con)").unwrap_err();
    assert_eq!(
        err.kind,
        BuildErrorKind::InvalidLiteral {
            kind: "fsuse type",
            value: "label".to_string()
        }
    );
}

#[test]
fn test_ipaddr_declaration() {
    let db = build_source("(ipaddr lan 192.168.1.1)").unwrap();
    match &node_at(&db, &[0]).data {
        AstData::Ipaddr(decl) => {
            assert_eq!(decl.name, "lan");
            let expected: IpAddr = "192.168.1.1".parse().unwrap();
            assert_eq!(decl.ip, expected);
        }
        other => panic!("expected ipaddr, got {}", other.kind_name()),
    }
    assert!(db.symtab.contains(SymKind::IpAddrs, "lan"));

    let err = build_source("(ipaddr lan not_an_ip)").unwrap_err();
    assert_eq!(
        err.kind,
        BuildErrorKind::InvalidLiteral {
            kind: "IP address",
            value: "not_an_ip".to_string()
        }
    );
}
