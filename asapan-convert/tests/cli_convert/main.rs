use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};
use xml_tree_core::parse;

const ASA_CONFIG: &str = "\
hostname edge-fw
object network WEBSRV
 host 10.0.0.5
object network LAN
 192.168.10.0 255.255.255.0
object-group network DNS_SERVERS
 network-object host 8.8.8.8
 network-object host 1.1.1.1
access-list test extended permit tcp object WEBSRV any eq 443
access-list test remark resolvers
access-list inside to outside extended permit udp object LAN object-group DNS_SERVERS eq 53
access-list acl1 extended deny ip 192.168.1.0 255.255.255.0 any
";

fn path_as_str(path: &Path) -> &str {
    path.to_str().expect("path should be valid utf-8")
}

fn write_input(dir: &TempDir, body: &str) -> PathBuf {
    let input = dir.path().join("asa.cfg");
    fs::write(&input, body).expect("input write");
    input
}

fn converter() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("asapan-convert"))
}

mod basics;
mod options;
mod xml;
