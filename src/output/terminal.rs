//! Terminal output for sets.
//!
//! Members are printed in ascending address order, the only order an ipmap has.

use crate::models::{format_address, DisplayOptions};
use crate::set::IpMap;
use std::io::{self, Write};

/// Print the header line: ` from: A to: B[ netmask: N]`.
pub fn print_header<W: Write>(set: &IpMap, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", set.header())
}

/// Print every member address, one per line, ascending.
///
/// In sub-block mode each line is the first address of a present block.
pub fn print_members<W: Write>(
    set: &IpMap,
    options: DisplayOptions,
    out: &mut W,
) -> io::Result<()> {
    for id in set.ids() {
        if let Some(addr) = set.ip_by_id(id) {
            writeln!(out, "{}", format_address(addr, options))?;
        }
    }
    Ok(())
}

/// Print a full listing of a named set.
pub fn print_set<W: Write>(
    name: &str,
    type_name: &str,
    set: &IpMap,
    options: DisplayOptions,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "Name: {name}")?;
    writeln!(out, "Type: {type_name}")?;
    write!(out, "Header:")?;
    print_header(set, out)?;
    writeln!(out, "Members:")?;
    print_members(set, options, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_address;
    use crate::request::CreateRequest;

    fn listing(args: &str, members: &[&str], show_blocks: bool) -> String {
        let mut set = CreateRequest::parse_args(args)
            .unwrap()
            .finalize()
            .unwrap()
            .activate();
        for m in members {
            set.add(parse_address(m).unwrap()).unwrap();
        }
        let options = DisplayOptions::for_netmask(set.header().netmask(), show_blocks);
        let mut out = Vec::new();
        print_set("test", "ipmap", &set, options, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_print_set() {
        let text = listing(
            "--from 10.0.0.1 --to 10.0.0.10",
            &["10.0.0.9", "10.0.0.3"],
            false,
        );
        assert_eq!(
            text,
            "Name: test\nType: ipmap\nHeader: from: 10.0.0.1 to: 10.0.0.10\nMembers:\n10.0.0.3\n10.0.0.9\n"
        );
    }

    #[test]
    fn test_print_sub_blocks() {
        let text = listing("--network 10.0.0.0/24 --netmask 26", &["10.0.0.70"], false);
        assert!(text.contains("Header: from: 10.0.0.0 to: 10.0.0.255 netmask: 26\n"));
        assert!(text.ends_with("Members:\n10.0.0.64\n"));
    }

    #[test]
    fn test_print_sub_blocks_with_prefix() {
        let text = listing(
            "--network 10.0.0.0/24 --netmask 26",
            &["10.0.0.200", "10.0.0.70"],
            true,
        );
        assert!(text.ends_with("Members:\n10.0.0.64/26\n10.0.0.192/26\n"));
    }

    #[test]
    fn test_print_empty() {
        let text = listing("--from 10.0.0.1 --to 10.0.0.10", &[], true);
        assert!(text.ends_with("Members:\n"));
    }
}
