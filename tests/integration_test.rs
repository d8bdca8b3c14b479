//! Integration tests for ipmap
//!
//! These tests verify the complete workflow from config to listing.

use ipmap::config::parse_config;
use ipmap::models::{bitmap_bytes, format_address, parse_address, DisplayOptions};
use ipmap::output::print_set;
use ipmap::{build_set, CreateRequest, IpMapError, SetHeader, SetTypeRegistry};

#[test]
fn test_full_workflow_with_config() {
    let config = parse_config(
        r#"{"sets": [
            {"name": "hosts", "create": "--from 10.0.0.1 --to 10.0.0.10", "members": ["10.0.0.9", "10.0.0.3"]},
            {"name": "blocks", "create": "--network 10.0.0.0/24 --netmask 26", "members": ["10.0.0.70"]}
        ]}"#,
    )
    .expect("Failed to parse config");
    let registry = SetTypeRegistry::with_builtin();

    let hosts = build_set(&registry, &config.sets[0]).expect("Failed to build hosts");
    let addrs: Vec<String> = hosts
        .members()
        .map(|(_, a)| format_address(a, DisplayOptions::plain()))
        .collect();
    assert_eq!(addrs, vec!["10.0.0.3", "10.0.0.9"]);

    let blocks = build_set(&registry, &config.sets[1]).expect("Failed to build blocks");
    assert_eq!(blocks.sizeid(), 4);
    let mut out = Vec::new();
    print_set("blocks", "ipmap", &blocks, DisplayOptions::plain(), &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Name: blocks\nType: ipmap\nHeader: from: 10.0.0.0 to: 10.0.0.255 netmask: 26\nMembers:\n10.0.0.64\n"
    );
}

#[test]
fn test_add_delete_readd_workflow() {
    let mut set = CreateRequest::parse_args("--from 10.0.0.1 --to 10.0.0.10")
        .unwrap()
        .finalize()
        .unwrap()
        .activate();
    let ip = |s: &str| parse_address(s).unwrap();

    for m in ["10.0.0.9", "10.0.0.3", "10.0.0.5", "10.0.0.7"] {
        assert!(set.add(ip(m)).unwrap());
    }
    assert!(set.del(ip("10.0.0.5")).unwrap());
    assert!(!set.del(ip("10.0.0.5")).unwrap());
    assert!(!set.test(ip("10.0.0.5")).unwrap());
    assert_eq!(set.len(), 3);

    assert!(set.add(ip("10.0.0.5")).unwrap());
    assert!(set.add(ip("10.0.0.1")).unwrap());
    for m in ["10.0.0.1", "10.0.0.3", "10.0.0.5", "10.0.0.7", "10.0.0.9"] {
        assert!(set.test(ip(m)).unwrap(), "{m} missing");
    }
    assert!(!set.test(ip("10.0.0.2")).unwrap());

    let members: Vec<(u32, u32)> = set.members().collect();
    assert_eq!(
        members,
        vec![
            (0, ip("10.0.0.1")),
            (2, ip("10.0.0.3")),
            (4, ip("10.0.0.5")),
            (6, ip("10.0.0.7")),
            (8, ip("10.0.0.9")),
        ]
    );

    let mut out = Vec::new();
    print_set("lan", "ipmap", &set, DisplayOptions::plain(), &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Name: lan\nType: ipmap\nHeader: from: 10.0.0.1 to: 10.0.0.10\nMembers:\n\
         10.0.0.1\n10.0.0.3\n10.0.0.5\n10.0.0.7\n10.0.0.9\n"
    );
    assert_eq!(set.destroy(), vec![0b0101_0101, 0b0000_0001]);
}

#[test]
fn test_sub_block_listing_with_prefix() {
    let config = parse_config(
        r#"{"sets": [{"name": "blocks", "create": "--network 10.0.0.0/24 --netmask 26",
            "members": ["10.0.0.200", "10.0.0.70"], "show_blocks": true}]}"#,
    )
    .expect("Failed to parse config");
    let registry = SetTypeRegistry::with_builtin();
    let set = build_set(&registry, &config.sets[0]).expect("Failed to build blocks");
    let options = DisplayOptions::for_netmask(set.header().netmask(), config.sets[0].show_blocks);

    let mut out = Vec::new();
    print_set("blocks", "ipmap", &set, options, &mut out).unwrap();
    assert!(String::from_utf8(out)
        .unwrap()
        .ends_with("Members:\n10.0.0.64/26\n10.0.0.192/26\n"));
}

#[test]
fn test_scenario_single_addresses() {
    let header = CreateRequest::parse_args("--from 10.0.0.1 --to 10.0.0.10")
        .unwrap()
        .finalize()
        .unwrap();
    assert_eq!(header.plan().sizeid(), 10);
    assert_eq!(header.plan().hosts(), 1);

    let mut set = header.activate();
    let addr = parse_address("10.0.0.3").unwrap();
    set.add(addr).unwrap();
    assert!(set.test(addr).unwrap());
    assert_eq!(set.members().map(|(_, a)| a).collect::<Vec<_>>(), vec![addr]);
}

#[test]
fn test_scenario_sub_blocks() {
    let set = CreateRequest::parse_args("--network 10.0.0.0/24 --netmask 26")
        .unwrap()
        .finalize()
        .unwrap()
        .activate();
    assert_eq!(set.header().plan().hosts(), 64);
    assert_eq!(set.sizeid(), 4);
    let id = set
        .header()
        .mapper()
        .address_to_id(parse_address("10.0.0.70").unwrap())
        .unwrap();
    assert_eq!(id, 1);
}

#[test]
fn test_scenario_rejections() {
    let finalize = |args: &str| CreateRequest::parse_args(args).unwrap().finalize();

    assert!(matches!(
        finalize("--from 10.0.0.5 --to 10.0.0.2"),
        Err(IpMapError::FromGreaterThanTo { .. })
    ));
    assert!(matches!(
        finalize("--from 10.0.0.0 --to 10.1.17.111"),
        Err(IpMapError::RangeTooLarge { .. })
    ));
    assert!(matches!(
        finalize("--network 10.0.0.0/26 --netmask 24"),
        Err(IpMapError::MaskDoesNotSubdivide { .. })
    ));
}

#[test]
fn test_transport_round_trip() {
    let mut set = CreateRequest::parse_args("--network 10.0.0.0/24 --netmask 28")
        .unwrap()
        .finalize()
        .unwrap()
        .activate();
    set.add(parse_address("10.0.0.17").unwrap()).unwrap();
    set.add(parse_address("10.0.0.250").unwrap()).unwrap();

    let header_bytes = set.header().to_bytes();
    let members = set.members_bytes().to_vec();
    assert_eq!(members.len(), bitmap_bytes(16));

    let received = SetHeader::from_bytes(&header_bytes)
        .unwrap()
        .with_members(members)
        .unwrap();
    assert_eq!(received, set);

    let short = SetHeader::from_bytes(&header_bytes)
        .unwrap()
        .with_members(vec![0; 1]);
    assert!(matches!(short, Err(IpMapError::SizeMismatch { .. })));
}
