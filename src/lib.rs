//! Compact IPv4 address-membership sets.
//!
//! An ipmap set covers a contiguous range of at most [`models::MAX_RANGE`]
//! addresses and keeps one bit per address, or one bit per `/n` sub-block when
//! created with a netmask. Sets are created from option strings such as
//! `--network 10.0.0.0/24 --netmask 26` and listed in ascending order.

pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod registry;
pub mod request;
pub mod set;

use colored::Colorize;
use std::error::Error;

pub use config::{read_config, Config, SetConfig};
pub use error::IpMapError;
pub use registry::{SetType, SetTypeRegistry};
pub use request::CreateRequest;
pub use set::{IpMap, SetHeader};

/// Log a rejected request at a level matching its cause.
fn log_rejection(name: &str, e: &IpMapError) {
    if e.is_config() {
        log::warn!("set {}: {e}", name.on_yellow());
    } else {
        log::error!("set {}: {e}", name.on_red());
    }
}

/// Create the set described by `set_config` and add its members.
pub fn build_set(
    registry: &SetTypeRegistry,
    set_config: &SetConfig,
) -> Result<IpMap, Box<dyn Error>> {
    log::info!(
        "#Start build_set() {} type={}",
        set_config.name.on_blue(),
        set_config.set_type
    );
    let set_type = registry.get(&set_config.set_type)?;
    let mut set = (set_type.create)(&set_config.create).map_err(|e| {
        log_rejection(&set_config.name, &e);
        format!("Error creating set {}: {e}", set_config.name)
    })?;

    for member in &set_config.members {
        let added = set
            .parse_adt(member)
            .and_then(|addr| set.add(addr))
            .inspect_err(|e| log_rejection(&set_config.name, e))?;
        if !added {
            log::warn!("{member} already in set {}", set_config.name);
        }
    }
    log::info!(
        "# set {} has {} of {} slots",
        set_config.name,
        set.len(),
        set.sizeid()
    );
    Ok(set)
}
