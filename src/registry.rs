//! Set-type registry.
//!
//! Types are registered by ordinary code, usually through
//! [`SetTypeRegistry::with_builtin`], and looked up by name.

use crate::error::IpMapError;
use crate::request::{CreateRequest, USAGE};
use crate::set::IpMap;
use std::collections::HashMap;

/// Protocol version spoken with the back end.
pub const PROTOCOL_VERSION: u32 = 2;

/// Registered description of one set type.
#[derive(Clone, Copy, Debug)]
pub struct SetType {
    pub name: &'static str,
    /// Must equal [`PROTOCOL_VERSION`] to be registered.
    pub protocol_version: u32,
    pub usage: &'static str,
    /// Build an active set from a creation option string.
    pub create: fn(&str) -> Result<IpMap, IpMapError>,
}

fn create_ipmap(args: &str) -> Result<IpMap, IpMapError> {
    let header = CreateRequest::parse_args(args)?.finalize()?;
    Ok(header.activate())
}

/// The `ipmap` set type.
pub fn ipmap_type() -> SetType {
    SetType {
        name: "ipmap",
        protocol_version: PROTOCOL_VERSION,
        usage: USAGE,
        create: create_ipmap,
    }
}

#[derive(Default)]
pub struct SetTypeRegistry {
    types: HashMap<&'static str, SetType>,
}

impl SetTypeRegistry {
    pub fn new() -> SetTypeRegistry {
        SetTypeRegistry::default()
    }

    /// Registry holding every set type this crate provides.
    pub fn with_builtin() -> SetTypeRegistry {
        let mut registry = SetTypeRegistry::new();
        for set_type in [ipmap_type()] {
            registry.types.insert(set_type.name, set_type);
        }
        registry
    }

    pub fn register(&mut self, set_type: SetType) -> Result<(), IpMapError> {
        if self.types.contains_key(set_type.name) {
            return Err(IpMapError::DuplicateSetType(set_type.name.to_string()));
        }
        if set_type.protocol_version != PROTOCOL_VERSION {
            return Err(IpMapError::ProtocolMismatch {
                name: set_type.name.to_string(),
                got: set_type.protocol_version,
                wanted: PROTOCOL_VERSION,
            });
        }
        log::debug!("registered set type {}", set_type.name);
        self.types.insert(set_type.name, set_type);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&SetType, IpMapError> {
        self.types
            .get(name)
            .ok_or_else(|| IpMapError::UnknownSetType(name.to_string()))
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.types.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
