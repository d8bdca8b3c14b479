//! Creation request ingestion.
//!
//! Collects `--from`/`--to`, `--network` and `--netmask` options into a
//! [`CreateRequest`] and validates them into a [`SetHeader`].

use crate::error::IpMapError;
use crate::models::{parse_address, AddressRange, Ipv4, Netmask, MAX_LENGTH};
use crate::set::SetHeader;
use colored::Colorize;
use regex::Regex;
use std::sync::OnceLock;

/// Usage text for the ipmap set type.
pub const USAGE: &str = "-N set ipmap --from IP --to IP [--netmask CIDR-netmask]\n\
                         -N set ipmap --network IP/mask [--netmask CIDR-netmask]\n\
                         -A set IP\n\
                         -D set IP\n\
                         -T set IP\n";

/// Regex for splitting option strings while preserving quoted substrings.
static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_token_regex() -> &'static Regex {
    TOKEN_REGEX.get_or_init(|| {
        Regex::new(r#"'([^']*)'|"([^"]*)"|(\S+)"#).expect("Invalid Regex")
    })
}

/// Split an option string on whitespace, keeping quoted values together.
fn split_and_strip(input: &str) -> Vec<&str> {
    get_token_regex()
        .captures_iter(input)
        .filter_map(|c| c.get(1).or_else(|| c.get(2)).or_else(|| c.get(3)))
        .map(|m| m.as_str())
        .collect()
}

/// Options gathered for a new set, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    from: u32,
    to: u32,
    netmask: Netmask,
    has_from: bool,
    has_to: bool,
    has_network: bool,
    has_netmask: bool,
}

impl Default for CreateRequest {
    fn default() -> Self {
        CreateRequest {
            from: 0,
            to: 0,
            netmask: Netmask::ALL_ONES,
            has_from: false,
            has_to: false,
            has_network: false,
            has_netmask: false,
        }
    }
}

impl CreateRequest {
    pub fn new() -> CreateRequest {
        CreateRequest::default()
    }

    /// Parse a full option string such as `--network 10.0.0.0/24 --netmask 26`.
    pub fn parse_args(args: &str) -> Result<CreateRequest, IpMapError> {
        let mut request = CreateRequest::new();
        let mut tokens = split_and_strip(args).into_iter();
        log::trace!("create args={:?}", args);

        while let Some(token) = tokens.next() {
            let name = token
                .strip_prefix("--")
                .ok_or_else(|| IpMapError::UnknownOption(token.to_string()))?;
            let value = tokens
                .next()
                .ok_or_else(|| IpMapError::MissingValue(name.to_string()))?;
            request.parse_option(name, value)?;
        }
        Ok(request)
    }

    /// Record one option. Unknown names are rejected.
    pub fn parse_option(&mut self, name: &str, value: &str) -> Result<(), IpMapError> {
        match name {
            "from" => {
                self.from = parse_address(value)?;
                self.has_from = true;
                log::debug!("--from {:x} ({value})", self.from);
            }
            "to" => {
                self.to = parse_address(value)?;
                self.has_to = true;
                log::debug!("--to {:x} ({value})", self.to);
            }
            "network" => {
                let network = Ipv4::new(value)?;
                self.from = network.lo();
                self.to = network.hi();
                self.has_network = true;
                log::debug!("--network {network} from {:x} to {:x}", self.from, self.to);
            }
            "netmask" => {
                let bits: u8 = value
                    .trim()
                    .parse()
                    .ok()
                    .filter(|b| *b <= MAX_LENGTH)
                    .ok_or_else(|| IpMapError::InvalidNetmask(value.to_string()))?;
                // a zero prefix leaves the default in place
                if bits != 0 {
                    self.netmask = Netmask::from_bits(bits)?;
                }
                self.has_netmask = true;
                log::debug!("--netmask {:x}", self.netmask.value());
            }
            other => {
                log::warn!("unknown option {}", other.on_red());
                return Err(IpMapError::UnknownOption(other.to_string()));
            }
        }
        Ok(())
    }

    /// Validate the gathered options and derive the set header.
    pub fn finalize(&self) -> Result<SetHeader, IpMapError> {
        if !(self.has_from || self.has_to || self.has_network || self.has_netmask) {
            return Err(IpMapError::NoRange);
        }
        if self.has_network {
            if self.has_from || self.has_to {
                return Err(IpMapError::ConflictingOptions);
            }
        } else if !(self.has_from && self.has_to) {
            return Err(IpMapError::MissingBounds);
        }

        let range = AddressRange::new(self.from, self.to)?;
        SetHeader::new(range, self.netmask)
    }
}
