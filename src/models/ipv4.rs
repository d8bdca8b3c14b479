//! IPv4 address and CIDR mask utilities.
//!
//! Provides [`Netmask`] for prefix masks, [`Ipv4`] for `network/len` notation,
//! and the helpers that convert between masks, prefix lengths and ranges.

use crate::error::IpMapError;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// `0` and `32` are handled explicitly so no shift ever reaches the type width.
///
/// # Examples
/// ```
/// use ipmap::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, IpMapError> {
    match len {
        0 => Ok(0),
        MAX_LENGTH => Ok(u32::MAX),
        l if l < MAX_LENGTH => Ok(u32::MAX << (MAX_LENGTH - l)),
        l => Err(IpMapError::InvalidNetmask(l.to_string())),
    }
}

/// Prefix length of a contiguous mask, `None` if the 1-bits are not a prefix.
pub fn mask_to_bits(mask: u32) -> Option<u8> {
    let bits = mask.leading_ones() as u8;
    match get_cidr_mask(bits) {
        Ok(m) if m == mask => Some(bits),
        _ => None,
    }
}

/// Widest mask under which `[from, to]` is exactly one network block.
///
/// Returns the mask and its prefix length, or `None` when the range is not a
/// single aligned power-of-two block.
pub fn range_to_mask(from: u32, to: u32) -> Option<(u32, u8)> {
    if from > to {
        return None;
    }
    let size = u64::from(to - from) + 1;
    if !size.is_power_of_two() {
        return None;
    }
    let bits = MAX_LENGTH - size.trailing_zeros() as u8;
    let mask = get_cidr_mask(bits).ok()?;
    if from & mask != from {
        return None;
    }
    Some((mask, bits))
}

/// Parse dotted-quad text into its numeric value.
pub fn parse_address(text: &str) -> Result<u32, IpMapError> {
    let text = text.trim();
    Ipv4Addr::from_str(text)
        .map(u32::from)
        .map_err(|_| IpMapError::InvalidAddress(text.to_string()))
}

/// How addresses are rendered in listings.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Default)]
pub struct DisplayOptions {
    /// Append `/bits` to each address, e.g. for sub-block members.
    pub prefix: Option<u8>,
}

impl DisplayOptions {
    /// Bare dotted-quad addresses.
    pub fn plain() -> DisplayOptions {
        DisplayOptions::default()
    }

    /// Addresses suffixed with a `/bits` prefix length.
    pub fn with_prefix(bits: u8) -> DisplayOptions {
        DisplayOptions { prefix: Some(bits) }
    }

    /// Options for members of a set split by `netmask`. Blocks are only
    /// shown when asked for and the set is actually sub-blocked.
    pub fn for_netmask(netmask: Netmask, show_blocks: bool) -> DisplayOptions {
        if show_blocks && !netmask.is_all_ones() {
            DisplayOptions::with_prefix(netmask.bits())
        } else {
            DisplayOptions::plain()
        }
    }
}

/// Format a numeric address as dotted-quad text.
pub fn format_address(addr: u32, options: DisplayOptions) -> String {
    match options.prefix {
        Some(bits) => format!("{}/{bits}", Ipv4Addr::from(addr)),
        None => Ipv4Addr::from(addr).to_string(),
    }
}

/// A CIDR prefix mask. The all-ones value means "no sub-blocking".
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub struct Netmask(u32);

impl Netmask {
    pub const ALL_ONES: Netmask = Netmask(u32::MAX);

    /// Build a mask from a prefix length in `0..=32`.
    pub fn from_bits(bits: u8) -> Result<Netmask, IpMapError> {
        Ok(Netmask(get_cidr_mask(bits)?))
    }

    /// Build a mask from its raw value, rejecting non-contiguous masks.
    pub fn from_value(mask: u32) -> Result<Netmask, IpMapError> {
        match mask_to_bits(mask) {
            Some(_) => Ok(Netmask(mask)),
            None => Err(IpMapError::InvalidNetmask(format!("{mask:#010x}"))),
        }
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn bits(&self) -> u8 {
        self.0.leading_ones() as u8
    }

    pub fn is_all_ones(&self) -> bool {
        self.0 == u32::MAX
    }

    /// True if `addr` has no bits set outside the mask.
    pub fn is_network_address(&self, addr: u32) -> bool {
        addr & self.0 == addr
    }
}

impl Default for Netmask {
    fn default() -> Self {
        Netmask::ALL_ONES
    }
}

/// IPv4 address with CIDR notation support.
#[derive(Eq, Ord, PartialOrd, PartialEq, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    pub fn new(addr_cidr: &str) -> Result<Ipv4, IpMapError> {
        let addr_cidr = addr_cidr.trim();
        let (addr, mask) = addr_cidr
            .split_once('/')
            .ok_or_else(|| IpMapError::InvalidAddress(addr_cidr.to_string()))?;
        let addr = Ipv4Addr::from(parse_address(addr)?);
        let mask: u8 = mask
            .parse()
            .map_err(|_| IpMapError::InvalidNetmask(mask.to_string()))?;
        if mask > MAX_LENGTH {
            return Err(IpMapError::InvalidNetmask(mask.to_string()));
        }
        Ok(Ipv4 { addr, mask })
    }

    pub fn netmask(&self) -> Netmask {
        // mask <= MAX_LENGTH is checked in new()
        Netmask(get_cidr_mask(self.mask).unwrap_or(u32::MAX))
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> u32 {
        u32::from(self.addr) & self.netmask().value()
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> u32 {
        self.lo() | !self.netmask().value()
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}
