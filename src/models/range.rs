//! Inclusive address range of a set.

use super::ipv4::{format_address, DisplayOptions};
use crate::error::IpMapError;
use std::net::Ipv4Addr;

/// Ceiling on `last - first`, bounding the size of a membership bitmap.
pub const MAX_RANGE: u32 = 1 << 16;

/// Inclusive `[first, last]` bound of the address universe.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub struct AddressRange {
    first: u32,
    last: u32,
}

impl AddressRange {
    /// Validate explicit bounds.
    ///
    /// Swapped bounds are rejected rather than corrected, and ranges wider
    /// than [`MAX_RANGE`] are refused.
    pub fn new(first: u32, last: u32) -> Result<AddressRange, IpMapError> {
        log::trace!(
            "from : {:x} to: {:x}  diff: {}",
            first,
            last,
            last.wrapping_sub(first)
        );
        if first > last {
            return Err(IpMapError::FromGreaterThanTo {
                from: Ipv4Addr::from(first),
                to: Ipv4Addr::from(last),
            });
        }
        if last - first > MAX_RANGE {
            return Err(IpMapError::RangeTooLarge { max: MAX_RANGE });
        }
        Ok(AddressRange { first, last })
    }

    pub fn first(&self) -> u32 {
        self.first
    }

    pub fn last(&self) -> u32 {
        self.last
    }

    /// Number of addresses in the range.
    pub fn size(&self) -> u32 {
        // MAX_RANGE keeps this far from overflow
        self.last - self.first + 1
    }

    pub fn contains(&self, addr: u32) -> bool {
        self.first <= addr && addr <= self.last
    }
}

impl std::fmt::Display for AddressRange {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}-{}",
            format_address(self.first, DisplayOptions::plain()),
            format_address(self.last, DisplayOptions::plain())
        )
    }
}
