//! Address to slot id mapping.

use super::plan::PartitionPlan;
use super::range::AddressRange;
use crate::error::IpMapError;
use std::net::Ipv4Addr;

/// Maps addresses to slot ids and back for one range and plan.
///
/// Holds only copies of `first`, `hosts` and `sizeid`; it owns no set state.
#[derive(Eq, PartialEq, Debug, Copy, Clone)]
pub struct IdentityMapper {
    first: u32,
    hosts: u32,
    sizeid: u32,
}

impl IdentityMapper {
    pub fn new(range: &AddressRange, plan: &PartitionPlan) -> IdentityMapper {
        IdentityMapper {
            first: range.first(),
            hosts: plan.hosts(),
            sizeid: plan.sizeid(),
        }
    }

    /// Last address covered by a slot (inclusive).
    pub fn last_covered(&self) -> u32 {
        // hosts * sizeid never exceeds the range size plus one block
        let span = u64::from(self.hosts) * u64::from(self.sizeid);
        (u64::from(self.first) + span - 1).min(u64::from(u32::MAX)) as u32
    }

    /// Slot id holding `addr`.
    pub fn address_to_id(&self, addr: u32) -> Result<u32, IpMapError> {
        if addr < self.first || addr > self.last_covered() {
            return Err(IpMapError::OutOfRange(Ipv4Addr::from(addr)));
        }
        Ok((addr - self.first) / self.hosts)
    }

    /// First address of slot `id`, or `None` if `id >= sizeid`.
    pub fn id_to_address(&self, id: u32) -> Option<u32> {
        if id >= self.sizeid {
            return None;
        }
        Some(self.first + id * self.hosts)
    }
}
