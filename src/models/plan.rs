//! Partitioning of a range into slots.
//!
//! A set either keeps one bit per address, or, with a sub-block netmask, one
//! bit per `/n` block of the range. [`PartitionPlan`] holds the resulting
//! slot count (`sizeid`) and the number of addresses behind each slot (`hosts`).

use super::ipv4::{range_to_mask, Netmask, MAX_LENGTH};
use super::range::AddressRange;
use crate::error::IpMapError;
use std::net::Ipv4Addr;

/// Addresses per slot and total slot count for one set.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub struct PartitionPlan {
    hosts: u32,
    sizeid: u32,
}

/// `2^exp`, or `None` if it does not fit a u32.
fn pow2(exp: u8) -> Option<u32> {
    1u32.checked_shl(u32::from(exp))
}

impl PartitionPlan {
    /// Derive the plan for `range` split by `netmask`.
    ///
    /// An all-ones netmask keeps one address per slot. Any other mask must
    /// align with the range start, the range must be a single full network,
    /// and the mask must be strictly longer than that network's prefix.
    pub fn derive(range: &AddressRange, netmask: Netmask) -> Result<PartitionPlan, IpMapError> {
        if netmask.is_all_ones() {
            let plan = PartitionPlan {
                hosts: 1,
                sizeid: range.size(),
            };
            log::trace!("plan {range}: hosts={} sizeid={}", plan.hosts, plan.sizeid);
            return Ok(plan);
        }

        let from = range.first();
        let to = range.last();
        let sub_bits = netmask.bits();

        if !netmask.is_network_address(from) {
            return Err(IpMapError::NotNetworkAddress {
                addr: Ipv4Addr::from(from),
                bits: sub_bits,
            });
        }

        let (_, range_bits) = range_to_mask(from, to).ok_or(IpMapError::NotFullNetwork {
            from: Ipv4Addr::from(from),
            to: Ipv4Addr::from(to),
        })?;

        log::debug!("bits: {range_bits} {sub_bits}");
        let does_not_subdivide = IpMapError::MaskDoesNotSubdivide {
            bits: sub_bits,
            from: Ipv4Addr::from(from),
            to: Ipv4Addr::from(to),
        };
        if sub_bits <= range_bits {
            return Err(does_not_subdivide);
        }

        // sub_bits is in (range_bits, 32), so both exponents are below 32
        let hosts = pow2(MAX_LENGTH - sub_bits).ok_or_else(|| does_not_subdivide.clone())?;
        let sizeid = pow2(sub_bits - range_bits).ok_or(does_not_subdivide)?;

        log::trace!("plan {range}/{sub_bits}: hosts={hosts} sizeid={sizeid}");
        Ok(PartitionPlan { hosts, sizeid })
    }

    /// Raw addresses represented by one slot.
    pub fn hosts(&self) -> u32 {
        self.hosts
    }

    /// Total number of slots.
    pub fn sizeid(&self) -> u32 {
        self.sizeid
    }
}
