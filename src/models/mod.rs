//! Domain models for ipmap sets.
//!
//! This module contains the value types a set is built from:
//! - [`Netmask`] and [`Ipv4`] - IPv4 masks and CIDR notation
//! - [`AddressRange`] - The validated address universe
//! - [`PartitionPlan`] - Slot count and addresses per slot
//! - [`IdentityMapper`] - Address to slot id mapping
//! - [`MembershipBitmap`] - One bit per slot

mod bitmap;
mod ipv4;
mod mapper;
mod plan;
mod range;

// Re-export public types
pub use bitmap::{bitmap_bytes, MembershipBitmap, Ones};
pub use ipv4::{
    format_address, get_cidr_mask, mask_to_bits, parse_address, range_to_mask, DisplayOptions,
    Ipv4, Netmask, MAX_LENGTH,
};
pub use mapper::IdentityMapper;
pub use plan::PartitionPlan;
pub use range::{AddressRange, MAX_RANGE};
