//! Set lifecycle.
//!
//! - [`SetHeader`] - Validated range and partition, no members yet
//! - [`IpMap`] - Active set owning its membership bitmap

mod header;
mod ipmap;

pub use header::{SetHeader, HEADER_SIZE};
pub use ipmap::IpMap;
