//! Error types for ipmap sets.
//!
//! Every failure is fatal for the operation that raised it: nothing is retried
//! and no partial state is kept. Programming-contract violations (a raw slot id
//! past the end of the bitmap) are not represented here, they panic.

use std::net::Ipv4Addr;

/// Errors raised while creating, loading or querying an ipmap set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IpMapError {
    #[error("Need to specify --from and --to, or --network")]
    NoRange,

    #[error("Can't specify --from or --to with --network")]
    ConflictingOptions,

    #[error("Need to specify both --from and --to")]
    MissingBounds,

    #[error("From {from} can't be greater than to {to}")]
    FromGreaterThanTo { from: Ipv4Addr, to: Ipv4Addr },

    #[error("Range too large. Max is {max} IPs in range")]
    RangeTooLarge { max: u32 },

    #[error("Invalid netmask `{0}' specified")]
    InvalidNetmask(String),

    #[error("{addr} is not a network address according to netmask {bits}")]
    NotNetworkAddress { addr: Ipv4Addr, bits: u8 },

    #[error("{from}-{to} is not a full network")]
    NotFullNetwork { from: Ipv4Addr, to: Ipv4Addr },

    #[error("{bits} netmask specifies larger or equal netblock than {from}-{to}")]
    MaskDoesNotSubdivide {
        bits: u8,
        from: Ipv4Addr,
        to: Ipv4Addr,
    },

    #[error("Invalid address `{0}'")]
    InvalidAddress(String),

    #[error("IP '{0}' is out of range")]
    OutOfRange(Ipv4Addr),

    #[error("Ipmap: incorrect size of {what}. Got {got}, wanted {wanted}.")]
    SizeMismatch {
        what: &'static str,
        got: usize,
        wanted: usize,
    },

    #[error("Unknown option `{0}'")]
    UnknownOption(String),

    #[error("Option `{0}' requires a value")]
    MissingValue(String),

    #[error("Unknown set type `{0}'")]
    UnknownSetType(String),

    #[error("Set type `{0}' is already registered")]
    DuplicateSetType(String),

    #[error("Set type `{name}' speaks protocol {got}, wanted {wanted}")]
    ProtocolMismatch { name: String, got: u32, wanted: u32 },
}

impl IpMapError {
    /// True for errors caused by a bad creation request.
    pub fn is_config(&self) -> bool {
        !matches!(
            self,
            IpMapError::OutOfRange(_)
                | IpMapError::SizeMismatch { .. }
                | IpMapError::UnknownSetType(_)
                | IpMapError::DuplicateSetType(_)
                | IpMapError::ProtocolMismatch { .. }
        )
    }
}
