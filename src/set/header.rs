//! Configured set header: range, netmask and derived plan.

use super::ipmap::IpMap;
use crate::error::IpMapError;
use crate::models::{
    bitmap_bytes, format_address, AddressRange, DisplayOptions, IdentityMapper, MembershipBitmap,
    Netmask, PartitionPlan,
};

/// Size of the header wire form: `from`, `to`, `netmask` as big-endian u32.
pub const HEADER_SIZE: usize = 12;

/// A set whose range and partition are fixed but whose members are not yet
/// allocated. Only a fully validated header can exist.
#[derive(Eq, PartialEq, Debug, Copy, Clone)]
pub struct SetHeader {
    range: AddressRange,
    netmask: Netmask,
    plan: PartitionPlan,
}

impl SetHeader {
    pub fn new(range: AddressRange, netmask: Netmask) -> Result<SetHeader, IpMapError> {
        let plan = PartitionPlan::derive(&range, netmask)?;
        log::debug!(
            "configured {range} netmask={} hosts={} sizeid={}",
            netmask.bits(),
            plan.hosts(),
            plan.sizeid()
        );
        Ok(SetHeader {
            range,
            netmask,
            plan,
        })
    }

    /// Decode a header received from the back end.
    pub fn from_bytes(data: &[u8]) -> Result<SetHeader, IpMapError> {
        let data: &[u8; HEADER_SIZE] = data.try_into().map_err(|_| IpMapError::SizeMismatch {
            what: "header",
            got: data.len(),
            wanted: HEADER_SIZE,
        })?;
        let word = |i: usize| u32::from_be_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]);
        let range = AddressRange::new(word(0), word(4))?;
        let netmask = Netmask::from_value(word(8))?;
        SetHeader::new(range, netmask)
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0; HEADER_SIZE];
        out[0..4].copy_from_slice(&self.range.first().to_be_bytes());
        out[4..8].copy_from_slice(&self.range.last().to_be_bytes());
        out[8..12].copy_from_slice(&self.netmask.value().to_be_bytes());
        out
    }

    pub fn range(&self) -> &AddressRange {
        &self.range
    }

    pub fn netmask(&self) -> Netmask {
        self.netmask
    }

    pub fn plan(&self) -> &PartitionPlan {
        &self.plan
    }

    pub fn mapper(&self) -> IdentityMapper {
        IdentityMapper::new(&self.range, &self.plan)
    }

    /// Length of the member data this header expects.
    pub fn members_size(&self) -> usize {
        bitmap_bytes(self.plan.sizeid())
    }

    /// Allocate an empty member bitmap.
    pub fn activate(self) -> IpMap {
        let members = MembershipBitmap::allocate(self.plan.sizeid());
        IpMap::new(self, members)
    }

    /// Attach member data received from the back end.
    pub fn with_members(self, data: Vec<u8>) -> Result<IpMap, IpMapError> {
        log::debug!("ipmap: initmembers() got {} bytes", data.len());
        let members = MembershipBitmap::from_bytes(self.plan.sizeid(), data)?;
        Ok(IpMap::new(self, members))
    }
}

impl std::fmt::Display for SetHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            " from: {} to: {}",
            format_address(self.range.first(), DisplayOptions::plain()),
            format_address(self.range.last(), DisplayOptions::plain())
        )?;
        if !self.netmask.is_all_ones() {
            write!(f, " netmask: {}", self.netmask.bits())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_address;

    fn header(from: &str, to: &str, bits: u8) -> SetHeader {
        let range =
            AddressRange::new(parse_address(from).unwrap(), parse_address(to).unwrap()).unwrap();
        SetHeader::new(range, Netmask::from_bits(bits).unwrap()).unwrap()
    }

    #[test]
    fn test_header_bytes() {
        let h = header("10.0.0.0", "10.0.0.255", 26);
        let bytes = h.to_bytes();
        assert_eq!(
            bytes,
            [10, 0, 0, 0, 10, 0, 0, 255, 0xFF, 0xFF, 0xFF, 0xC0]
        );
        assert_eq!(SetHeader::from_bytes(&bytes).unwrap(), h);
    }

    #[test]
    fn test_header_wrong_size() {
        let e = SetHeader::from_bytes(&[0; 8]).unwrap_err();
        assert_eq!(
            e.to_string(),
            "Ipmap: incorrect size of header. Got 8, wanted 12."
        );
    }

    #[test]
    fn test_header_bytes_revalidated() {
        // from > to
        let bytes = [10, 0, 0, 5, 10, 0, 0, 2, 0xFF, 0xFF, 0xFF, 0xFF];
        assert!(matches!(
            SetHeader::from_bytes(&bytes),
            Err(IpMapError::FromGreaterThanTo { .. })
        ));
        // non-contiguous netmask
        let bytes = [10, 0, 0, 0, 10, 0, 0, 255, 0xFF, 0x00, 0xFF, 0x00];
        assert!(matches!(
            SetHeader::from_bytes(&bytes),
            Err(IpMapError::InvalidNetmask(_))
        ));
    }

    #[test]
    fn test_members_size() {
        assert_eq!(header("10.0.0.1", "10.0.0.10", 32).members_size(), 2);
        assert_eq!(header("10.0.0.0", "10.0.0.255", 26).members_size(), 1);
        assert_eq!(header("10.0.0.0", "10.0.255.255", 32).members_size(), 8192);
    }

    #[test]
    fn test_with_members_size_check() {
        let h = header("10.0.0.1", "10.0.0.10", 32);
        let e = h.with_members(vec![0; 1]).unwrap_err();
        assert_eq!(
            e.to_string(),
            "Ipmap: incorrect size of members. Got 1, wanted 2."
        );
        assert!(h.with_members(vec![0; 2]).is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            header("10.0.0.1", "10.0.0.10", 32).to_string(),
            " from: 10.0.0.1 to: 10.0.0.10"
        );
        assert_eq!(
            header("10.0.0.0", "10.0.0.255", 26).to_string(),
            " from: 10.0.0.0 to: 10.0.0.255 netmask: 26"
        );
    }
}
