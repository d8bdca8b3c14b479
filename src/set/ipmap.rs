//! Active ipmap set.

use super::header::SetHeader;
use crate::error::IpMapError;
use crate::models::{parse_address, IdentityMapper, MembershipBitmap};
use std::net::Ipv4Addr;

/// An ipmap set with allocated members.
///
/// Owns its bitmap outright; `destroy` consumes the set so nothing can touch
/// it afterwards.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct IpMap {
    header: SetHeader,
    mapper: IdentityMapper,
    members: MembershipBitmap,
}

impl IpMap {
    pub(super) fn new(header: SetHeader, members: MembershipBitmap) -> IpMap {
        log::debug!("ipmap active, {} slots", members.sizeid());
        IpMap {
            mapper: header.mapper(),
            header,
            members,
        }
    }

    pub fn header(&self) -> &SetHeader {
        &self.header
    }

    /// Parse an address for add/del/test, rejecting addresses outside the range.
    pub fn parse_adt(&self, text: &str) -> Result<u32, IpMapError> {
        let addr = parse_address(text)?;
        log::trace!("adt {} in {}", Ipv4Addr::from(addr), self.header.range());
        if !self.header.range().contains(addr) {
            log::warn!("IP '{}' is out of range", Ipv4Addr::from(addr));
            return Err(IpMapError::OutOfRange(Ipv4Addr::from(addr)));
        }
        Ok(addr)
    }

    /// Add `addr`, returning `true` if its slot was not present yet.
    pub fn add(&mut self, addr: u32) -> Result<bool, IpMapError> {
        let id = self.mapper.address_to_id(addr)?;
        Ok(self.members.set(id))
    }

    /// Delete `addr`, returning `true` if its slot was present.
    pub fn del(&mut self, addr: u32) -> Result<bool, IpMapError> {
        let id = self.mapper.address_to_id(addr)?;
        Ok(self.members.clear(id))
    }

    pub fn test(&self, addr: u32) -> Result<bool, IpMapError> {
        let id = self.mapper.address_to_id(addr)?;
        Ok(self.members.test(id))
    }

    /// First address of slot `id`.
    pub fn ip_by_id(&self, id: u32) -> Option<u32> {
        self.mapper.id_to_address(id)
    }

    pub fn sizeid(&self) -> u32 {
        self.header.plan().sizeid()
    }

    /// Set slot ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.members.iter_ascending()
    }

    /// `(id, address)` of every present slot, ascending.
    pub fn members(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.ids()
            .filter_map(move |id| self.ip_by_id(id).map(|addr| (id, addr)))
    }

    /// Number of present slots.
    pub fn len(&self) -> usize {
        self.members.count()
    }

    pub fn is_empty(&self) -> bool {
        self.members.iter_ascending().next().is_none()
    }

    /// Member data in transport layout.
    pub fn members_bytes(&self) -> &[u8] {
        self.members.as_bytes()
    }

    /// Release the set, returning its member data.
    pub fn destroy(self) -> Vec<u8> {
        log::debug!("ipmap: killmembers()");
        self.members.into_bytes()
    }
}
