//! Fixed-size membership bitmap.
//!
//! Bit `id` lives in byte `id / 8` at position `id % 8`, the same byte layout
//! the back end uses when it ships member data.

use crate::error::IpMapError;

/// Bytes needed to hold `sizeid` bits.
pub fn bitmap_bytes(sizeid: u32) -> usize {
    (sizeid as usize).div_ceil(8)
}

/// Bit vector of exactly `sizeid` slots. Never resized after creation.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MembershipBitmap {
    bits: Vec<u8>,
    sizeid: u32,
}

impl MembershipBitmap {
    /// Zeroed bitmap for `sizeid` slots.
    pub fn allocate(sizeid: u32) -> MembershipBitmap {
        MembershipBitmap {
            bits: vec![0; bitmap_bytes(sizeid)],
            sizeid,
        }
    }

    /// Take ownership of member data supplied from outside.
    ///
    /// The length must match [`bitmap_bytes`] exactly; a mismatch means the
    /// sender computed a different size for the set.
    pub fn from_bytes(sizeid: u32, bits: Vec<u8>) -> Result<MembershipBitmap, IpMapError> {
        let wanted = bitmap_bytes(sizeid);
        if bits.len() != wanted {
            return Err(IpMapError::SizeMismatch {
                what: "members",
                got: bits.len(),
                wanted,
            });
        }
        Ok(MembershipBitmap { bits, sizeid })
    }

    pub fn sizeid(&self) -> u32 {
        self.sizeid
    }

    fn locate(&self, id: u32) -> (usize, u8) {
        assert!(
            id < self.sizeid,
            "slot id {id} out of bounds for bitmap of {} slots",
            self.sizeid
        );
        ((id / 8) as usize, 1 << (id % 8))
    }

    pub fn test(&self, id: u32) -> bool {
        let (byte, mask) = self.locate(id);
        self.bits[byte] & mask != 0
    }

    /// Set slot `id`, returning `true` if it was previously clear.
    pub fn set(&mut self, id: u32) -> bool {
        let (byte, mask) = self.locate(id);
        let was_clear = self.bits[byte] & mask == 0;
        self.bits[byte] |= mask;
        was_clear
    }

    /// Clear slot `id`, returning `true` if it was previously set.
    pub fn clear(&mut self, id: u32) -> bool {
        let (byte, mask) = self.locate(id);
        let was_set = self.bits[byte] & mask != 0;
        self.bits[byte] &= !mask;
        was_set
    }

    /// Set slot ids in strictly increasing order.
    pub fn iter_ascending(&self) -> Ones<'_> {
        Ones {
            bitmap: self,
            byte: 0,
            pending: self.bits.first().copied().unwrap_or(0),
        }
    }

    /// Number of set slots.
    pub fn count(&self) -> usize {
        self.iter_ascending().count()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bits
    }
}

/// Iterator over the set slots of a [`MembershipBitmap`].
#[derive(Debug, Clone)]
pub struct Ones<'a> {
    bitmap: &'a MembershipBitmap,
    byte: usize,
    // bits of the current byte not yet yielded
    pending: u8,
}

impl Iterator for Ones<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        loop {
            if self.pending != 0 {
                let bit = self.pending.trailing_zeros();
                self.pending &= self.pending - 1;
                let id = self.byte as u32 * 8 + bit;
                // padding bits past sizeid in the last byte are ignored
                if id >= self.bitmap.sizeid {
                    self.pending = 0;
                    continue;
                }
                return Some(id);
            }
            self.byte += 1;
            self.pending = *self.bitmap.bits.get(self.byte)?;
        }
    }
}
