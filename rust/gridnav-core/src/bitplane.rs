//! Bit-packed boolean plane, one bit per tile.
//!
//! Storage is `u8` words in LSB-first order, so the packed export matches the
//! `index / 8`, `index % 8` layout hosts expect.

use bitvec::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitPlane {
    bits: BitVec<u8, Lsb0>,
}

impl BitPlane {
    /// All-clear plane of `len` bits.
    pub fn new(len: usize) -> Self {
        Self { bits: bitvec![u8, Lsb0; 0; len] }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).map(|b| *b)
    }

    /// Returns false when `index` is past the end; nothing is written then.
    #[inline]
    pub fn set(&mut self, index: usize, value: bool) -> bool {
        match self.bits.get_mut(index) {
            Some(mut bit) => {
                *bit = value;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    pub fn fill(&mut self, value: bool) {
        self.bits.fill(value);
    }

    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Copy out as packed bytes. Padding bits in the last byte are zero.
    pub fn to_packed_bytes(&self) -> Vec<u8> {
        let mut copy = self.bits.clone();
        copy.set_uninitialized(false);
        copy.into_vec()
    }
}
