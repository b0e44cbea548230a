use bitvec::prelude::*;
use num::{NumCast, ToPrimitive};
use std::fmt;
use std::fmt::{Debug, Formatter};

/// Fixed-size bit set tracking its own cardinality; backs the subgraph
/// membership masks and the visited set of the connectivity check.
#[derive(Clone)]
pub struct BitSet {
    cardinality: usize,
    bit_vec: BitVec,
}

impl Debug for BitSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let values: Vec<_> = (0..self.len())
            .filter(|&i| self.at(i))
            .map(|i| i.to_string())
            .collect();
        write!(
            f,
            "BitSet {{ cardinality: {}, bit_vec: [{}]}}",
            self.cardinality,
            values.join(", "),
        )
    }
}

impl BitSet {
    #[inline]
    pub fn new(size: usize) -> Self {
        Self {
            cardinality: 0,
            bit_vec: bitvec![0; size],
        }
    }

    pub fn from_slice<T: ToPrimitive + Copy>(size: usize, slice: &[T]) -> Self {
        let mut bit_vec: BitVec = bitvec![0; size];
        slice.iter().for_each(|i| {
            bit_vec.set(NumCast::from(*i).unwrap(), true);
        });
        let cardinality = slice.len();
        Self {
            cardinality,
            bit_vec,
        }
    }

    #[inline]
    pub fn full(&self) -> bool {
        self.cardinality == self.bit_vec.len()
    }

    /// Sets the bit and reports whether it was already set.
    #[inline]
    pub fn set_bit(&mut self, idx: usize) -> bool {
        if !*self.bit_vec.get(idx).unwrap() {
            self.bit_vec.set(idx, true);
            self.cardinality += 1;
            false
        } else {
            true
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bit_vec.len()
    }

    #[inline]
    pub fn at(&self, idx: usize) -> bool {
        self.bit_vec[idx]
    }
}

#[cfg(test)]
mod tests {
    use crate::BitSet;

    #[test]
    fn membership() {
        let mut bs = BitSet::new(70);
        assert!(!bs.full());
        assert!(!bs.set_bit(3));
        assert!(bs.set_bit(3));
        assert!(!bs.set_bit(69));
        assert!(bs.at(3) && bs.at(69));
        assert!(!bs.at(4));
        assert_eq!(bs.len(), 70);
    }

    #[test]
    fn from_slice() {
        let bs = BitSet::from_slice(10, &[0usize, 4, 9]);
        assert!(bs.at(0) && bs.at(4) && bs.at(9));
        assert!(!bs.at(1));
        assert!(!bs.full());
    }

    #[test]
    fn full_when_every_bit_is_set() {
        let bs = BitSet::from_slice(3, &[0usize, 1, 2]);
        assert!(bs.full());
    }
}
