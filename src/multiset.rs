//! Multiset codec: no order, with repetition.
//!
//! A group is reduced to a count table (one count per domain item) and the
//! table is packed into a [`MixedRadixNumber`], one digit per domain item in
//! canonical order, anchor = first domain item. Relative order among
//! duplicates is not preserved; decoding expands counts in domain order.
//!
//! Two multiplicity policies share the machinery:
//!
//! - [`Multiplicity::Bounded`]: a fixed cap `M` gives every digit radix
//!   `M + 1`; counts above the cap are silently clamped.
//! - [`Multiplicity::Unbounded`]: the radix is chosen per call as a power of
//!   two large enough for the group's biggest count, and a radix-2, value-1
//!   terminator digit is appended at the head so the decoder can recover the
//!   radix from the bit length alone. A length prefix would be a less
//!   fragile framing, but the terminator layout is kept for bit
//!   compatibility.

use std::collections::BTreeMap;

use crate::digits::MixedRadixNumber;
use crate::domain::DomainCatalog;
use crate::error::{CodecError, Result};
use crate::traits::GroupCodec;

/// How many times one domain item may repeat within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    /// Counts are clamped to the given cap; every encoding has the same
    /// digit radix `cap + 1`.
    Bounded(u64),
    /// Counts are unlimited; the digit radix is derived per group and
    /// recovered from the encoding's bit length.
    Unbounded,
}

/// Encodes multisets drawn from the domain.
#[derive(Debug, Clone)]
pub struct MultisetCodec<T> {
    domain: DomainCatalog<T>,
    multiplicity: Multiplicity,
}

impl<T: Ord + Clone> MultisetCodec<T> {
    /// Build a codec over the given domain items with the given
    /// multiplicity policy.
    ///
    /// # Errors
    ///
    /// [`CodecError::DuplicateDomainItem`] if two items compare equal;
    /// [`CodecError::Range`] if the domain is empty (there is no digit
    /// position to store a count in) or a bounded cap of `u64::MAX` is
    /// requested (its radix would not fit a digit).
    pub fn new<I: IntoIterator<Item = T>>(domain: I, multiplicity: Multiplicity) -> Result<Self> {
        let domain = DomainCatalog::new(domain)?;
        if domain.is_empty() {
            return Err(CodecError::Range(
                "a multiset codec needs at least one domain item".to_string(),
            ));
        }
        if let Multiplicity::Bounded(cap) = multiplicity {
            if cap == u64::MAX {
                return Err(CodecError::Range(format!(
                    "multiplicity cap {cap} is too large for a digit radix"
                )));
            }
        }
        Ok(Self {
            domain,
            multiplicity,
        })
    }

    /// The sorted domain items.
    pub fn domain(&self) -> &[T] {
        self.domain.items()
    }

    /// The configured multiplicity policy.
    pub fn multiplicity(&self) -> Multiplicity {
        self.multiplicity
    }

    /// Encode a full count table directly.
    ///
    /// The table must cover every domain item (a count of zero is an
    /// explicit entry, never an implied default) and contain nothing else.
    /// For a missing entry the error position is the canonical index of the
    /// uncovered domain item; for a foreign entry it is the key's position
    /// in the table's sorted order.
    pub fn encode_counts(&self, counts: &BTreeMap<T, u64>) -> Result<Vec<bool>> {
        self.verify_counts(counts)?;
        let number = match self.multiplicity {
            Multiplicity::Bounded(cap) => self.bounded_number(counts, cap)?,
            Multiplicity::Unbounded => self.unbounded_number(counts)?,
        };
        number.to_bits()
    }

    /// Decode a bit string into a full count table (every domain item
    /// present, zeros included).
    pub fn decode_counts(&self, bits: &[bool]) -> Result<BTreeMap<T, u64>> {
        match self.multiplicity {
            Multiplicity::Bounded(cap) => self.decode_bounded(bits, cap),
            Multiplicity::Unbounded => self.decode_unbounded(bits),
        }
    }

    fn verify_counts(&self, counts: &BTreeMap<T, u64>) -> Result<()> {
        for (position, key) in counts.keys().enumerate() {
            if self.domain.index_of(key).is_none() {
                return Err(CodecError::DomainMembership(position));
            }
        }
        if counts.len() != self.domain.len() {
            let missing = self
                .domain
                .items()
                .iter()
                .position(|item| !counts.contains_key(item))
                .unwrap_or(0);
            return Err(CodecError::DomainMembership(missing));
        }
        Ok(())
    }

    fn count_for(&self, counts: &BTreeMap<T, u64>, index: usize) -> Result<u64> {
        counts
            .get(&self.domain.items()[index])
            .copied()
            .ok_or(CodecError::DomainMembership(index))
    }

    fn bounded_number(&self, counts: &BTreeMap<T, u64>, cap: u64) -> Result<MixedRadixNumber> {
        let radix = cap + 1;
        let mut number = MixedRadixNumber::new(self.count_for(counts, 0)?.min(cap), radix)?;
        for index in 1..self.domain.len() {
            number.push_digit(self.count_for(counts, index)?.min(cap), radix)?;
        }
        Ok(number)
    }

    fn unbounded_number(&self, counts: &BTreeMap<T, u64>) -> Result<MixedRadixNumber> {
        let max_count = counts.values().copied().max().unwrap_or(0);
        let radix = max_count
            .max(2)
            .checked_add(1)
            .and_then(u64::checked_next_power_of_two)
            .ok_or_else(|| {
                CodecError::Range(format!("count {max_count} is too large for a digit radix"))
            })?;
        let mut number = MixedRadixNumber::new(self.count_for(counts, 0)?, radix)?;
        for index in 1..self.domain.len() {
            number.push_digit(self.count_for(counts, index)?, radix)?;
        }
        // Terminator: fixes the bit length so decode can infer the radix.
        number.push_digit(1, 2)?;
        Ok(number)
    }

    fn decode_bounded(&self, bits: &[bool], cap: u64) -> Result<BTreeMap<T, u64>> {
        if bits.is_empty() {
            // The all-zero table encodes to the zero value, whose bit
            // string is empty.
            return Ok(self.zero_counts());
        }
        let radix = cap + 1;
        if radix < 2 {
            return Err(CodecError::Range(format!(
                "{} bits cannot encode counts under a multiplicity cap of 0",
                bits.len()
            )));
        }
        let number = MixedRadixNumber::from_bits(bits, radix)?;
        if number.len() > self.domain.len() {
            return Err(CodecError::Range(format!(
                "{} bits decode to {} digits but the domain has only {} items",
                bits.len(),
                number.len(),
                self.domain.len()
            )));
        }
        let mut counts = BTreeMap::new();
        for (index, item) in self.domain.items().iter().enumerate() {
            counts.insert(item.clone(), number.value_at(index).unwrap_or(0));
        }
        Ok(counts)
    }

    fn decode_unbounded(&self, bits: &[bool]) -> Result<BTreeMap<T, u64>> {
        let n = self.domain.len();
        let malformed = || {
            CodecError::Range(format!(
                "{} bits are not a valid unbounded-multiset encoding for a domain of {} items",
                bits.len(),
                n
            ))
        };
        if bits.is_empty() || (bits.len() - 1) % n != 0 {
            return Err(malformed());
        }
        let width = (bits.len() - 1) / n;
        // Valid encodings never use a radix below 4 (width 2).
        if !(2..64).contains(&width) {
            return Err(malformed());
        }
        let number = MixedRadixNumber::from_bits(bits, 1 << width)?;
        if number.len() != n + 1 || number.value_at(n) != Some(1) {
            return Err(malformed());
        }
        let mut counts = BTreeMap::new();
        for (index, item) in self.domain.items().iter().enumerate() {
            counts.insert(item.clone(), number.value_at(index).unwrap_or(0));
        }
        Ok(counts)
    }

    fn zero_counts(&self) -> BTreeMap<T, u64> {
        self.domain
            .items()
            .iter()
            .map(|item| (item.clone(), 0))
            .collect()
    }
}

impl<T: Ord + Clone> GroupCodec<T> for MultisetCodec<T> {
    /// Tallies the group into a count table, then encodes the table. Items
    /// outside the domain are rejected with their position in the group.
    fn encode(&self, group: &[T]) -> Result<Vec<bool>> {
        let mut counts = self.zero_counts();
        for (position, item) in group.iter().enumerate() {
            match counts.get_mut(item) {
                Some(count) => *count += 1,
                None => return Err(CodecError::DomainMembership(position)),
            }
        }
        self.encode_counts(&counts)
    }

    /// Decodes the count table and expands it: items in domain order, each
    /// repeated by its count.
    fn decode(&self, bits: &[bool]) -> Result<Vec<T>> {
        let counts = self.decode_counts(bits)?;
        let mut group = Vec::new();
        for (item, &count) in &counts {
            for _ in 0..count {
                group.push(item.clone());
            }
        }
        Ok(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts_of(pairs: &[(char, u64)]) -> BTreeMap<char, u64> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_bounded_digit_layout() {
        // Counts x:1 y:0 z:2 at cap 2 form the base-3 value
        // 1 + 0*3 + 2*9 = 19 = 10011 binary.
        let codec = MultisetCodec::new(vec!['x', 'y', 'z'], Multiplicity::Bounded(2)).unwrap();
        let bits = codec
            .encode_counts(&counts_of(&[('x', 1), ('y', 0), ('z', 2)]))
            .unwrap();
        assert_eq!(bits, vec![true, false, false, true, true]);
        assert_eq!(
            codec.decode_counts(&bits).unwrap(),
            counts_of(&[('x', 1), ('y', 0), ('z', 2)])
        );
    }

    #[test]
    fn test_bounded_zero_counts_encode_to_empty_bits() {
        let codec = MultisetCodec::new(vec!['x', 'y', 'z'], Multiplicity::Bounded(2)).unwrap();
        let bits = codec
            .encode_counts(&counts_of(&[('x', 0), ('y', 0), ('z', 0)]))
            .unwrap();
        assert!(bits.is_empty());
        assert_eq!(
            codec.decode_counts(&[]).unwrap(),
            counts_of(&[('x', 0), ('y', 0), ('z', 0)])
        );
    }

    #[test]
    fn test_bounded_clamps_to_cap() {
        let codec = MultisetCodec::new(vec!['x', 'y'], Multiplicity::Bounded(2)).unwrap();
        let clamped = codec
            .encode_counts(&counts_of(&[('x', 9), ('y', 0)]))
            .unwrap();
        let exact = codec
            .encode_counts(&counts_of(&[('x', 2), ('y', 0)]))
            .unwrap();
        assert_eq!(clamped, exact);
    }

    #[test]
    fn test_bounded_group_round_trip() {
        let codec = MultisetCodec::new(vec!['a', 'b', 'c'], Multiplicity::Bounded(3)).unwrap();
        let bits = codec.encode(&['c', 'a', 'c', 'c']).unwrap();
        // Expansion is in domain order.
        assert_eq!(codec.decode(&bits).unwrap(), vec!['a', 'c', 'c', 'c']);
    }

    #[test]
    fn test_unbounded_round_trip() {
        let codec = MultisetCodec::new(vec!['x', 'y'], Multiplicity::Unbounded).unwrap();
        let table = counts_of(&[('x', 1), ('y', 3)]);
        let bits = codec.encode_counts(&table).unwrap();
        // Radix 4 (width 2), two count digits plus the terminator: 5 bits.
        assert_eq!(bits.len(), 5);
        assert_eq!(codec.decode_counts(&bits).unwrap(), table);
    }

    #[test]
    fn test_unbounded_all_zero_round_trip() {
        let codec = MultisetCodec::new(vec!['x', 'y', 'z'], Multiplicity::Unbounded).unwrap();
        let table = counts_of(&[('x', 0), ('y', 0), ('z', 0)]);
        let bits = codec.encode_counts(&table).unwrap();
        assert_eq!(codec.decode_counts(&bits).unwrap(), table);
    }

    #[test]
    fn test_unbounded_bad_length_rejected() {
        let codec = MultisetCodec::new(vec!['x', 'y'], Multiplicity::Unbounded).unwrap();
        assert!(matches!(codec.decode_counts(&[]), Err(CodecError::Range(_))));
        assert!(matches!(
            codec.decode_counts(&[true, false]),
            Err(CodecError::Range(_))
        ));
    }

    #[test]
    fn test_missing_coverage_rejected() {
        let codec = MultisetCodec::new(vec!['x', 'y', 'z'], Multiplicity::Bounded(2)).unwrap();
        let result = codec.encode_counts(&counts_of(&[('x', 1), ('z', 1)]));
        assert!(matches!(result, Err(CodecError::DomainMembership(1))));
    }

    #[test]
    fn test_foreign_key_rejected() {
        let codec = MultisetCodec::new(vec!['x', 'y'], Multiplicity::Bounded(2)).unwrap();
        let result = codec.encode_counts(&counts_of(&[('q', 1), ('x', 0), ('y', 0)]));
        assert!(matches!(result, Err(CodecError::DomainMembership(0))));
    }

    #[test]
    fn test_foreign_group_item_rejected() {
        let codec = MultisetCodec::new(vec!['x', 'y'], Multiplicity::Unbounded).unwrap();
        let result = codec.encode(&['x', 'q']);
        assert!(matches!(result, Err(CodecError::DomainMembership(1))));
    }

    #[test]
    fn test_empty_domain_rejected() {
        let result = MultisetCodec::<char>::new(vec![], Multiplicity::Unbounded);
        assert!(matches!(result, Err(CodecError::Range(_))));
    }

    #[test]
    fn test_oversized_bounded_bits_rejected() {
        let codec = MultisetCodec::new(vec!['x'], Multiplicity::Bounded(1)).unwrap();
        // Three bits decode to more base-2 digits than domain items.
        let result = codec.decode_counts(&[true, false, true]);
        assert!(matches!(result, Err(CodecError::Range(_))));
    }
}
