//! Permutation codec: order matters, no repetition.
//!
//! A sequence of distinct domain items is stored as a Lehmer-style
//! factorial code. The anchor digit holds the sequence length at radix
//! `|domain| + 1`; each following digit holds the element's index within a
//! working copy of the domain that shrinks as elements are consumed, so the
//! radices run `|domain|, |domain| − 1, …` toward the head. Decoding builds
//! the number with reducing radices so overflow digits land on the same
//! layout.

use crate::digits::MixedRadixNumber;
use crate::domain::DomainCatalog;
use crate::error::{CodecError, Result};
use crate::traits::GroupCodec;

/// Encodes sequences of distinct domain items, order significant.
#[derive(Debug, Clone)]
pub struct PermutationCodec<T> {
    domain: DomainCatalog<T>,
}

impl<T: Ord + Clone> PermutationCodec<T> {
    /// Build a codec over the given domain items.
    ///
    /// # Errors
    ///
    /// [`CodecError::DuplicateDomainItem`] if two items compare equal.
    pub fn new<I: IntoIterator<Item = T>>(domain: I) -> Result<Self> {
        Ok(Self {
            domain: DomainCatalog::new(domain)?,
        })
    }

    /// The sorted domain items.
    pub fn domain(&self) -> &[T] {
        self.domain.items()
    }
}

impl<T: Ord + Clone> GroupCodec<T> for PermutationCodec<T> {
    /// A repeated item, or one outside the domain, is rejected with its
    /// position in the sequence. The empty sequence encodes to the zero
    /// value: an empty bit string.
    fn encode(&self, group: &[T]) -> Result<Vec<bool>> {
        if group.is_empty() {
            return MixedRadixNumber::new(0, 2)?.to_bits();
        }

        let mut radix = self.domain.len() as u64 + 1;
        let mut working: Vec<T> = self.domain.items().to_vec();
        let mut number = MixedRadixNumber::new(group.len() as u64, radix)?;
        for (position, item) in group.iter().enumerate() {
            radix -= 1;
            let index = working
                .iter()
                .position(|candidate| candidate == item)
                .ok_or(CodecError::DomainMembership(position))?;
            number.push_digit(index as u64, radix)?;
            working.remove(index);
        }
        number.to_bits()
    }

    /// Reads the length from the anchor digit, then each following digit as
    /// an index into the shrinking domain copy. If the digits run out
    /// before `length` items are produced, the remaining indices default to
    /// 0 (the first remaining item) — trailing zero digits carry no bits,
    /// so short chains are a normal outcome, kept for compatibility.
    fn decode(&self, bits: &[bool]) -> Result<Vec<T>> {
        let radix = self.domain.len() as u64 + 1;
        if radix < 2 {
            // Empty domain: only the empty sequence exists.
            return if bits.is_empty() {
                Ok(Vec::new())
            } else {
                Err(CodecError::Range(
                    "an empty domain has no non-empty encodings".to_string(),
                ))
            };
        }
        let number = MixedRadixNumber::from_bits_reducing(bits, radix).map_err(|_| {
            CodecError::Range(format!(
                "{} bits exceed the factorial-code capacity of a domain of {} items",
                bits.len(),
                self.domain.len()
            ))
        })?;

        let length = number.value_at(0).unwrap_or(0);
        if length > self.domain.len() as u64 {
            return Err(CodecError::Range(format!(
                "encoded length {length} exceeds the domain size {}",
                self.domain.len()
            )));
        }

        let mut working: Vec<T> = self.domain.items().to_vec();
        let mut group = Vec::with_capacity(length as usize);
        for position in 0..length as usize {
            let index = number.value_at(position + 1).unwrap_or(0) as usize;
            if index >= working.len() {
                return Err(CodecError::Range(format!(
                    "index digit {index} at position {position} exceeds the {} remaining items",
                    working.len()
                )));
            }
            group.push(working.remove(index));
        }
        Ok(group)
    }
}
