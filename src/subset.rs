//! Subset codec: no order, no repetition.

use crate::domain::DomainCatalog;
use crate::error::{CodecError, Result};
use crate::traits::GroupCodec;

/// Encodes subsets of the domain as membership bitmasks.
///
/// Bit `i` of the encoding is set iff the item at canonical position `i` is
/// a member of the group. The width is always `|domain|`, so a domain of
/// size `n` has exactly `2^n` distinct encodings, one per subset (the empty
/// subset is the all-false string). No digit arithmetic is involved.
#[derive(Debug, Clone)]
pub struct SubsetCodec<T> {
    domain: DomainCatalog<T>,
}

impl<T: Ord + Clone> SubsetCodec<T> {
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

    /// The fixed width of every encoding, `|domain|`.
    pub fn encoded_len(&self) -> usize {
        self.domain.len()
    }

    /// The sorted domain items.
    pub fn domain(&self) -> &[T] {
        self.domain.items()
    }
}

impl<T: Ord + Clone> GroupCodec<T> for SubsetCodec<T> {
    /// Duplicate items in `group` are harmless (set semantics); items
    /// outside the domain are rejected.
    fn encode(&self, group: &[T]) -> Result<Vec<bool>> {
        let mut bits = vec![false; self.domain.len()];
        for (position, item) in group.iter().enumerate() {
            let index = self
                .domain
                .index_of(item)
                .ok_or(CodecError::DomainMembership(position))?;
            bits[index] = true;
        }
        Ok(bits)
    }

    fn decode(&self, bits: &[bool]) -> Result<Vec<T>> {
        if bits.len() > self.domain.len() {
            return Err(CodecError::Range(format!(
                "{} bits exceed the domain size {}",
                bits.len(),
                self.domain.len()
            )));
        }
        let mut group = Vec::new();
        for (index, &bit) in bits.iter().enumerate() {
            if bit {
                group.push(self.domain.items()[index].clone());
            }
        }
        Ok(group)
    }
}
