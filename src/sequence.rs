//! Repeating-sequence codec: order matters, repetition allowed.
//!
//! Every sequence position is one digit at the fixed radix `R = |domain|`,
//! holding that element's canonical index; the first element is the anchor.
//! The terminator is not a separate digit: the last element's digit gets
//! `R − 1` added to it, so it either becomes a single head digit `R − 1`
//! (index 0) or spills a value-1 carry head above an `index − 1` digit.
//! Decoding undoes the offset at the head, using a one-digit lookahead when
//! the head is the bare carry. An explicit length prefix would be sturdier
//! framing, but this layout is kept for bit compatibility.
//!
//! Two empty-sequence behaviors exist in the wild for this format; they are
//! selected by [`EmptyPolicy`] instead of being separate near-identical
//! types.

use crate::digits::MixedRadixNumber;
use crate::domain::DomainCatalog;
use crate::error::{CodecError, Result};
use crate::traits::GroupCodec;

/// What the codec does where no digit exists past the terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyPolicy {
    /// The empty sequence is representable: it encodes to the
    /// [`min_value`](RepeatingSequenceCodec::min_value) pattern (a single
    /// digit `R − 2`), and the bare-terminator bit string decodes to `[]`.
    ///
    /// Degenerate case: at `|domain| = 2` the patterns for `[]` and
    /// `[domain[0]]` coincide, and both decode to `[]`.
    EmptySequence,
    /// The empty sequence is not representable (encoding it is an error);
    /// the bare-terminator bit string decodes to `[domain[0]]`.
    DefaultFirstItem,
}

/// Encodes sequences of domain items, order significant, repeats allowed.
///
/// Full fidelity needs `|domain| >= 3`: at radix 2 the terminator offset is
/// ambiguous, so multi-element sequences ending in `domain[0]` share their
/// pattern with a shorter sequence (a limitation of the wire format itself,
/// kept for compatibility).
#[derive(Debug, Clone)]
pub struct RepeatingSequenceCodec<T> {
    domain: DomainCatalog<T>,
    policy: EmptyPolicy,
    radix: u64,
}

impl<T: Ord + Clone> RepeatingSequenceCodec<T> {
    /// Build a codec over the given domain items with the given empty
    /// policy.
    ///
    /// # Errors
    ///
    /// [`CodecError::DuplicateDomainItem`] if two items compare equal;
    /// [`CodecError::Range`] if the domain has fewer than two items (the
    /// positional radix and the terminator offset both need `R >= 2`).
    pub fn new<I: IntoIterator<Item = T>>(domain: I, policy: EmptyPolicy) -> Result<Self> {
        let domain = DomainCatalog::new(domain)?;
        if domain.len() < 2 {
            return Err(CodecError::Range(format!(
                "a repeating-sequence codec needs at least two domain items, got {}",
                domain.len()
            )));
        }
        let radix = domain.len() as u64;
        Ok(Self {
            domain,
            policy,
            radix,
        })
    }

    /// The sorted domain items.
    pub fn domain(&self) -> &[T] {
        self.domain.items()
    }

    /// The configured empty-sequence policy.
    pub fn policy(&self) -> EmptyPolicy {
        self.policy
    }

    /// The smallest encoding: a single digit `R − 2`. Under
    /// [`EmptyPolicy::EmptySequence`] this is the empty sequence's bit
    /// string.
    pub fn min_value(&self) -> Result<Vec<bool>> {
        MixedRadixNumber::new(self.radix - 2, self.radix)?.to_bits()
    }

    /// Recover the last element's index from the head of the digit chain.
    /// Returns the index and how many head digits it occupied, or `None`
    /// for the bare-terminator case.
    fn read_head(&self, digits: &[u64]) -> Result<Option<(u64, usize)>> {
        let head = digits[digits.len() - 1];
        if head == 1 {
            if digits.len() == 1 {
                return Ok(None);
            }
            // Bare carry at the head: the digit below it holds index − 1.
            let index = digits[digits.len() - 2] + 1;
            if index >= self.radix {
                return Err(CodecError::Range(format!(
                    "head digits decode to index {index} outside the domain of {} items",
                    self.radix
                )));
            }
            Ok(Some((index, 2)))
        } else if head == self.radix - 1 {
            Ok(Some((0, 1)))
        } else {
            Err(CodecError::Range(format!(
                "head digit {head} is not a terminator-adjusted value for radix {}",
                self.radix
            )))
        }
    }
}

impl<T: Ord + Clone> GroupCodec<T> for RepeatingSequenceCodec<T> {
    fn encode(&self, group: &[T]) -> Result<Vec<bool>> {
        if group.is_empty() {
            return match self.policy {
                EmptyPolicy::EmptySequence => self.min_value(),
                EmptyPolicy::DefaultFirstItem => Err(CodecError::Range(
                    "the empty sequence has no encoding under the default-first-item policy"
                        .to_string(),
                )),
            };
        }

        let mut digits = Vec::with_capacity(group.len() + 1);
        for (position, item) in group.iter().enumerate() {
            let index = self
                .domain
                .index_of(item)
                .ok_or(CodecError::DomainMembership(position))?;
            digits.push(index as u64);
        }

        // Fold the terminator offset into the last element's digit.
        let adjusted = digits.pop().unwrap_or(0) + (self.radix - 1);
        if adjusted < self.radix {
            digits.push(adjusted);
        } else {
            digits.push(adjusted - self.radix);
            digits.push(1);
        }

        let mut number = MixedRadixNumber::new(digits[0], self.radix)?;
        for &digit in &digits[1..] {
            number.push_digit(digit, self.radix)?;
        }
        number.to_bits()
    }

    fn decode(&self, bits: &[bool]) -> Result<Vec<T>> {
        let number = MixedRadixNumber::from_bits(bits, self.radix)?;
        let digits: Vec<u64> = (0..number.len())
            .map(|i| number.value_at(i).unwrap_or(0))
            .collect();

        if self.policy == EmptyPolicy::EmptySequence
            && digits.len() == 1
            && digits[0] == self.radix - 2
        {
            return Ok(Vec::new());
        }

        let (last_index, consumed) = match self.read_head(&digits)? {
            Some(head) => head,
            None => {
                // No digit past the terminator.
                return match self.policy {
                    EmptyPolicy::EmptySequence => Ok(Vec::new()),
                    EmptyPolicy::DefaultFirstItem => {
                        Ok(vec![self.domain.items()[0].clone()])
                    }
                };
            }
        };

        let mut group = Vec::with_capacity(digits.len() - consumed + 1);
        for &digit in &digits[..digits.len() - consumed] {
            let item = self.domain.get(digit as usize).ok_or_else(|| {
                CodecError::Range(format!(
                    "digit {digit} outside the domain of {} items",
                    self.radix
                ))
            })?;
            group.push(item.clone());
        }
        group.push(self.domain.items()[last_index as usize].clone());
        Ok(group)
    }
}
