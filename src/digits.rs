//! Mixed-radix arbitrary-length numbers.
//!
//! A [`MixedRadixNumber`] is a positional numeral whose positions may each
//! have their own radix. The codecs in this crate use it to pack structured
//! values (counts, indices, lengths) into a single integer and then into a
//! bit string.
//!
//! Digits are stored anchor-first: index 0 is the least significant digit
//! (the anchor), the last index is the most significant (the head). The
//! represented value is `Σ value_i · Π(radix_j for j < i)`.
//!
//! Arithmetic mutates in place and may grow the head (carry overflow) or
//! drop a zero-valued head (after subtraction or division). A freshly
//! appended overflow head holds the raw carry, which may be at or above its
//! own radix; a later pass over the chain renormalizes it. Every other digit
//! satisfies `value < radix` between operations.

use crate::error::{CodecError, Result};

/// One digit position: a value and the radix bounding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Digit {
    value: u64,
    radix: u64,
}

/// An arbitrary-length number with a per-position radix.
#[derive(Debug, Clone)]
pub struct MixedRadixNumber {
    /// Anchor (least significant) first.
    digits: Vec<Digit>,
    /// When set, a head appended on carry overflow gets the old head's
    /// radix minus one. Used for factorial-style codes whose positional
    /// range shrinks by one per position.
    reducing: bool,
}

impl MixedRadixNumber {
    /// Create a single-digit number.
    pub fn new(value: u64, radix: u64) -> Result<Self> {
        Self::with_mode(value, radix, false)
    }

    /// Create a single-digit number whose overflow digits get a radix one
    /// less than their predecessor's.
    pub fn new_reducing(value: u64, radix: u64) -> Result<Self> {
        Self::with_mode(value, radix, true)
    }

    fn with_mode(value: u64, radix: u64, reducing: bool) -> Result<Self> {
        if radix == 0 {
            return Err(CodecError::InvalidRadix(0));
        }
        Ok(Self {
            digits: vec![Digit { value, radix }],
            reducing,
        })
    }

    /// Append a new most-significant digit.
    pub fn push_digit(&mut self, value: u64, radix: u64) -> Result<()> {
        if radix == 0 {
            return Err(CodecError::InvalidRadix(0));
        }
        self.digits.push(Digit { value, radix });
        Ok(())
    }

    /// Number of digit positions, anchor through head.
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// True when the chain holds no meaningful digits. A number always has
    /// at least one digit, so this is never true; provided for clippy's
    /// `len` convention.
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Value of the digit at `index` (0 = anchor).
    pub fn value_at(&self, index: usize) -> Option<u64> {
        self.digits.get(index).map(|d| d.value)
    }

    /// Radix of the digit at `index` (0 = anchor).
    pub fn radix_at(&self, index: usize) -> Option<u64> {
        self.digits.get(index).map(|d| d.radix)
    }

    /// True iff every digit holds value 0.
    pub fn is_zero(&self) -> bool {
        self.digits.iter().all(|d| d.value == 0)
    }

    /// Add `n`, propagating carries from the anchor toward the head. A
    /// final carry appends a new head digit.
    pub fn add_scalar(&mut self, n: u64) -> Result<()> {
        let mut carry = n;
        for digit in &mut self.digits {
            digit.value += carry;
            carry = digit.value / digit.radix;
            digit.value %= digit.radix;
        }
        self.append_carry(carry)
    }

    /// Subtract `n` at the anchor, borrowing from more-significant digits
    /// when the anchor's value is too small. A zero-valued head is dropped
    /// afterwards if other digits remain.
    ///
    /// The borrow decrements the first positive digit above the anchor and
    /// leaves intermediate zero digits untouched.
    pub fn sub_scalar(&mut self, n: u64) -> Result<()> {
        let Digit { value, radix } = self.digits[0];
        if n <= value {
            self.digits[0].value = value - n;
        } else {
            self.digits[0].value = value
                .checked_add(radix)
                .and_then(|sum| sum.checked_sub(n))
                .ok_or_else(|| {
                    CodecError::Range(format!(
                        "cannot subtract {n} from a digit of value {value} at radix {radix}"
                    ))
                })?;
            self.decrement(1);
        }
        self.drop_zero_head();
        Ok(())
    }

    /// Decrement the first positive digit at or above `index`. Running past
    /// the head is a no-op.
    fn decrement(&mut self, index: usize) {
        for digit in self.digits.iter_mut().skip(index) {
            if digit.value > 0 {
                digit.value -= 1;
                return;
            }
        }
    }

    /// Multiply by `n`, propagating carries from the anchor toward the
    /// head. A final carry appends a new head digit.
    pub fn mul_scalar(&mut self, n: u64) -> Result<()> {
        let mut carry = 0;
        for digit in &mut self.digits {
            digit.value = digit.value * n + carry;
            carry = digit.value / digit.radix;
            digit.value %= digit.radix;
        }
        self.append_carry(carry)
    }

    /// Divide by `n` in a single long-division pass from the head toward
    /// the anchor and return the remainder. Each position's remainder,
    /// scaled by the next lower radix, folds into the next lower digit
    /// before that digit is divided. A zero-valued head is dropped
    /// afterwards if other digits remain.
    pub fn div_scalar(&mut self, n: u64) -> Result<u64> {
        if n == 0 {
            return Err(CodecError::InvalidRadix(0));
        }
        let mut rest = 0;
        for i in (0..self.digits.len()).rev() {
            rest = self.digits[i].value % n;
            self.digits[i].value /= n;
            if i > 0 {
                self.digits[i - 1].value += rest * self.digits[i - 1].radix;
            }
        }
        self.drop_zero_head();
        Ok(rest)
    }

    fn append_carry(&mut self, carry: u64) -> Result<()> {
        if carry == 0 {
            return Ok(());
        }
        let head_radix = self.digits.last().map(|d| d.radix).unwrap_or(2);
        let radix = if self.reducing {
            head_radix - 1
        } else {
            head_radix
        };
        // The raw carry is stored as-is; the next traversal renormalizes it.
        self.push_digit(carry, radix)
    }

    fn drop_zero_head(&mut self) {
        if self.digits.len() > 1 && self.digits.last().map(|d| d.value) == Some(0) {
            self.digits.pop();
        }
    }

    /// Convert to a bit string, most significant bit first, by repeated
    /// division by two of a working copy. A value of exactly zero produces
    /// an empty bit string; callers that must represent zero special-case
    /// it.
    pub fn to_bits(&self) -> Result<Vec<bool>> {
        let mut working = self.clone();
        let mut bits = Vec::new();
        while !working.is_zero() {
            let rest = working.div_scalar(2)?;
            bits.push(rest == 1);
        }
        bits.reverse();
        Ok(bits)
    }

    /// Build a number of uniform `radix` from a bit string, most
    /// significant bit first. Empty bits produce a single zero digit.
    pub fn from_bits(bits: &[bool], radix: u64) -> Result<Self> {
        Self::from_bits_mode(bits, radix, false)
    }

    /// Like [`from_bits`](Self::from_bits), but digits appended on carry
    /// overflow get a radix one less than their predecessor's. Used to
    /// decode factorial-style codes.
    pub fn from_bits_reducing(bits: &[bool], radix: u64) -> Result<Self> {
        Self::from_bits_mode(bits, radix, true)
    }

    fn from_bits_mode(bits: &[bool], radix: u64, reducing: bool) -> Result<Self> {
        if bits.is_empty() {
            return Self::with_mode(0, radix, reducing);
        }
        if radix < 2 {
            return Err(CodecError::InvalidRadix(radix));
        }
        let mut number = Self::with_mode(u64::from(bits[0]), radix, reducing)?;
        for &bit in &bits[1..] {
            number.mul_scalar(2)?;
            number.add_scalar(u64::from(bit))?;
        }
        Ok(number)
    }

    /// Renormalize the chain so that each digit above the anchor has radix
    /// `max(2, radix − position)`, re-propagating any overflow the shrunken
    /// radices cause.
    ///
    /// Utility operation with no caller among the codecs; kept for callers
    /// that build chains by hand and want the linearly-reduced layout.
    pub fn linear_reduce_bases(&mut self) {
        let mut reduce = 0;
        let mut i = 0;
        while i + 1 < self.digits.len() {
            reduce += 1;
            i += 1;
            let radix = self.digits[i].radix.saturating_sub(reduce).max(2);
            self.digits[i].radix = radix;
            if self.digits[i].value >= radix {
                let overflow = self.digits[i].value / radix;
                self.digits[i].value %= radix;
                if i + 1 < self.digits.len() {
                    self.digits[i + 1].value += overflow;
                } else {
                    self.digits.push(Digit {
                        value: overflow,
                        radix: radix + reduce,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(n: &MixedRadixNumber) -> Vec<u64> {
        (0..n.len()).map(|i| n.value_at(i).unwrap()).collect()
    }

    #[test]
    fn test_add_carries_and_appends() {
        let mut n = MixedRadixNumber::new(2, 3).unwrap();
        n.push_digit(2, 3).unwrap();
        n.add_scalar(1).unwrap(); // 2 + 2*3 + 1 = 9 = [0, 0, 1] base 3
        assert_eq!(values(&n), vec![0, 0, 1]);
        assert_eq!(n.radix_at(2), Some(3));
    }

    #[test]
    fn test_reducing_append_radix() {
        let mut n = MixedRadixNumber::new_reducing(4, 5).unwrap();
        n.add_scalar(1).unwrap(); // overflows into a radix-4 head
        assert_eq!(values(&n), vec![0, 1]);
        assert_eq!(n.radix_at(1), Some(4));
    }

    #[test]
    fn test_sub_borrows_and_drops_zero_head() {
        let mut n = MixedRadixNumber::new(0, 5).unwrap();
        n.push_digit(1, 5).unwrap(); // value 5
        n.sub_scalar(2).unwrap(); // 5 - 2 = 3, head 1 -> 0 -> dropped
        assert_eq!(values(&n), vec![3]);
    }

    #[test]
    fn test_sub_underflow_is_range_error() {
        let mut n = MixedRadixNumber::new(0, 3).unwrap();
        assert!(matches!(n.sub_scalar(10), Err(CodecError::Range(_))));
    }

    #[test]
    fn test_div_returns_remainder() {
        // 19 = [1, 0, 2] base 3
        let mut n = MixedRadixNumber::new(1, 3).unwrap();
        n.push_digit(0, 3).unwrap();
        n.push_digit(2, 3).unwrap();
        let rest = n.div_scalar(2).unwrap(); // 19 / 2 = 9 rem 1
        assert_eq!(rest, 1);
        assert_eq!(values(&n), vec![0, 0, 1]); // 9 = [0, 0, 1] base 3
    }

    #[test]
    fn test_div_by_zero_rejected() {
        let mut n = MixedRadixNumber::new(1, 3).unwrap();
        assert!(matches!(n.div_scalar(0), Err(CodecError::InvalidRadix(0))));
    }

    #[test]
    fn test_to_bits_msb_first() {
        // 19 = [1, 0, 2] base 3 = 10011 binary
        let mut n = MixedRadixNumber::new(1, 3).unwrap();
        n.push_digit(0, 3).unwrap();
        n.push_digit(2, 3).unwrap();
        let bits = n.to_bits().unwrap();
        assert_eq!(bits, vec![true, false, false, true, true]);
    }

    #[test]
    fn test_zero_value_has_empty_bits() {
        let n = MixedRadixNumber::new(0, 7).unwrap();
        assert!(n.to_bits().unwrap().is_empty());
    }

    #[test]
    fn test_from_bits_round_trip() {
        let bits = vec![true, false, false, true, true]; // 19
        let n = MixedRadixNumber::from_bits(&bits, 3).unwrap();
        assert_eq!(values(&n), vec![1, 0, 2]);
        assert_eq!(n.to_bits().unwrap(), bits);
    }

    #[test]
    fn test_from_bits_empty_is_zero() {
        let n = MixedRadixNumber::from_bits(&[], 3).unwrap();
        assert!(n.is_zero());
        assert_eq!(n.len(), 1);
    }

    #[test]
    fn test_from_bits_reducing_matches_factorial_layout() {
        // 5 = 101 binary; at anchor radix 3 reducing: [2, 1] with head radix 2
        let n = MixedRadixNumber::from_bits_reducing(&[true, false, true], 3).unwrap();
        assert_eq!(values(&n), vec![2, 1]);
        assert_eq!(n.radix_at(0), Some(3));
        assert_eq!(n.radix_at(1), Some(2));
    }

    #[test]
    fn test_radix_zero_rejected() {
        assert!(matches!(
            MixedRadixNumber::new(0, 0),
            Err(CodecError::InvalidRadix(0))
        ));
        let mut n = MixedRadixNumber::new(0, 2).unwrap();
        assert!(matches!(
            n.push_digit(1, 0),
            Err(CodecError::InvalidRadix(0))
        ));
    }

    #[test]
    fn test_linear_reduce_bases() {
        // [1, 9, 9] at uniform radix 10: digit 1 shrinks to radix 9 and
        // overflows into digit 2, which shrinks to radix 8 and spills a new
        // head. The appended head is then visited and reduced in turn.
        let mut n = MixedRadixNumber::new(1, 10).unwrap();
        n.push_digit(9, 10).unwrap();
        n.push_digit(9, 10).unwrap();
        n.linear_reduce_bases();
        assert_eq!(values(&n), vec![1, 0, 2, 1]);
        let radices: Vec<u64> = (0..n.len()).map(|i| n.radix_at(i).unwrap()).collect();
        assert_eq!(radices, vec![10, 9, 8, 7]);
    }

    #[test]
    fn test_linear_reduce_bases_floors_at_two() {
        let mut n = MixedRadixNumber::new(0, 3).unwrap();
        n.push_digit(1, 3).unwrap();
        n.push_digit(1, 3).unwrap();
        n.push_digit(1, 3).unwrap();
        n.linear_reduce_bases();
        let radices: Vec<u64> = (0..n.len()).map(|i| n.radix_at(i).unwrap()).collect();
        assert_eq!(radices, vec![3, 2, 2, 2]);
    }
}
