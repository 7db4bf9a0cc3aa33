//! The trait shared by every codec variant.

use crate::error::Result;

/// A bijective codec between groups of domain items and bit strings.
///
/// Every distinct valid input maps to a distinct bit string, and decoding
/// that string recovers the input exactly (up to what the variant considers
/// identity: codecs that ignore order return items in canonical domain
/// order).
///
/// Bit strings are most significant bit first and are generally not of a
/// fixed length across inputs of one codec.
pub trait GroupCodec<T> {
    /// Encode a group of domain items into its unique bit string.
    fn encode(&self, group: &[T]) -> Result<Vec<bool>>;

    /// Decode a bit string back into the group it identifies.
    fn decode(&self, bits: &[bool]) -> Result<Vec<T>>;
}
