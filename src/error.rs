//! Error types for the codec family.
//!
//! All fallible operations return [`CodecError`] rather than panicking, so a
//! caller can distinguish bad construction input, bad encode input, and bit
//! strings that decode to nothing.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors produced by codec construction, encoding, and decoding.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Two items of the domain compared equal at construction time.
    ///
    /// The sorted domain is the index space every codec reads positions
    /// from, so equal items would make two inputs share an encoding.
    #[error("the domain contains two or more equivalent items")]
    DuplicateDomainItem,

    /// An encode input contains an item that is not part of the domain
    /// (or, for a no-repetition codec, an item that was already consumed).
    /// Carries the offending position within the input.
    #[error("the item at position {0} in the given group is not part of the domain")]
    DomainMembership(usize),

    /// A bit string (or an input) falls outside what the domain and codec
    /// configuration can represent.
    #[error("value out of range: {0}")]
    Range(String),

    /// A digit was constructed with, or an operation produced, a radix of
    /// zero. This is an internal invariant violation, not a user error.
    #[error("invalid radix {0}: every digit position requires a radix of at least 1")]
    InvalidRadix(u64),
}
