//! Bijective bit-string IDs for finite combinatorial objects.
//!
//! `uqid` assigns every distinct selection from a fixed, totally-ordered
//! domain a unique bit string, and turns that string back into the exact
//! selection. Four kinds of selection are covered, one codec each:
//!
//! - [`SubsetCodec`]: no order, no repetition (a membership bitmask)
//! - [`MultisetCodec`]: no order, with repetition (bounded or unbounded
//!   multiplicity, selected by [`Multiplicity`])
//! - [`PermutationCodec`]: order, no repetition (a Lehmer/factorial code)
//! - [`RepeatingSequenceCodec`]: order, with repetition (fixed-radix
//!   positional code with an embedded terminator, empty-sequence handling
//!   selected by [`EmptyPolicy`])
//!
//! All but the subset codec pack their structure into a
//! [`MixedRadixNumber`], a positional numeral whose positions may each have
//! their own radix, and convert it to bits by repeated halving.
//!
//! Codecs are immutable after construction and every call works on its own
//! digit chain, so a codec can be shared freely across threads.
//!
//! # Example
//!
//! ```rust
//! use uqid::{GroupCodec, SubsetCodec};
//!
//! let codec = SubsetCodec::new(vec!['x', 'y', 'z']).unwrap();
//!
//! let bits = codec.encode(&['x', 'z']).unwrap();
//! assert_eq!(bits, vec![true, false, true]);
//!
//! let group = codec.decode(&bits).unwrap();
//! assert_eq!(group, vec!['x', 'z']);
//! ```
//!
//! # Capacity
//!
//! Encodings are compact in the counting sense: a subset codec over `n`
//! items produces exactly `2^n` distinct strings, one per subset; a bounded
//! multiset codec with cap `M` enumerates `(M+1)^n` count tables; the
//! factorial code enumerates partial permutations. Only the order the
//! domain sorts to matters — the order items were supplied in does not.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod digits;
mod domain;
mod error;
mod multiset;
mod permutation;
mod sequence;
mod subset;
mod traits;

pub use digits::MixedRadixNumber;
pub use domain::DomainCatalog;
pub use error::{CodecError, Result};
pub use multiset::{MultisetCodec, Multiplicity};
pub use permutation::PermutationCodec;
pub use sequence::{EmptyPolicy, RepeatingSequenceCodec};
pub use subset::SubsetCodec;
pub use traits::GroupCodec;
