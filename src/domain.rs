//! The shared, canonically sorted item domain.

use crate::error::{CodecError, Result};

/// The fixed, duplicate-free universe a codec encodes selections from.
///
/// Items are stored sorted ascending; the sorted position is the canonical
/// index every codec maps items to and from. Immutable after construction,
/// so a catalog (and any codec built on one) can be shared across threads.
#[derive(Debug, Clone)]
pub struct DomainCatalog<T> {
    ordered: Vec<T>,
}

impl<T: Ord + Clone> DomainCatalog<T> {
    /// Build a catalog from a collection of items.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::DuplicateDomainItem`] if any two items compare
    /// equal; a domain with equal items would give two inputs the same
    /// encoding.
    pub fn new<I: IntoIterator<Item = T>>(items: I) -> Result<Self> {
        let mut ordered: Vec<T> = items.into_iter().collect();
        ordered.sort();
        if ordered.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(CodecError::DuplicateDomainItem);
        }
        Ok(Self { ordered })
    }

    /// The items in canonical (ascending) order.
    pub fn items(&self) -> &[T] {
        &self.ordered
    }

    /// Number of items in the domain.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// True when the domain holds no items.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// The item at canonical position `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.ordered.get(index)
    }

    /// Canonical position of `item`, if it is part of the domain.
    /// O(log n) binary search over the sorted items.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.ordered.binary_search(item).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorts_supplied_items() {
        let catalog = DomainCatalog::new(vec!['c', 'a', 'b']).unwrap();
        assert_eq!(catalog.items(), &['a', 'b', 'c']);
        assert_eq!(catalog.index_of(&'b'), Some(1));
        assert_eq!(catalog.index_of(&'z'), None);
    }

    #[test]
    fn test_rejects_duplicates() {
        let result = DomainCatalog::new(vec![1, 2, 1]);
        assert!(matches!(result, Err(CodecError::DuplicateDomainItem)));
    }

    #[test]
    fn test_empty_domain_is_allowed() {
        let catalog = DomainCatalog::<u32>::new(vec![]).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }
}
