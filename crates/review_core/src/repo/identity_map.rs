//! Identity map for hydrated reviews.
//!
//! # Invariants
//! - At most one `SharedReview` per id.
//! - Entries leave only through `evict` or `clear`; there is no size bound.

use crate::model::review::{ReviewId, SharedReview};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct IdentityMap {
    entries: HashMap<ReviewId, SharedReview>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns another handle to the cached review, if any.
    pub fn get(&self, id: ReviewId) -> Option<SharedReview> {
        self.entries.get(&id).map(Rc::clone)
    }

    /// Registers `review` under `id`, replacing any previous entry.
    pub fn put(&mut self, id: ReviewId, review: SharedReview) {
        self.entries.insert(id, review);
    }

    /// Removes the entry for `id` and returns it.
    pub fn evict(&mut self, id: ReviewId) -> Option<SharedReview> {
        self.entries.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::IdentityMap;
    use crate::model::review::Review;
    use std::rc::Rc;

    #[test]
    fn get_returns_same_instance() {
        let mut map = IdentityMap::new();
        let review = Review::with_id(1, 2020, "fine", 1).unwrap().into_shared();
        map.put(1, Rc::clone(&review));

        let cached = map.get(1).unwrap();
        assert!(Rc::ptr_eq(&cached, &review));
        assert!(map.get(2).is_none());
    }

    #[test]
    fn evict_removes_entry() {
        let mut map = IdentityMap::new();
        map.put(7, Review::with_id(7, 2020, "x", 1).unwrap().into_shared());

        assert!(map.evict(7).is_some());
        assert!(map.evict(7).is_none());
        assert!(map.is_empty());
    }
}
