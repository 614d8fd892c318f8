//! Priority-bucketed subscriber tables.
//!
//! Each tag owns a sparse set of priority buckets. Registration appends to a
//! bucket; traversal scans buckets in ascending priority and each bucket in
//! registration order.

use microform_core::Callback;
use std::collections::{BTreeMap, HashMap};

/// Subscribers of one kind (actions or filters), keyed by tag.
pub struct HookTable<C: ?Sized> {
    tags: HashMap<String, BTreeMap<i32, Vec<Callback<C>>>>,
}

impl<C: ?Sized> HookTable<C> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            tags: HashMap::new(),
        }
    }

    /// Append `callback` to the `priority` bucket of `tag`.
    pub fn add(&mut self, tag: &str, callback: Callback<C>, priority: i32) {
        self.tags
            .entry(tag.to_string())
            .or_default()
            .entry(priority)
            .or_default()
            .push(callback);
    }

    /// Remove every registration of `callback` under `tag`, in any bucket.
    ///
    /// Returns the number of registrations removed.
    pub fn remove(&mut self, tag: &str, callback: &Callback<C>) -> usize {
        let Some(buckets) = self.tags.get_mut(tag) else {
            return 0;
        };
        let mut removed = 0;
        buckets.retain(|_, bucket| {
            let before = bucket.len();
            bucket.retain(|cb| !cb.same(callback));
            removed += before - bucket.len();
            !bucket.is_empty()
        });
        if buckets.is_empty() {
            self.tags.remove(tag);
        }
        removed
    }

    /// Drop all subscribers of `tag`.
    pub fn clear(&mut self, tag: &str) {
        self.tags.remove(tag);
    }

    /// The subscribers of `tag` in dispatch order, copied out of the table.
    pub fn snapshot(&self, tag: &str) -> Vec<Callback<C>> {
        self.tags
            .get(tag)
            .map(|buckets| buckets.values().flatten().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of registrations under `tag`.
    pub fn count(&self, tag: &str) -> usize {
        self.tags
            .get(tag)
            .map_or(0, |buckets| buckets.values().map(Vec::len).sum())
    }

    /// Tags with at least one registration.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }
}

impl<C: ?Sized> Default for HookTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use microform_core::{ActionRef, Callback};

    fn noop() -> ActionRef<String> {
        Callback::action(|_: &String| Ok(()))
    }

    #[test]
    fn snapshot_orders_by_priority_then_insertion() {
        let (a, b, c) = (noop(), noop(), noop());
        let mut table = HookTable::new();
        table.add("t", a.clone(), 5);
        table.add("t", b.clone(), 1);
        table.add("t", c.clone(), 5);

        let order = table.snapshot("t");
        assert_eq!(order.len(), 3);
        assert!(order[0].same(&b));
        assert!(order[1].same(&a));
        assert!(order[2].same(&c));
    }

    #[test]
    fn remove_matches_identity_across_priorities() {
        let (a, b) = (noop(), noop());
        let mut table = HookTable::new();
        table.add("t", a.clone(), 1);
        table.add("t", b.clone(), 1);
        table.add("t", a.clone(), 20);

        assert_eq!(table.remove("t", &a), 2);
        assert_eq!(table.count("t"), 1);
        assert!(table.snapshot("t")[0].same(&b));
    }

    #[test]
    fn remove_unknown_is_noop() {
        let mut table: HookTable<dyn microform_core::Action<String>> = HookTable::new();
        assert_eq!(table.remove("missing", &noop()), 0);
        table.add("t", noop(), 10);
        assert_eq!(table.remove("t", &noop()), 0);
        assert_eq!(table.count("t"), 1);
    }

    #[test]
    fn empty_tags_are_dropped() {
        let a = noop();
        let mut table = HookTable::new();
        table.add("t", a.clone(), 10);
        table.remove("t", &a);
        assert_eq!(table.tags().count(), 0);
        assert!(table.snapshot("t").is_empty());
    }
}
