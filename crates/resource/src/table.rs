
use std::collections::HashMap;
use std::hash::Hash;

/// RefCountEntry struct
/// A live resource and the number of outstanding references to it. An entry only exists while
/// its count is at least one.
struct RefCountEntry<R> {
    resource: R,
    count: u32
}

/// Release enum
/// Outcome of dropping one reference from a table entry
pub(crate) enum Release<R> {
    Missing,
    Retained(u32),
    Freed(R)
}

/// RefCountTable struct
/// Descriptor to entry map backing a reference-counting manager
pub(crate) struct RefCountTable<D, R> {
    entries: HashMap<D, RefCountEntry<R>>
}

impl<D: Eq + Hash, R: Clone> RefCountTable<D, R> {

    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new()
        }
    }

    /// Takes another reference to an existing entry, if there is one.
    pub(crate) fn acquire(&mut self, descriptor: &D) -> Option<(R, u32)> {
        let entry = self.entries.get_mut(descriptor)?;
        entry.count += 1;
        Some((entry.resource.clone(), entry.count))
    }

    pub(crate) fn insert(&mut self, descriptor: D, resource: R) {
        let previous = self.entries.insert(descriptor, RefCountEntry { resource, count: 1 });
        debug_assert!(previous.is_none(), "Inserted over a live table entry");
    }

    /// Drops one reference; the entry leaves the table when its count reaches zero.
    pub(crate) fn release(&mut self, descriptor: &D) -> Release<R> {
        let Some(entry) = self.entries.get_mut(descriptor) else {
            return Release::Missing;
        };
        if entry.count > 1 {
            entry.count -= 1;
            return Release::Retained(entry.count);
        }
        match self.entries.remove(descriptor) {
            Some(entry) => Release::Freed(entry.resource),
            None => Release::Missing
        }
    }

    pub(crate) fn find(&self, descriptor: &D) -> Option<R> {
        self.entries.get(descriptor).map(|entry| entry.resource.clone())
    }

    pub(crate) fn count(&self, descriptor: &D) -> u32 {
        self.entries.get(descriptor).map_or(0, |entry| entry.count)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Empties the table, yielding every remaining resource once regardless of its count.
    pub(crate) fn drain(&mut self) -> impl Iterator<Item = (D, R)> + '_ {
        self.entries.drain().map(|(descriptor, entry)| (descriptor, entry.resource))
    }
}
