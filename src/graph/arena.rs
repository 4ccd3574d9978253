//! `Arena` — a generational slot arena backing vertex and edge records.
//!
//! Implementation details:
//! - Vacant slots form an intrusive free list threaded through `next_free`.
//! - Every slot carries a generation counter that is bumped when the slot is
//!   vacated, so a key issued before a removal never matches a later occupant.
//! - `clear` vacates slots instead of truncating storage, which keeps the
//!   generation history and therefore keeps old keys stale.

/// Sentinel for an empty free list.
const NO_FREE: u32 = u32::MAX;

/// A key into an [`Arena`]: slot index plus the generation it was issued at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct SlotKey {
    index: u32,
    generation: u32,
}

impl SlotKey {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    #[inline]
    pub(crate) const fn index(self) -> u32 {
        self.index
    }

    #[inline]
    pub(crate) const fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Clone)]
enum Entry<T> {
    Occupied { generation: u32, value: T },
    Vacant { generation: u32, next_free: u32 },
}

impl<T> Entry<T> {
    #[inline]
    fn generation(&self) -> u32 {
        match self {
            Entry::Occupied { generation, .. } | Entry::Vacant { generation, .. } => *generation,
        }
    }
}

/// A generational arena.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Entry<T>>,
    free_head: u32,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: NO_FREE,
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a value, reusing the most recently vacated slot if there is one.
    pub(crate) fn insert(&mut self, value: T) -> SlotKey {
        self.len += 1;

        if self.free_head != NO_FREE {
            let idx = self.free_head;
            let entry = &mut self.slots[idx as usize];
            let generation = entry.generation();
            if let Entry::Vacant { next_free, .. } = *entry {
                self.free_head = next_free;
            }
            *entry = Entry::Occupied { generation, value };
            return SlotKey::new(idx, generation);
        }

        let idx = u32::try_from(self.slots.len()).unwrap_or(NO_FREE);
        assert!(idx != NO_FREE, "arena slot space exhausted");
        self.slots.push(Entry::Occupied {
            generation: 0,
            value,
        });
        SlotKey::new(idx, 0)
    }

    pub(crate) fn get(&self, key: SlotKey) -> Option<&T> {
        match self.slots.get(key.index as usize) {
            Some(Entry::Occupied { generation, value }) if *generation == key.generation => {
                Some(value)
            }
            _ => None,
        }
    }

    pub(crate) fn get_mut(&mut self, key: SlotKey) -> Option<&mut T> {
        match self.slots.get_mut(key.index as usize) {
            Some(Entry::Occupied { generation, value }) if *generation == key.generation => {
                Some(value)
            }
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn contains_key(&self, key: SlotKey) -> bool {
        self.get(key).is_some()
    }

    /// Removes the value behind `key`, bumping the slot generation.
    pub(crate) fn remove(&mut self, key: SlotKey) -> Option<T> {
        if !self.contains_key(key) {
            return None;
        }
        let idx = key.index;
        let vacant = Entry::Vacant {
            generation: key.generation.wrapping_add(1),
            next_free: self.free_head,
        };
        let old = std::mem::replace(&mut self.slots[idx as usize], vacant);
        self.free_head = idx;
        self.len -= 1;
        match old {
            Entry::Occupied { value, .. } => Some(value),
            Entry::Vacant { .. } => None,
        }
    }

    /// Vacates every occupied slot. Keys issued before the call stay invalid.
    pub(crate) fn clear(&mut self) {
        for idx in 0..self.slots.len() {
            if let Entry::Occupied { generation, .. } = self.slots[idx] {
                self.slots[idx] = Entry::Vacant {
                    generation: generation.wrapping_add(1),
                    next_free: self.free_head,
                };
                // Slot count is bounded by `insert`.
                self.free_head = idx as u32;
            }
        }
        self.len = 0;
    }

    /// Iterates occupied slots in slot order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (SlotKey, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, entry)| match entry {
            Entry::Occupied { generation, value } => {
                Some((SlotKey::new(idx as u32, *generation), value))
            }
            Entry::Vacant { .. } => None,
        })
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = SlotKey> + '_ {
        self.iter().map(|(key, _)| key)
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.iter().map(|(_, value)| value)
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_insert_get_remove() {
        let mut arena = Arena::new();
        let a = arena.insert("a");
        let b = arena.insert("b");

        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a), Some(&"a"));
        assert_eq!(arena.remove(a), Some("a"));
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.remove(a), None);
        assert_eq!(arena.get(b), Some(&"b"));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_arena_reused_slot_rejects_old_key() {
        let mut arena = Arena::new();
        let old = arena.insert(1);
        arena.remove(old);

        let new = arena.insert(2);
        assert_eq!(old.index(), new.index());
        assert_ne!(old.generation(), new.generation());
        assert!(arena.get(old).is_none());
        assert_eq!(arena.get(new), Some(&2));
    }

    #[test]
    fn test_arena_clear_keeps_keys_stale() {
        let mut arena = Arena::new();
        let keys: Vec<_> = (0..4).map(|i| arena.insert(i)).collect();
        arena.clear();
        assert!(arena.is_empty());

        let fresh: Vec<_> = (10..14).map(|i| arena.insert(i)).collect();
        for key in keys {
            assert!(!arena.contains_key(key));
        }
        assert_eq!(arena.values().copied().sum::<i32>(), 10 + 11 + 12 + 13);
        assert_eq!(arena.keys().count(), fresh.len());
    }

    #[test]
    fn test_arena_iter_skips_vacant() {
        let mut arena = Arena::new();
        let a = arena.insert('a');
        let b = arena.insert('b');
        let c = arena.insert('c');
        arena.remove(b);

        let seen: Vec<_> = arena.iter().map(|(k, v)| (k, *v)).collect();
        assert_eq!(seen, vec![(a, 'a'), (c, 'c')]);
    }
}
