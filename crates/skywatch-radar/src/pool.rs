//! Slot pool: a growable array of entries with a free/used bitset.
//!
//! Released slots keep their data until the next claim overwrites it.
//! Growth only appends, so a claimed index stays valid for as long as the
//! slot is held.

use tracing::debug;

const WORD_BITS: usize = u64::BITS as usize;

#[derive(Debug, Clone)]
pub struct SlotPool<T> {
    slots: Vec<T>,
    /// One bit per slot, set while claimed.
    used: Vec<u64>,
    claimed: usize,
    grow_by: usize,
}

impl<T: Default> SlotPool<T> {
    /// Create a pool with `capacity` free slots that grows by `grow_by`
    /// (at least one) whenever it is full.
    pub fn new(capacity: usize, grow_by: usize) -> Self {
        let mut pool = Self {
            slots: Vec::new(),
            used: Vec::new(),
            claimed: 0,
            grow_by: grow_by.max(1),
        };
        pool.grow(capacity);
        pool
    }

    /// Claim the lowest free slot, growing the pool first if none is free.
    pub fn claim(&mut self) -> usize {
        let index = match self.first_free() {
            Some(index) => index,
            None => {
                let index = self.slots.len();
                self.grow(self.grow_by);
                index
            }
        };
        self.set_used(index, true);
        self.claimed += 1;
        index
    }

    /// Append `n` free slots. Existing slots never move.
    pub fn grow(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let new_len = self.slots.len() + n;
        self.slots.resize_with(new_len, T::default);
        self.used.resize(new_len.div_ceil(WORD_BITS), 0);
        debug!(capacity = new_len, added = n, "slot pool grown");
    }
}

impl<T> SlotPool<T> {
    /// Mark a slot free. Its data is left in place. Returns false if the
    /// index is out of range or already free.
    pub fn release(&mut self, index: usize) -> bool {
        if !self.is_claimed(index) {
            return false;
        }
        self.set_used(index, false);
        self.claimed -= 1;
        true
    }

    /// Mark every slot free.
    pub fn release_all(&mut self) {
        self.used.iter_mut().for_each(|word| *word = 0);
        self.claimed = 0;
    }

    pub fn is_claimed(&self, index: usize) -> bool {
        index < self.slots.len() && self.used[index / WORD_BITS] & (1 << (index % WORD_BITS)) != 0
    }

    /// Total slots, claimed or free.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of claimed slots.
    pub fn claimed(&self) -> usize {
        self.claimed
    }

    /// Entry in a claimed slot.
    pub fn get(&self, index: usize) -> Option<&T> {
        if self.is_claimed(index) {
            self.slots.get(index)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if self.is_claimed(index) {
            self.slots.get_mut(index)
        } else {
            None
        }
    }

    /// Raw slot access regardless of claim state.
    pub fn slot(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    /// Iterate claimed slots in index order.
    pub fn iter_claimed(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(move |(index, _)| self.is_claimed(*index))
    }

    fn first_free(&self) -> Option<usize> {
        self.used
            .iter()
            .enumerate()
            .find(|(_, word)| **word != u64::MAX)
            .map(|(w, word)| w * WORD_BITS + (!*word).trailing_zeros() as usize)
            .filter(|index| *index < self.slots.len())
    }

    fn set_used(&mut self, index: usize, used: bool) {
        let mask = 1u64 << (index % WORD_BITS);
        let word = &mut self.used[index / WORD_BITS];
        if used {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }
}
