//! Head/tail index pair for fixed-size circular buffers.
//!
//! One slot is kept free so that `head == tail` always means empty and
//! `head + 1 == tail` (mod N) always means full. With `N` slots at most
//! `N - 1` entries are stored.

/// Index bookkeeping for an `N`-slot ring. Storage lives in the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RingIndex<const N: usize> {
    /// Next slot written by the producer.
    head: usize,
    /// Next slot read by the consumer.
    tail: usize,
}

impl<const N: usize> Default for RingIndex<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RingIndex<N> {
    const _ASSERT_CAPACITY: () = assert!(N > 1, "a ring needs at least two slots");

    /// Number of entries that fit at once (one slot stays reserved).
    pub const USABLE: usize = N - 1;

    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::_ASSERT_CAPACITY;
        Self { head: 0, tail: 0 }
    }

    #[inline]
    const fn wrap(index: usize) -> usize {
        (index + 1) % N
    }

    #[inline]
    pub fn head(&self) -> usize {
        self.head
    }

    #[inline]
    pub fn tail(&self) -> usize {
        self.tail
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        Self::wrap(self.head) == self.tail
    }

    /// Entries currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        (self.head + N - self.tail) % N
    }

    /// Publish the slot at `head`. Returns `false` when full (nothing moves).
    #[inline]
    pub fn advance_head(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        self.head = Self::wrap(self.head);
        true
    }

    /// Release the slot at `tail`. Returns `false` when empty (nothing moves).
    #[inline]
    pub fn advance_tail(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        self.tail = Self::wrap(self.tail);
        true
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
