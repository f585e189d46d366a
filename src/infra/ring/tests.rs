//! Index arithmetic of the reserved-slot ring.
use super::*;

#[test]
/// An N-slot ring fills after N-1 publications.
fn test_fill_to_usable_capacity() {
    let mut ring: RingIndex<4> = RingIndex::new();
    assert!(ring.is_empty());
    for expected in 1..=3 {
        assert!(ring.advance_head());
        assert_eq!(ring.len(), expected);
    }
    assert!(ring.is_full());
    assert!(!ring.advance_head());
    assert_eq!(ring.head(), 3);
    assert_eq!(RingIndex::<4>::USABLE, 3);
}

#[test]
/// Indices wrap around and length stays consistent.
fn test_wraparound() {
    let mut ring: RingIndex<3> = RingIndex::new();
    for _ in 0..10 {
        assert!(ring.advance_head());
        assert!(ring.advance_head());
        assert!(ring.is_full());
        assert!(ring.advance_tail());
        assert!(ring.advance_tail());
        assert!(ring.is_empty());
        assert!(ring.head() < 3 && ring.tail() < 3);
    }
}

#[test]
/// Consuming an empty ring is refused.
fn test_empty_tail_stays() {
    let mut ring: RingIndex<2> = RingIndex::new();
    assert!(!ring.advance_tail());
    assert_eq!(ring.tail(), 0);
}
