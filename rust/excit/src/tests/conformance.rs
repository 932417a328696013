//! Generic behavior every iterator kind must exhibit.
//!
//! Each check works on clones of a freshly built (rewound) iterator with at
//! least three elements.

use crate::{Coords, Excit, Result, Step, coords};

/// Collects the remaining elements of `it`.
pub fn drain(it: &mut Excit) -> Vec<Coords> {
    it.coordinates().collect::<Result<Vec<_>>>().unwrap()
}

/// Collects the remaining elements of a one-dimensional iterator.
pub fn drain_values(it: &mut Excit) -> Vec<i64> {
    assert_eq!(it.dimension(), 1);
    drain(it).into_iter().map(|c| c[0]).collect()
}

pub fn check_all(it: &Excit) {
    check_skip(it);
    check_size(it);
    check_duplicate(it);
    check_peek(it);
    check_rewind(it);
    check_cyclic_next(it);
    check_pos(it);
    check_unrank(it);
    check_rank(it);
    check_split(it);
}

pub fn check_skip(it: &Excit) {
    let mut a = it.clone();
    let mut b = it.clone();
    let mut buf = coords(it.dimension());
    while a.next(&mut buf).unwrap().is_yielded() {
        assert_eq!(b.skip().unwrap(), Step::Yielded);
    }
    assert_eq!(b.skip().unwrap(), Step::Depleted);
}

pub fn check_size(it: &Excit) {
    let size = match it.size() {
        Err(e) if e.is_not_supported() => return,
        res => res.unwrap(),
    };
    assert_eq!(drain(&mut it.clone()).len() as u64, size);
}

pub fn check_duplicate(it: &Excit) {
    let mut a = it.clone();
    let mut b = it.duplicate();
    assert_eq!(drain(&mut a), drain(&mut b));

    // The cursor travels with the copy, wherever it stands.
    let expected = drain(&mut it.clone());
    let mut c = it.clone();
    for consumed in 0..=expected.len() {
        let mut d = c.duplicate();
        assert_eq!(drain(&mut d), &expected[consumed..], "after {consumed} steps");
        let step = c.skip().unwrap();
        assert_eq!(step.is_yielded(), consumed < expected.len());
    }
}

pub fn check_peek(it: &Excit) {
    let mut a = it.clone();
    let mut b = it.clone();
    let mut x = coords(it.dimension());
    let mut y = coords(it.dimension());
    while a.next(&mut x).unwrap().is_yielded() {
        assert!(b.peek(&mut y).unwrap().is_yielded());
        assert_eq!(x, y);
        assert!(b.next(&mut y).unwrap().is_yielded());
        assert_eq!(x, y);
    }
    assert!(b.peek(&mut y).unwrap().is_depleted());
    assert!(b.next(&mut y).unwrap().is_depleted());
}

pub fn check_rewind(it: &Excit) {
    let expected = drain(&mut it.clone());
    let mut a = it.clone();
    assert_eq!(a.skip().unwrap(), Step::Yielded);
    a.rewind().unwrap();
    assert_eq!(drain(&mut a), expected);
    a.rewind().unwrap();
    assert_eq!(drain(&mut a), expected);
}

pub fn check_cyclic_next(it: &Excit) {
    let mut a = it.clone();
    let mut b = it.clone();
    let mut x = coords(it.dimension());
    let mut y = coords(it.dimension());
    let mut looped = false;
    while a.next(&mut x).unwrap().is_yielded() {
        assert!(!looped);
        looped = b.cyclic_next(&mut y).unwrap().unwrap();
        assert_eq!(x, y);
    }
    assert!(looped);
    assert_eq!(drain(&mut b), drain(&mut it.clone()));
}

pub fn check_pos(it: &Excit) {
    let mut a = it.clone();
    if matches!(a.pos(), Err(ref e) if e.is_not_supported()) {
        return;
    }
    let mut buf = coords(it.dimension());
    let mut expected = 0;
    while a.peek(&mut buf).unwrap().is_yielded() {
        assert_eq!(a.pos().unwrap(), Some(expected));
        assert_eq!(a.skip().unwrap(), Step::Yielded);
        expected += 1;
    }
    assert_eq!(a.pos().unwrap(), None);
}

pub fn check_unrank(it: &Excit) {
    let mut a = it.clone();
    let mut x = coords(it.dimension());
    let mut y = coords(it.dimension());
    if matches!(it.unrank(0, &mut y), Err(ref e) if e.is_not_supported()) {
        return;
    }
    let mut rank = 0;
    while a.next(&mut x).unwrap().is_yielded() {
        it.unrank(rank, &mut y).unwrap();
        assert_eq!(x, y);
        rank += 1;
    }
    assert!(it.unrank(rank, &mut y).unwrap_err().is_out_of_domain());
}

pub fn check_rank(it: &Excit) {
    let mut a = it.clone();
    let mut x = coords(it.dimension());
    assert!(a.peek(&mut x).unwrap().is_yielded());
    if matches!(it.rank(&x), Err(ref e) if e.is_not_supported()) {
        return;
    }
    let mut expected = 0;
    while a.next(&mut x).unwrap().is_yielded() {
        assert_eq!(it.rank(&x).unwrap(), expected);
        expected += 1;
    }
    x.fill(0xDEAD_BEEF_DEAD_BEEF_u64 as i64);
    assert!(it.rank(&x).unwrap_err().is_out_of_domain());
}

pub fn check_split(it: &Excit) {
    assert!(it.split(0).unwrap_err().is_out_of_domain());
    assert!(it.split(0xDEAD_BEEF).unwrap_err().is_out_of_domain());

    let pieces = it.split(3).unwrap();
    assert_eq!(pieces.len(), 3);
    let mut joined = Vec::new();
    for mut piece in pieces {
        assert_eq!(piece.dimension(), it.dimension());
        joined.extend(drain(&mut piece));
    }
    assert_eq!(joined, drain(&mut it.clone()));
}
