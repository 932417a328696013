use crate::{Excit, IndexIterator, Kind, Result, Step, tests::conformance};

/// Squares of `0..count`, supporting everything but `rank` and `split`.
#[derive(Debug, Clone)]
struct Squares {
    count: u64,
    cursor: u64,
}

impl IndexIterator for Squares {
    fn dimension(&self) -> usize {
        1
    }

    fn duplicate(&self) -> Box<dyn IndexIterator> {
        Box::new(self.clone())
    }

    fn peek(&self, out: &mut [i64]) -> Result<Step> {
        if self.cursor >= self.count {
            return Ok(Step::Depleted);
        }
        out[0] = (self.cursor * self.cursor) as i64;
        Ok(Step::Yielded)
    }

    fn next(&mut self, out: &mut [i64]) -> Result<Step> {
        let step = self.peek(out)?;
        if step.is_yielded() {
            self.cursor += 1;
        }
        Ok(step)
    }

    fn rewind(&mut self) -> Result<()> {
        self.cursor = 0;
        Ok(())
    }

    fn size(&self) -> Result<u64> {
        Ok(self.count)
    }

    fn unrank(&self, n: u64, out: &mut [i64]) -> Result<()> {
        if n >= self.count {
            return Err(crate::Error::out_of_domain("n", "past the last square"));
        }
        out[0] = (n * n) as i64;
        Ok(())
    }

    fn pos(&self) -> Result<Option<u64>> {
        Ok((self.cursor < self.count).then_some(self.cursor))
    }
}

/// Forward-only stream without size or random access.
#[derive(Debug, Clone)]
struct Countdown {
    from: i64,
    current: i64,
}

impl IndexIterator for Countdown {
    fn dimension(&self) -> usize {
        1
    }

    fn duplicate(&self) -> Box<dyn IndexIterator> {
        Box::new(self.clone())
    }

    fn next(&mut self, out: &mut [i64]) -> Result<Step> {
        if self.current < 0 {
            return Ok(Step::Depleted);
        }
        out[0] = self.current;
        self.current -= 1;
        Ok(Step::Yielded)
    }

    fn rewind(&mut self) -> Result<()> {
        self.current = self.from;
        Ok(())
    }
}

fn squares(count: u64) -> Excit {
    Excit::user(Squares { count, cursor: 0 })
}

#[test]
fn test_user_kind_conformance() {
    let it = squares(6);
    assert_eq!(it.kind(), Kind::User);
    conformance::check_all(&it);
    assert!(it.rank(&[4]).unwrap_err().is_not_supported());
}

#[test]
fn test_user_kind_splits_by_rank() {
    let pieces = squares(5).split(2).unwrap();
    assert!(pieces.iter().all(|p| p.kind() == Kind::Composition));
    let values = pieces
        .into_iter()
        .flat_map(|mut p| conformance::drain_values(&mut p))
        .collect::<Vec<_>>();
    assert_eq!(values, vec![0, 1, 4, 9, 16]);
}

#[test]
fn test_user_kind_inside_combinators() {
    let mut product = Excit::product();
    product.product_add(squares(3)).unwrap();
    product.product_add(Excit::range(0, 1, 1).unwrap()).unwrap();
    conformance::check_all(&product);

    let mut windows = Excit::cons(squares(4), 2).unwrap();
    let pairs = conformance::drain(&mut windows)
        .into_iter()
        .map(|c| (c[0], c[1]))
        .collect::<Vec<_>>();
    assert_eq!(pairs, vec![(0, 1), (1, 4), (4, 9)]);
}

#[test]
fn test_user_kind_duplicate_keeps_cursor() {
    let mut it = squares(4);
    assert!(it.skip().unwrap().is_yielded());
    let mut copy = it.clone();
    assert_eq!(conformance::drain_values(&mut copy), vec![1, 4, 9]);
    assert_eq!(conformance::drain_values(&mut it), vec![1, 4, 9]);
}

#[test]
fn test_minimal_user_kind() {
    let mut it = Excit::user(Countdown { from: 2, current: 2 });
    let mut out = [0];
    assert!(it.peek(&mut out).unwrap_err().is_not_supported());
    assert!(it.size().unwrap_err().is_not_supported());
    assert!(it.split(2).unwrap_err().is_not_supported());
    assert!(it.unrank(0, &mut out).unwrap_err().is_not_supported());
    assert!(it.pos().unwrap_err().is_not_supported());
    assert_eq!(conformance::drain_values(&mut it), vec![2, 1, 0]);
    it.rewind().unwrap();
    assert_eq!(it.skip().unwrap(), Step::Yielded);
    assert!(Excit::cons(it, 2).unwrap_err().is_not_supported());
    assert!(Excit::create(Kind::User).unwrap_err().is_invalid_arg());
}

#[test]
fn test_peekless_user_kind_wraps_late() {
    let mut it = Excit::user(Countdown { from: 2, current: 2 });
    let mut out = [0];
    let mut seen = Vec::new();
    for _ in 0..5 {
        let looped = it.cyclic_next(&mut out).unwrap().unwrap();
        seen.push((out[0], looped));
    }
    assert_eq!(
        seen,
        vec![(2, false), (1, false), (0, false), (2, true), (1, false)]
    );

    let source = Excit::user(Countdown { from: 2, current: 2 });
    let mut looped = Excit::loop_over(source, 2).unwrap();
    assert_eq!(conformance::drain_values(&mut looped), vec![2, 1, 0, 2, 1, 0]);
    assert!(looped.next(&mut out).unwrap().is_depleted());
}
