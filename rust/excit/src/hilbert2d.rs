//! Two-dimensional Hilbert curve leaf iterator.

use excit_common::{Error, Result, verify_arg};

use crate::{
    Excit, Kind,
    ops::{IndexIterator, Step},
    range::Range,
};

/// Largest supported curve order; `side²` must stay representable as `i64`.
pub const MAX_ORDER: u32 = 31;

/// Rotates/flips a quadrant of side `n`.
fn rot(n: i64, x: &mut i64, y: &mut i64, rx: i64, ry: i64) {
    if ry == 0 {
        if rx == 1 {
            *x = n - 1 - *x;
            *y = n - 1 - *y;
        }
        std::mem::swap(x, y);
    }
}

/// Distance along the curve of the point `(x, y)` in a `side × side` square.
///
/// `side` is a power of two and both coordinates lie in `0..side`.
pub fn xy2d(side: i64, mut x: i64, mut y: i64) -> i64 {
    let mut d = 0;
    let mut s = side / 2;
    while s > 0 {
        let rx = i64::from((x & s) > 0);
        let ry = i64::from((y & s) > 0);
        d += s * s * ((3 * rx) ^ ry);
        rot(s, &mut x, &mut y, rx, ry);
        s /= 2;
    }
    d
}

/// Point at distance `d` along the curve in a `side × side` square.
pub fn d2xy(side: i64, d: i64) -> (i64, i64) {
    let (mut x, mut y) = (0, 0);
    let mut t = d;
    let mut s = 1;
    while s < side {
        let rx = 1 & (t / 2);
        let ry = 1 & (t ^ rx);
        rot(s, &mut x, &mut y, rx, ry);
        x += s * rx;
        y += s * ry;
        t /= 4;
        s *= 2;
    }
    (x, y)
}

/// Visits the points of a `2^order × 2^order` square along the Hilbert curve.
///
/// The cursor and the splittable state are those of an inner [`Range`] over
/// curve distances.
#[derive(Debug, Clone)]
pub struct Hilbert2d {
    order: u32,
    side: i64,
    range: Range,
}

impl Hilbert2d {
    pub fn new(order: u32) -> Result<Hilbert2d> {
        verify_arg!(order, (1..=MAX_ORDER).contains(&order));
        let side = 1i64 << order;
        let range = Range::new(0, side * side - 1, 1)?;
        Ok(Hilbert2d { order, side, range })
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn side(&self) -> i64 {
        self.side
    }

    fn decode(&self, d: i64, out: &mut [i64]) {
        let (x, y) = d2xy(self.side, d);
        out[0] = x;
        out[1] = y;
    }
}

impl IndexIterator for Hilbert2d {
    fn kind(&self) -> Kind {
        Kind::Hilbert2d
    }

    fn dimension(&self) -> usize {
        2
    }

    fn duplicate(&self) -> Box<dyn IndexIterator> {
        Box::new(self.clone())
    }

    fn peek(&self, out: &mut [i64]) -> Result<Step> {
        let mut d = [0];
        let step = self.range.peek(&mut d)?;
        if step.is_yielded() {
            self.decode(d[0], out);
        }
        Ok(step)
    }

    fn next(&mut self, out: &mut [i64]) -> Result<Step> {
        let mut d = [0];
        let step = self.range.next(&mut d)?;
        if step.is_yielded() {
            self.decode(d[0], out);
        }
        Ok(step)
    }

    fn rewind(&mut self) -> Result<()> {
        self.range.rewind()
    }

    fn size(&self) -> Result<u64> {
        self.range.size()
    }

    fn unrank(&self, n: u64, out: &mut [i64]) -> Result<()> {
        let mut d = [0];
        self.range.unrank(n, &mut d)?;
        self.decode(d[0], out);
        Ok(())
    }

    fn rank(&self, coords: &[i64]) -> Result<u64> {
        let (x, y) = (coords[0], coords[1]);
        if !(0..self.side).contains(&x) || !(0..self.side).contains(&y) {
            return Err(Error::out_of_domain(
                "coords",
                format!("({x}, {y}) is outside the {0}x{0} square", self.side),
            ));
        }
        let d = xy2d(self.side, x, y);
        self.range.rank(&[d])
    }

    fn pos(&self) -> Result<Option<u64>> {
        self.range.pos()
    }

    fn split(&self, n: usize) -> Result<Vec<Excit>> {
        Ok(self
            .range
            .split_blocks(n)?
            .into_iter()
            .map(|range| {
                Excit::Hilbert2d(Hilbert2d {
                    order: self.order,
                    side: self.side,
                    range,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_is_a_bijection() {
        for order in 1..=4 {
            let side = 1i64 << order;
            for d in 0..side * side {
                let (x, y) = d2xy(side, d);
                assert!((0..side).contains(&x) && (0..side).contains(&y));
                assert_eq!(xy2d(side, x, y), d);
            }
        }
    }

    #[test]
    fn test_order_bounds() {
        assert!(Hilbert2d::new(0).unwrap_err().is_invalid_arg());
        assert!(Hilbert2d::new(MAX_ORDER + 1).unwrap_err().is_invalid_arg());
        let curve = Hilbert2d::new(MAX_ORDER).unwrap();
        assert_eq!(curve.size().unwrap(), 1u64 << 62);
    }
}
