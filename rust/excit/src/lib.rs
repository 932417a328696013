//! Composable index iterators.
//!
//! An iterator enumerates a multi-dimensional index space: every element has a
//! rank in `0..size` and [`dimension`](Excit::dimension) integer coordinates.
//! Leaf kinds ([`Range`], [`Index`], [`Hilbert2d`]) generate coordinates
//! directly; combinators ([`Product`], [`Composition`], [`Cons`], [`Repeat`],
//! [`Loop`], [`Tleaf`]) derive a new space from the iterators they own.
//! Any iterator can be split into independent pieces that jointly cover its
//! space, which is how work gets partitioned across workers.
//!
//! ```
//! use excit::{Excit, Step};
//!
//! let mut grid = Excit::product();
//! grid.product_add(Excit::range(0, 1, 1)?)?;
//! grid.product_add(Excit::range(0, 2, 1)?)?;
//!
//! let mut out = [0; 2];
//! assert_eq!(grid.next(&mut out)?, Step::Yielded);
//! assert_eq!(out, [0, 0]);
//! assert_eq!(grid.size()?, 6);
//! # Ok::<(), excit::Error>(())
//! ```

pub mod blueprint;
pub mod composition;
pub mod cons;
pub mod handle;
pub mod hilbert2d;
pub mod index;
pub mod kind;
pub mod looping;
pub mod ops;
pub mod product;
pub mod range;
pub mod repeat;
pub mod ring_buffer;
pub mod tleaf;

#[cfg(test)]
mod tests;

pub use blueprint::Blueprint;
pub use composition::Composition;
pub use cons::Cons;
pub use excit_common::{Error, ErrorKind, Result};
pub use handle::{Coordinates, Excit};
pub use hilbert2d::{Hilbert2d, d2xy, xy2d};
pub use index::Index;
pub use kind::Kind;
pub use looping::Loop;
pub use ops::{Coords, IndexIterator, Step, coords};
pub use product::Product;
pub use range::Range;
pub use repeat::Repeat;
pub use ring_buffer::RingBuffer;
pub use tleaf::{Tleaf, TleafBuilder, TraversalPolicy};
