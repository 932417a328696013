//! Walks over the leaves of a balanced tree.
//!
//! A tree of `depth` levels (root excluded, leaves included) where every node
//! of level `l` has `arities[l]` children. Leaves are numbered in natural
//! root-to-leaf order: the leaf reached through child `c_l` at every level is
//! `Σ c_l · stride_l` with `stride_l = Π_{j>l} arities[j]`.
//!
//! The walk is a [`Product`] of one iterator per level, arranged by the
//! [`TraversalPolicy`]: the level placed first in the walk varies slowest.
//! A second product, in natural level order, mirrors the first and answers
//! `rank` queries.

use excit_common::{Error, Result, verify_arg, verify_domain};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    Excit, Kind,
    ops::{IndexIterator, Step, checked_size_mul, coords, to_coord, to_rank},
    product::Product,
};

/// Order in which the levels of a [`Tleaf`] are walked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalPolicy {
    /// The leaf-closest level varies fastest: leaves come out as 0, 1, 2, …
    #[default]
    RoundRobin,
    /// The root level varies fastest, spreading consecutive outputs across
    /// top-level subtrees (digit reversal of the leaf number).
    Scatter,
    /// Explicit walk order: `order[k]` is the level at walk position `k`,
    /// position 0 varying slowest. Must be a permutation of `0..depth`.
    User(Vec<usize>),
}

impl TraversalPolicy {
    /// Resolves the walk order for a tree of the given depth.
    pub fn walk_order(&self, depth: usize) -> Result<Vec<usize>> {
        match self {
            TraversalPolicy::RoundRobin => Ok((0..depth).collect()),
            TraversalPolicy::Scatter => Ok((0..depth).rev().collect()),
            TraversalPolicy::User(order) => {
                verify_arg!(order, order.len() == depth);
                let mut seen = vec![false; depth];
                for &level in order {
                    verify_arg!(order, level < depth && !seen[level]);
                    seen[level] = true;
                }
                Ok(order.clone())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tleaf {
    arities: Vec<u64>,
    strides: Vec<u64>,
    /// `order[k]` is the level at walk position `k`.
    order: Vec<usize>,
    policy: TraversalPolicy,
    /// Level iterators in walk order.
    levels: Product,
    /// Level iterators in natural order.
    levels_inverse: Product,
}

impl Tleaf {
    /// Builds a tree iterator.
    ///
    /// `level_indexers`, when given, holds one indexer per level; level `l`
    /// then only visits the children selected by its indexer.
    pub fn new(
        depth: usize,
        arities: &[u64],
        level_indexers: Option<Vec<Excit>>,
        policy: TraversalPolicy,
    ) -> Result<Tleaf> {
        let indexers: Vec<Option<Excit>> = match level_indexers {
            Some(indexers) => {
                verify_arg!(level_indexers, indexers.len() == depth);
                indexers.into_iter().map(Some).collect()
            }
            None => std::iter::repeat_with(|| None).take(depth).collect(),
        };
        Tleaf::with_levels(depth, arities, indexers, policy)
    }

    /// The zero state: a tree without levels.
    pub fn empty() -> Tleaf {
        Tleaf {
            arities: Vec::new(),
            strides: Vec::new(),
            order: Vec::new(),
            policy: TraversalPolicy::RoundRobin,
            levels: Product::new(),
            levels_inverse: Product::new(),
        }
    }

    pub fn builder() -> TleafBuilder {
        TleafBuilder::default()
    }

    fn with_levels(
        depth: usize,
        arities: &[u64],
        indexers: Vec<Option<Excit>>,
        policy: TraversalPolicy,
    ) -> Result<Tleaf> {
        verify_arg!(arities, arities.len() == depth);
        verify_arg!(arities, arities.iter().all(|&a| a != 0));
        let order = policy.walk_order(depth)?;

        let mut strides = vec![0u64; depth];
        let mut stride = 1u64;
        for (level, &arity) in arities.iter().enumerate().rev() {
            strides[level] = stride;
            stride = checked_size_mul(stride, arity)?;
        }
        // Leaf numbers are reported as coordinates.
        to_coord(stride)?;

        let mut natural = Vec::with_capacity(depth);
        for (&arity, indexer) in arities.iter().zip(indexers) {
            let children = Excit::range(0, to_coord(arity)? - 1, 1)?;
            natural.push(match indexer {
                Some(indexer) => Excit::composition(children, indexer)?,
                None => children,
            });
        }

        let mut levels = Product::new();
        for &level in &order {
            levels.add_copy(&natural[level])?;
        }
        let mut levels_inverse = Product::new();
        for level in natural {
            levels_inverse.add(level)?;
        }

        log::debug!("tleaf: arities {arities:?}, walk order {order:?}");
        Ok(Tleaf {
            arities: arities.to_vec(),
            strides,
            order,
            policy,
            levels,
            levels_inverse,
        })
    }

    pub fn depth(&self) -> usize {
        self.arities.len()
    }

    pub fn arities(&self) -> &[u64] {
        &self.arities
    }

    pub fn policy(&self) -> &TraversalPolicy {
        &self.policy
    }

    /// Number of leaves of the full, unrestricted tree.
    fn leaf_count(&self) -> u64 {
        match self.arities.first() {
            Some(&arity) => self.strides[0] * arity,
            None => 0,
        }
    }

    /// Leaf number of the walk coordinates in `walk`.
    fn leaf(&self, walk: &[i64]) -> Result<i64> {
        let mut leaf = 0u64;
        for (&child, &level) in walk.iter().zip(&self.order) {
            leaf += to_rank(child)? * self.strides[level];
        }
        to_coord(leaf)
    }

    /// Splits the children of `level` into `n` contiguous blocks and returns
    /// one tree iterator per block.
    ///
    /// The leaves of each piece are in general not contiguous: only the
    /// outermost walk level yields contiguous blocks of walk ranks.
    pub fn split_at_level(&self, level: usize, n: usize) -> Result<Vec<Tleaf>> {
        verify_domain!(level, level < self.depth());
        verify_domain!(n, n != 0 && self.arities[level] % n as u64 == 0);
        let position = self
            .order
            .iter()
            .position(|&l| l == level)
            .ok_or_else(|| Error::out_of_domain("level", "level missing from the walk order"))?;

        let walk_pieces = self.levels.split_dim(position, n)?;
        let natural_pieces = self.levels_inverse.split_dim(level, n)?;
        log::debug!(
            "tleaf: split level {level} (walk position {position}) into {n} pieces"
        );
        Ok(walk_pieces
            .into_iter()
            .zip_eq(natural_pieces)
            .map(|(levels, levels_inverse)| Tleaf {
                arities: self.arities.clone(),
                strides: self.strides.clone(),
                order: self.order.clone(),
                policy: self.policy.clone(),
                levels,
                levels_inverse,
            })
            .collect())
    }
}

impl IndexIterator for Tleaf {
    fn kind(&self) -> Kind {
        Kind::Tleaf
    }

    fn dimension(&self) -> usize {
        1
    }

    fn duplicate(&self) -> Box<dyn IndexIterator> {
        Box::new(self.clone())
    }

    fn peek(&self, out: &mut [i64]) -> Result<Step> {
        let mut walk = coords(self.depth());
        let step = self.levels.peek(&mut walk)?;
        if step.is_yielded() {
            out[0] = self.leaf(&walk)?;
        }
        Ok(step)
    }

    fn next(&mut self, out: &mut [i64]) -> Result<Step> {
        let mut walk = coords(self.depth());
        let step = self.levels.next(&mut walk)?;
        if step.is_yielded() {
            out[0] = self.leaf(&walk)?;
        }
        Ok(step)
    }

    fn rewind(&mut self) -> Result<()> {
        self.levels.rewind()
    }

    fn size(&self) -> Result<u64> {
        self.levels.size()
    }

    fn unrank(&self, n: u64, out: &mut [i64]) -> Result<()> {
        let mut walk = coords(self.depth());
        self.levels.unrank(n, &mut walk)?;
        out[0] = self.leaf(&walk)?;
        Ok(())
    }

    fn rank(&self, coords: &[i64]) -> Result<u64> {
        let leaf = coords[0];
        let total = self.leaf_count();
        if leaf < 0 || leaf as u64 >= total {
            return Err(Error::out_of_domain(
                "leaf",
                format!("{leaf} is not in 0..{total}"),
            ));
        }
        let leaf = leaf as u64;
        let natural = self
            .arities
            .iter()
            .zip(&self.strides)
            .map(|(&arity, &stride)| to_coord((leaf / stride) % arity))
            .collect::<Result<Vec<_>>>()?;
        let mut rest = self.levels_inverse.rank(&natural)?;

        // Local rank of every level within its (possibly restricted) iterator.
        let children = self.levels_inverse.children();
        let mut local = vec![0u64; self.depth()];
        for (level, child) in children.iter().enumerate().rev() {
            let size = child.size()?;
            local[level] = rest % size;
            rest /= size;
        }

        let walk_children = self.levels.children();
        let mut rank = 0u64;
        for (child, &level) in walk_children.iter().zip(&self.order) {
            rank = rank * child.size()? + local[level];
        }
        Ok(rank)
    }

    fn pos(&self) -> Result<Option<u64>> {
        self.levels.pos()
    }
}

/// Incremental construction of a [`Tleaf`], one level at a time from the
/// root down.
#[derive(Debug, Default)]
pub struct TleafBuilder {
    arities: Vec<u64>,
    indexers: Vec<Option<Excit>>,
    policy: TraversalPolicy,
}

impl TleafBuilder {
    pub fn new() -> TleafBuilder {
        TleafBuilder::default()
    }

    pub fn level(mut self, arity: u64) -> TleafBuilder {
        self.arities.push(arity);
        self.indexers.push(None);
        self
    }

    /// Adds a level whose visited children are selected by `indexer`.
    pub fn level_with_indexer(mut self, arity: u64, indexer: Excit) -> TleafBuilder {
        self.arities.push(arity);
        self.indexers.push(Some(indexer));
        self
    }

    pub fn policy(mut self, policy: TraversalPolicy) -> TleafBuilder {
        self.policy = policy;
        self
    }

    pub fn build(self) -> Result<Tleaf> {
        Tleaf::with_levels(self.arities.len(), &self.arities, self.indexers, self.policy)
    }
}
