//! Declarative, serializable description of an iterator graph.

use excit_common::Result;
use serde::{Deserialize, Serialize};

use crate::{Excit, tleaf::TraversalPolicy};

fn default_step() -> i64 {
    1
}

/// Serializable recipe for an [`Excit`] graph.
///
/// ```json
/// { "kind": "cons", "window": 3,
///   "source": { "kind": "range", "first": 0, "last": 4 } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Blueprint {
    Range {
        first: i64,
        last: i64,
        #[serde(default = "default_step")]
        step: i64,
    },
    Index {
        values: Vec<i64>,
    },
    Hilbert2d {
        order: u32,
    },
    Product {
        children: Vec<Blueprint>,
    },
    Composition {
        source: Box<Blueprint>,
        indexer: Box<Blueprint>,
    },
    Cons {
        source: Box<Blueprint>,
        window: usize,
    },
    Repeat {
        source: Box<Blueprint>,
        count: u64,
    },
    Loop {
        source: Box<Blueprint>,
        count: u64,
    },
    Tleaf {
        arities: Vec<u64>,
        #[serde(default)]
        level_indexers: Option<Vec<Blueprint>>,
        #[serde(default)]
        policy: TraversalPolicy,
    },
}

impl Blueprint {
    pub fn from_json(json: &str) -> Result<Blueprint> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Instantiates the described graph, every iterator freshly rewound.
    pub fn build(&self) -> Result<Excit> {
        match self {
            Blueprint::Range { first, last, step } => Excit::range(*first, *last, *step),
            Blueprint::Index { values } => Excit::index(values),
            Blueprint::Hilbert2d { order } => Excit::hilbert2d(*order),
            Blueprint::Product { children } => {
                let mut product = Excit::product();
                for child in children {
                    product.product_add(child.build()?)?;
                }
                Ok(product)
            }
            Blueprint::Composition { source, indexer } => {
                Excit::composition(source.build()?, indexer.build()?)
            }
            Blueprint::Cons { source, window } => Excit::cons(source.build()?, *window),
            Blueprint::Repeat { source, count } => Excit::repeat(source.build()?, *count),
            Blueprint::Loop { source, count } => Excit::loop_over(source.build()?, *count),
            Blueprint::Tleaf {
                arities,
                level_indexers,
                policy,
            } => {
                let indexers = level_indexers
                    .as_ref()
                    .map(|indexers| {
                        indexers
                            .iter()
                            .map(Blueprint::build)
                            .collect::<Result<Vec<_>>>()
                    })
                    .transpose()?;
                Excit::tleaf(arities.len(), arities, indexers, policy.clone())
            }
        }
    }
}
