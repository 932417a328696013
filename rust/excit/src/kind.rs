use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag identifying which algorithm owns an iterator's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Range,
    Index,
    Hilbert2d,
    Product,
    Composition,
    Cons,
    Repeat,
    Loop,
    Tleaf,
    User,
}

impl Kind {
    pub const ALL: [Kind; 10] = [
        Kind::Range,
        Kind::Index,
        Kind::Hilbert2d,
        Kind::Product,
        Kind::Composition,
        Kind::Cons,
        Kind::Repeat,
        Kind::Loop,
        Kind::Tleaf,
        Kind::User,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Kind::Range => "range",
            Kind::Index => "index",
            Kind::Hilbert2d => "hilbert2d",
            Kind::Product => "product",
            Kind::Composition => "composition",
            Kind::Cons => "cons",
            Kind::Repeat => "repeat",
            Kind::Loop => "loop",
            Kind::Tleaf => "tleaf",
            Kind::User => "user",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
