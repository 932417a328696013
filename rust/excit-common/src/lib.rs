//! Core definitions (error taxonomy, result helpers and macros), relied upon by all excit-* crates.

pub mod error;
pub mod macros;
pub mod result;

pub use error::{Error, ErrorKind};
pub use result::Result;
