//! Builder module for `argshape`.
//! See [documentation root](https://docs.rs/argshape/latest/argshape/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod model;
mod parser;
#[allow(missing_docs)]
pub mod prelude;

pub use api::*;
pub use model::*;
pub use parser::{ConfigError, ParseError, Program};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
