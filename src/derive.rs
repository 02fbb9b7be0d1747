//! Derive Api for `argshape` records.
//!
//! ### Getting Started
//! A built [`Program`](crate::Program) returns nested pairs, such as `((((), bool), Option<u32>), Vec<String>)`.
//! Instrument a flat struct with `#[derive(Record)]` to receive the same values by name via [`Program::parse_record`](crate::Program::parse_record).
//!
//! ```no_run
#![doc = include_str!("../demos/demo_record.rs")]
//! ```
//!
//! ### Record Configuration
//! * The struct's fields must appear in the same order as the program's declarations.
//! Their types must match the declared shapes, which is checked at compile time.
//! * Each field's key defaults to its name; use `#[record(key = "...")]` when the declared name is not a Rust identifier (ex: `dry-run`).
//! [`Program::ensure_record`](crate::Program::ensure_record) checks the keys against the declared names.
//! * Only plain structs with named fields (or unit structs) may derive a record.

pub use argshape_derive::*;
