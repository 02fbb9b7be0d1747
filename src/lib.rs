//! `argshape` is a declarative command line program builder for Rust.
//!
//! Programs are declared option by option on a [`ProgramBuilder`].
//! Each declaration extends the *shape* of the parse result, so a built [`Program`] returns exactly the declared types:
//! * A [`Flag`] contributes a `bool`.
//! * A [`ValueOption`] contributes a `T` when it is required or defaulted, otherwise an `Option<T>`.
//! * A [`Variadic`] contributes a `Vec<String>` (and may be declared at most once).
//!
//! Mismatches between the declarations and the code consuming the parse result are compile errors, not runtime surprises.
//! The token level work (splitting `--name=value`, grouping short flags, help and version output) is delegated to [`clap`](https://docs.rs/clap).
//!
//! # Usage
//! via builder Api (this page):
//! ```no_run
#![doc = include_str!("../demos/demo_summer.rs")]
//! ```
//!
//! ```console
//! $ summer -h
//! Sum the items.
//!
//! Usage: summer [options] <item>...
//!
//! Arguments:
//!   [item]...
//!
//! Options:
//!   -v, --verbose  Print each item.
//!   -h, --help     Print help
//!   -V, --version  Print version
//!
//! $ summer 1 2 3
//! Sum: 6
//!
//! $ summer 1 two
//! 'two' cannot convert to u32.
//!
//! $ summer --bogus
//! error: unexpected argument '--bogus' found
//!
//! Usage: summer [options] <item>...
//!
//! For more information, try '--help'.
//! ```
//!
//! # Builder Api
//! Start with [`ProgramBuilder::create`], then declare options in the order they should appear in the result.
//!
//! ### Options
//! * [`Flag`]: a boolean switch (ex: `--verbose`).
//! Supplying it on the Cli yields `true`; otherwise its default (`false`, unless configured).
//! * [`ValueOption`]: an option taking a single token (ex: `--num 10`, `--num=10`, `-n 10`).
//! The token is converted by the declared converter; [`ValueOption::parsed`] uses [`std::str::FromStr`].
//! When supplied more than once, the last occurrence wins.
//! * [`Variadic`]: collects the positional tokens, in order.
//! Marking it required only changes the usage text (`<name>...` rather than `[name]...`); an empty capture is still accepted.
//!
//! ### Result shape
//! The result is a chain of nested pairs in declaration order: `((((), A), B), C)`.
//! Destructure it directly, or assemble a flat struct via the [derive Api](./derive/index.html).
//!
//! ```
//! use argshape::{Flag, ProgramBuilder, ValueOption};
//!
//! let program = ProgramBuilder::create("my-app", "1.0.0")
//!     .option(Flag::new("bool", "this is a boolean"))
//!     .option(ValueOption::<i64>::parsed("num", "this is a number").default(3))
//!     .build();
//!
//! let (((), bool), num) = program.parse(&["--bool"]).unwrap();
//! assert!(bool);
//! assert_eq!(num, 3);
//! ```
//!
//! ### Failures
//! * Mistakes in the declarations (ex: two options sharing a name) are reported by [`ProgramBuilder::build_parser`] as a [`ConfigError`].
//! [`ProgramBuilder::build`] prints the error and exits the process instead.
//! * Problems the engine detects in the Cli input (ex: a missing required option, an unknown flag) are printed with a usage message.
//! [`Program::parse`] exits with status `2` for these, while [`Program::try_parse`] returns them as a [`ParseError::Exit`].
//! Help and version requests behave the same way, with status `0`.
//! * Converter failures are returned to the caller as an [`InvalidCapture`].
//!
//! # Features
//! * `tracing_debug`: emit `tracing::debug!` events while building and parsing.
//! * `unit_test`: expose `ProgramBuilder::test_dummy`, a placeholder builder for unit testing functions that declare options.

pub mod derive;
pub use argshape_builder::*;
