//! Traits which, typically, may be imported without concern: `use argshape::prelude::*`.

/// A flat record assembled from the nested field values of a built [`Program`](crate::Program).
///
/// The `Fields` type is the program's output shape: nested pairs in declaration order, for example
/// `((((), bool), Option<i64>), Vec<String>)`.
// Usually implemented via `#[derive(Record)]`; needs to be imported to implement by hand.
pub trait Record: Sized {
    /// The nested field values this record is assembled from.
    type Fields;

    /// The record's field names, in declaration order.
    const KEYS: &'static [&'static str];

    /// Assemble the record from its nested field values.
    fn from_fields(fields: Self::Fields) -> Self;
}
