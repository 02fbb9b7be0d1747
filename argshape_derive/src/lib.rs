extern crate proc_macro;

mod generate;
mod load;
mod model;

use crate::model::DeriveRecord;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;

/// Derive `argshape::prelude::Record` for a struct with named fields.
///
/// Fields must appear in the same order as the program's declarations.
/// Each field's key defaults to its name; override it with `#[record(key = "dry-run")]`.
#[proc_macro_derive(Record, attributes(record))]
pub fn record(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as syn::DeriveInput);

    match DeriveRecord::try_from(ast) {
        Ok(record) => TokenStream2::from(record).into(),
        Err(error) => error.to_compile_error().into(),
    }
}
