use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

use crate::model::DeriveRecord;

impl From<DeriveRecord> for TokenStream2 {
    fn from(value: DeriveRecord) -> Self {
        let DeriveRecord {
            struct_name,
            fields,
        } = value;
        // Both the type and the pattern nest left: `((((), A), B), C)`.
        let mut fields_type = quote! { () };
        let mut fields_pattern = quote! { () };

        for field in &fields {
            let field_type = &field.field_type.tokens;
            let field_name = &field.field_name;
            fields_type = quote! { (#fields_type, #field_type) };
            fields_pattern = quote! { (#fields_pattern, #field_name) };
        }

        let keys = fields.iter().map(|f| &f.key);
        let field_names = fields.iter().map(|f| &f.field_name);

        quote! {
            impl ::argshape::prelude::Record for #struct_name {
                type Fields = #fields_type;
                const KEYS: &'static [&'static str] = &[#( #keys ),*];

                fn from_fields(fields: Self::Fields) -> Self {
                    let #fields_pattern = fields;
                    #struct_name { #( #field_names ),* }
                }
            }
        }
    }
}
