use std::collections::HashSet;

use crate::model::{DeriveField, DeriveRecord, DeriveValue};
use quote::ToTokens;
use syn::ext::IdentExt;

impl TryFrom<syn::DeriveInput> for DeriveRecord {
    type Error = syn::Error;

    fn try_from(value: syn::DeriveInput) -> Result<Self, Self::Error> {
        if !value.generics.params.is_empty() {
            return Err(syn::Error::new(
                value.ident.span(),
                "Invalid - record cannot be generic.",
            ));
        }

        let fields = match &value.data {
            syn::Data::Struct(syn::DataStruct {
                fields: syn::Fields::Named(fields),
                ..
            }) => fields
                .named
                .iter()
                .map(DeriveField::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            syn::Data::Struct(syn::DataStruct {
                fields: syn::Fields::Unit,
                ..
            }) => Vec::default(),
            _ => {
                return Err(syn::Error::new(
                    value.ident.span(),
                    "Invalid - record must be a struct with named fields.",
                ));
            }
        };

        let mut keys = HashSet::new();

        for field in &fields {
            if !keys.insert(field.key.as_str()) {
                return Err(syn::Error::new(
                    field.field_name.span(),
                    format!("Invalid - record key '{}' is repeated.", field.key),
                ));
            }
        }

        Ok(DeriveRecord {
            struct_name: value.ident.clone(),
            fields,
        })
    }
}

impl TryFrom<&syn::Field> for DeriveField {
    type Error = syn::Error;

    fn try_from(value: &syn::Field) -> Result<Self, Self::Error> {
        let field_name = value
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new_spanned(value, "Invalid - field must be named."))?;
        let mut key = field_name.unraw().to_string();

        for attribute in &value.attrs {
            if attribute.path().is_ident("record") {
                if let Some(k) = load_key(attribute)? {
                    key = k;
                }
            }
        }

        Ok(DeriveField {
            field_name,
            key,
            field_type: DeriveValue {
                tokens: value.ty.to_token_stream(),
            },
        })
    }
}

fn load_key(attribute: &syn::Attribute) -> Result<Option<String>, syn::Error> {
    let attributes_parser =
        syn::punctuated::Punctuated::<syn::Expr, syn::Token![,]>::parse_terminated;
    let mut key = None;

    for expression in attribute.parse_args_with(attributes_parser)? {
        match expression {
            syn::Expr::Assign(assignment) if is_key(&assignment.left) => {
                match *assignment.right {
                    syn::Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Str(literal),
                        ..
                    }) => {
                        key.replace(literal.value());
                    }
                    other => {
                        return Err(syn::Error::new_spanned(
                            other,
                            "Invalid - `key` must be a string literal.",
                        ));
                    }
                }
            }
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "Invalid - unknown record attribute.",
                ));
            }
        }
    }

    Ok(key)
}

fn is_key(expression: &syn::Expr) -> bool {
    match expression {
        syn::Expr::Path(path) => path.path.is_ident("key"),
        _ => false,
    }
}
