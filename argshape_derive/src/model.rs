use proc_macro2::TokenStream as TokenStream2;

#[derive(Debug)]
pub struct DeriveValue {
    pub tokens: TokenStream2,
}

impl PartialEq for DeriveValue {
    fn eq(&self, other: &Self) -> bool {
        let st = &self.tokens.to_string();
        let ot = &other.tokens.to_string();
        st == ot
    }
}

impl Eq for DeriveValue {}

#[derive(Debug, PartialEq, Eq)]
pub struct DeriveField {
    pub field_name: syn::Ident,
    pub key: String,
    pub field_type: DeriveValue,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DeriveRecord {
    pub struct_name: syn::Ident,
    pub fields: Vec<DeriveField>,
}
