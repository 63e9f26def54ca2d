//! Implementation of the `#[derive(Hashable)]` macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Fields, Index, LitStr, Member, parse_macro_input,
};

const DEFAULT_SEPARATOR: &str = " ";

/// Main implementation of the Hashable derive macro.
pub fn derive_hashable_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let expanded = match &input.data {
        Data::Struct(data_struct) => match separator(&input.attrs) {
            Ok(separator) => generate_hashable(&input, &data_struct.fields, &separator),
            Err(error) => error.to_compile_error(),
        },
        Data::Enum(_) => syn::Error::new_spanned(
            &input.ident,
            "Hashable can only be derived for structs; implement it by hand for enums.",
        )
        .to_compile_error(),
        Data::Union(_) => {
            syn::Error::new_spanned(&input.ident, "Hashable cannot be derived for unions.")
                .to_compile_error()
        }
    };

    TokenStream::from(expanded)
}

/// Reads `#[hashable(separator = "...")]`, defaulting to a single space.
fn separator(attributes: &[Attribute]) -> syn::Result<String> {
    let mut separator = DEFAULT_SEPARATOR.to_owned();
    for attribute in attributes.iter().filter(|attribute| attribute.path().is_ident("hashable")) {
        attribute.parse_nested_meta(|meta| {
            if meta.path.is_ident("separator") {
                let value: LitStr = meta.value()?.parse()?;
                separator = value.value();
                Ok(())
            } else {
                Err(meta.error("unsupported hashable option, expected `separator`"))
            }
        })?;
    }
    Ok(separator)
}

/// Selects the fields marked `#[hash]`, or every field when none is marked.
fn hashed_members(fields: &Fields) -> Vec<Member> {
    let members: Vec<(Member, bool)> = fields
        .iter()
        .enumerate()
        .map(|(position, field)| {
            let member = field.ident.clone().map_or_else(
                || Member::Unnamed(Index::from(position)),
                Member::Named,
            );
            let marked = field.attrs.iter().any(|attribute| attribute.path().is_ident("hash"));
            (member, marked)
        })
        .collect();

    let any_marked = members.iter().any(|(_, marked)| *marked);
    members
        .into_iter()
        .filter(|(_, marked)| *marked || !any_marked)
        .map(|(member, _)| member)
        .collect()
}

fn generate_hashable(input: &DeriveInput, fields: &Fields, separator: &str) -> TokenStream2 {
    let name = &input.ident;
    let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();
    let members = hashed_members(fields);

    let body = if members.is_empty() {
        let type_name = name.to_string();
        quote! {
            ::hashstream::hash::HashCode::from(#type_name)
        }
    } else {
        quote! {
            let parts = [
                #(::std::string::ToString::to_string(&self.#members)),*
            ];
            ::hashstream::hash::HashCode::from(parts.join(#separator))
        }
    };

    quote! {
        impl #impl_generics ::hashstream::hash::Hashable for #name #type_generics #where_clause {
            fn hash(&self) -> ::hashstream::hash::HashCode {
                #body
            }
        }
    }
}
