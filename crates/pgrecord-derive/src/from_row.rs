//! FromRow derive macro implementation

use crate::common::attrs::{column_name, field_attr};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Result};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "FromRow can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "FromRow can only be derived for structs",
            ));
        }
    };

    let mut field_extracts = Vec::with_capacity(fields.len());
    for field in fields {
        let attr = field_attr(field)?;
        if attr.is_id {
            return Err(syn::Error::new_spanned(
                field,
                "#[orm(id)] is only meaningful on #[derive(Record)]",
            ));
        }
        let column = column_name(field, &attr)?;
        let field_name = &field.ident;
        field_extracts.push(quote! {
            #field_name: row.try_get_column(#column)?
        });
    }

    Ok(quote! {
        impl #impl_generics ::pgrecord::FromRow for #name #ty_generics #where_clause {
            fn from_row(
                row: &::pgrecord::tokio_postgres::Row,
            ) -> ::pgrecord::RecordResult<Self> {
                use ::pgrecord::RowExt;
                ::core::result::Result::Ok(Self {
                    #(#field_extracts),*
                })
            }
        }
    })
}
