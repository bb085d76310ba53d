//! Record derive macro implementation

mod attrs;

use crate::common::attrs::{column_name, field_attr};
use crate::common::syn_types::tracked_inner;
use heck::ToShoutySnakeCase;
use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, Result};

struct RecordField<'a> {
    ident: &'a syn::Ident,
    inner: &'a syn::Type,
    column: String,
    is_id: bool,
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Record can only be derived for structs",
            ));
        }
    };

    let table_attr = attrs::table_attr(&input)?;
    let table = &table_attr.table;
    let schema = match &table_attr.schema {
        Some(s) => quote! { ::core::option::Option::Some(#s) },
        None => quote! { ::core::option::Option::None },
    };

    let mut record_fields = Vec::with_capacity(fields.len());
    for field in fields {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
        let inner = tracked_inner(&field.ty).ok_or_else(|| {
            syn::Error::new_spanned(&field.ty, "Record fields must be of type Tracked<T>")
        })?;
        let attr = field_attr(field)?;
        let column = column_name(field, &attr)?;
        if record_fields
            .iter()
            .any(|f: &RecordField<'_>| f.column == column)
        {
            return Err(syn::Error::new_spanned(
                field,
                format!("duplicate column '{column}'"),
            ));
        }
        record_fields.push(RecordField {
            ident,
            inner,
            column,
            is_id: attr.is_id,
        });
    }

    let columns: Vec<&str> = record_fields.iter().map(|f| f.column.as_str()).collect();
    let pk_indices: Vec<usize> = record_fields
        .iter()
        .enumerate()
        .filter(|(_, f)| f.is_id)
        .map(|(i, _)| i)
        .collect();
    let primary_key = if pk_indices.is_empty() {
        quote! { ::core::option::Option::None }
    } else {
        quote! { ::core::option::Option::Some(&[#(#pk_indices),*]) }
    };

    let indices: Vec<usize> = (0..record_fields.len()).collect();
    let idents: Vec<&syn::Ident> = record_fields.iter().map(|f| f.ident).collect();

    let mut accessors = Vec::with_capacity(record_fields.len());
    for f in &record_fields {
        let ident = f.ident;
        let inner = f.inner;
        let column = &f.column;
        let field_name = ident.to_string().trim_start_matches("r#").to_string();

        let const_name = field_name.to_shouty_snake_case();
        if const_name == "TABLE" {
            return Err(syn::Error::new_spanned(
                ident,
                "a field named `table` would shadow Record::TABLE; rename it and use #[orm(column = \"table\")]",
            ));
        }
        let const_ident = syn::Ident::new(&const_name, Span::call_site());
        let setter = format_ident!("set_{}", field_name);
        let const_doc = format!("The `{column}` column.");

        accessors.push(quote! {
            #[doc = #const_doc]
            pub const #const_ident: ::pgrecord::Column =
                ::pgrecord::Column::new(#schema, #table, #column);

            pub fn #ident(&self) -> &#inner {
                self.#ident.get()
            }

            pub fn #setter(&mut self, value: #inner) {
                self.#ident.set(value);
            }
        });
    }

    let from_row_fields = record_fields.iter().map(|f| {
        let ident = f.ident;
        let column = &f.column;
        quote! {
            #ident: ::pgrecord::Tracked::new(row.try_get_column(#column)?)
        }
    });

    Ok(quote! {
        impl #impl_generics ::pgrecord::Record for #name #ty_generics #where_clause {
            const TABLE: ::pgrecord::Table = ::pgrecord::Table {
                schema: #schema,
                name: #table,
                fields: &[#(#columns),*],
                primary_key: #primary_key,
            };

            fn field(&self, index: usize) -> ::core::option::Option<&dyn ::pgrecord::FieldState> {
                match index {
                    #(#indices => ::core::option::Option::Some(&self.#idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn ::pgrecord::FieldState> {
                match index {
                    #(#indices => ::core::option::Option::Some(&mut self.#idents),)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #impl_generics ::pgrecord::FromRow for #name #ty_generics #where_clause {
            fn from_row(
                row: &::pgrecord::tokio_postgres::Row,
            ) -> ::pgrecord::RecordResult<Self> {
                use ::pgrecord::RowExt;
                ::core::result::Result::Ok(Self {
                    #(#from_row_fields),*
                })
            }
        }

        impl #impl_generics #name #ty_generics #where_clause {
            #(#accessors)*
        }
    })
}
