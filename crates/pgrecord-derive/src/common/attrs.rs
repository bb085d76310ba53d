//! Field-level `#[orm(...)]` attributes.
//!
//! Supports `#[orm(id)]`, `#[orm(column = "name")]` and both combined.

use crate::sql_ident::parse_sql_ident;
use syn::{Field, LitStr, Result};

/// Parsed field attributes.
#[derive(Default)]
pub struct FieldAttr {
    pub is_id: bool,
    pub column: Option<LitStr>,
}

impl syn::parse::Parse for FieldAttr {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut out = FieldAttr::default();

        while !input.is_empty() {
            let ident: syn::Ident = input.parse()?;
            if ident == "id" {
                out.is_id = true;
            } else if ident == "column" {
                let _: syn::Token![=] = input.parse()?;
                out.column = Some(input.parse()?);
            } else {
                return Err(syn::Error::new(
                    ident.span(),
                    format!("unknown field attribute `{ident}`, expected `id` or `column = \"..\"`"),
                ));
            }

            if input.is_empty() {
                break;
            }
            let _: syn::Token![,] = input.parse()?;
        }

        Ok(out)
    }
}

/// Merge every `#[orm(...)]` attribute on `field`.
pub fn field_attr(field: &Field) -> Result<FieldAttr> {
    let mut out = FieldAttr::default();
    for attr in &field.attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }
        let parsed: FieldAttr = attr.parse_args()?;
        out.is_id |= parsed.is_id;
        if parsed.column.is_some() {
            out.column = parsed.column;
        }
    }
    Ok(out)
}

/// The column a field maps to: `#[orm(column = "..")]` or the field name.
pub fn column_name(field: &Field, attr: &FieldAttr) -> Result<String> {
    match &attr.column {
        Some(lit) => parse_sql_ident(lit, "column"),
        None => {
            let ident = field
                .ident
                .as_ref()
                .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
            Ok(ident.to_string().trim_start_matches("r#").to_string())
        }
    }
}
