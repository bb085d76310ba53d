//! Struct-level `#[orm(table = "..", schema = "..")]` attribute.

use crate::sql_ident::parse_sql_ident;
use syn::{DeriveInput, LitStr, Result};

pub(super) struct TableAttr {
    pub table: String,
    pub schema: Option<String>,
}

#[derive(Default)]
struct RawTableAttr {
    table: Option<LitStr>,
    schema: Option<LitStr>,
}

impl syn::parse::Parse for RawTableAttr {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut out = RawTableAttr::default();

        while !input.is_empty() {
            let ident: syn::Ident = input.parse()?;
            let _: syn::Token![=] = input.parse()?;
            let value: LitStr = input.parse()?;

            if ident == "table" {
                out.table = Some(value);
            } else if ident == "schema" {
                out.schema = Some(value);
            } else {
                return Err(syn::Error::new(
                    ident.span(),
                    format!("unknown attribute `{ident}`, expected `table` or `schema`"),
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

pub(super) fn table_attr(input: &DeriveInput) -> Result<TableAttr> {
    let mut raw = RawTableAttr::default();
    for attr in &input.attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }
        let parsed: RawTableAttr = attr.parse_args()?;
        if parsed.table.is_some() {
            raw.table = parsed.table;
        }
        if parsed.schema.is_some() {
            raw.schema = parsed.schema;
        }
    }

    let Some(table) = raw.table else {
        return Err(syn::Error::new_spanned(
            input,
            "Record requires #[orm(table = \"table_name\")] attribute",
        ));
    };

    Ok(TableAttr {
        table: parse_sql_ident(&table, "table")?,
        schema: raw
            .schema
            .map(|lit| parse_sql_ident(&lit, "schema"))
            .transpose()?,
    })
}
