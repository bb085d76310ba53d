//! Derive macros for pgrecord
//!
//! Provides `#[derive(FromRow)]` and `#[derive(Record)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod common;
mod from_row;
mod record;
mod sql_ident;

/// Derive `FromRow` for a plain struct.
///
/// # Example
///
/// ```ignore
/// use pgrecord::FromRow;
///
/// #[derive(FromRow)]
/// struct AuthorName {
///     id: i32,
///     #[orm(column = "first_name")]
///     name: Option<String>,
/// }
/// ```
///
/// # Attributes
///
/// - `#[orm(column = "name")]` - Map field to a different column name
#[proc_macro_derive(FromRow, attributes(orm))]
pub fn derive_from_row(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    from_row::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derive `Record` (and `FromRow`) for a struct of `Tracked<T>` fields.
///
/// # Example
///
/// ```ignore
/// use pgrecord::{Record, Tracked};
///
/// #[derive(Debug, Clone, Default, Record)]
/// #[orm(table = "author", schema = "test")]
/// struct Author {
///     #[orm(id)]
///     id: Tracked<Option<i32>>,
///     first_name: Tracked<Option<String>>,
///     last_name: Tracked<String>,
/// }
/// ```
///
/// # Generated
///
/// - `impl Record` with `TABLE` metadata and field access by index
/// - `impl FromRow` reading every field by column name
/// - `Author::FIRST_NAME: Column` per field, for building conditions
/// - `first_name(&self) -> &T` and `set_first_name(&mut self, T)` per field
///
/// # Attributes
///
/// - `#[orm(table = "name")]` - Table name (required)
/// - `#[orm(schema = "name")]` - Schema name
/// - `#[orm(id)]` - Mark field as (part of) the primary key
/// - `#[orm(column = "name")]` - Map field to a different column name
#[proc_macro_derive(Record, attributes(orm))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
