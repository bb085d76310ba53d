use proc_macro2::Span;
use syn::{Error, LitStr, Result};

pub(crate) fn is_valid_sql_ident(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub(crate) fn parse_sql_ident(lit: &LitStr, what: &str) -> Result<String> {
    parse_sql_ident_with_span(&lit.value(), lit.span(), what)
}

pub(crate) fn parse_sql_ident_with_span(s: &str, span: Span, what: &str) -> Result<String> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::new(span, format!("{what} must not be empty")));
    }
    if !is_valid_sql_ident(s) {
        return Err(Error::new(
            span,
            format!("{what} must be a valid SQL identifier (expected [A-Za-z_][A-Za-z0-9_]*)"),
        ));
    }
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        assert!(is_valid_sql_ident("author"));
        assert!(is_valid_sql_ident("_first_name2"));
    }

    #[test]
    fn rejects_everything_else() {
        assert!(!is_valid_sql_ident(""));
        assert!(!is_valid_sql_ident("2fast"));
        assert!(!is_valid_sql_ident("first name"));
        assert!(!is_valid_sql_ident("author;--"));
    }

    #[test]
    fn trims_and_reports_what() {
        let ok = parse_sql_ident_with_span(" book ", Span::call_site(), "table").unwrap();
        assert_eq!(ok, "book");
        let err = parse_sql_ident_with_span("", Span::call_site(), "table").unwrap_err();
        assert_eq!(err.to_string(), "table must not be empty");
    }
}
