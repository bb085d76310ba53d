//! SQL identifier quoting.
//!
//! Identifiers are always emitted double-quoted, with embedded `"` doubled,
//! so that mixed-case and reserved names survive round trips.

/// Append `name` as a quoted identifier.
pub fn write_ident(out: &mut String, name: &str) {
    out.push('"');
    for c in name.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
}

/// Append a dotted, quoted path such as `"schema"."table"."column"`.
pub fn write_qualified(out: &mut String, parts: &[&str]) {
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        write_ident(out, part);
    }
}

/// Quote a single identifier.
pub fn quote_ident(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    write_ident(&mut out, name);
    out
}

/// Check that `name` is a plain identifier: `[A-Za-z_][A-Za-z0-9_$]*`.
pub fn is_plain_ident(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first == '_' || first.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c == '$' || c.is_ascii_alphanumeric())
}
