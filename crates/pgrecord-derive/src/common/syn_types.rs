//! Type helper utilities for syn type analysis.

/// Extract `T` from `Tracked<T>` (or any path ending in `Tracked<T>`).
pub fn tracked_inner(ty: &syn::Type) -> Option<&syn::Type> {
    single_generic_arg(ty, "Tracked")
}

fn single_generic_arg<'a>(ty: &'a syn::Type, name: &str) -> Option<&'a syn::Type> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    let seg = type_path.path.segments.last()?;
    if seg.ident != name {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &seg.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    let syn::GenericArgument::Type(inner) = args.args.first()? else {
        return None;
    };
    Some(inner)
}
