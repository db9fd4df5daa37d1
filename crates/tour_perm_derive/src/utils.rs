use quote::quote;
use syn::{Path, Type};

/// Expression turning the captured `raw: String` into a field value.
pub fn build_cli_parse_expr(ty: &Type, parse_with: Option<&Path>) -> proc_macro2::TokenStream {
    match parse_with {
        Some(parse_with) => quote! { #parse_with(&raw)? },
        None => quote! {
            raw.parse::<#ty>()
                .map_err(|e| crate::Error::configuration(format!(
                    "Invalid value for --{name}: {raw} ({e})"
                )))?
        },
    }
}

pub fn to_kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (idx, ch) in s.chars().enumerate() {
        if ch == '_' {
            out.push('-');
        } else if ch.is_ascii_uppercase() {
            if idx != 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::{build_cli_parse_expr, to_kebab_case};

    #[test]
    fn to_kebab_case_splits_pascal_case() {
        assert_eq!(to_kebab_case("LogFormat"), "log-format");
        assert_eq!(to_kebab_case("RunMode"), "run-mode");
        assert_eq!(to_kebab_case("X"), "x");
    }

    #[test]
    fn to_kebab_case_turns_underscores_into_dashes() {
        assert_eq!(to_kebab_case("max_iterations"), "max-iterations");
        assert_eq!(to_kebab_case("already-kebab"), "already-kebab");
    }

    #[test]
    fn parse_expr_uses_from_str_without_parse_with() {
        let ty: syn::Type = parse_quote!(usize);
        let tokens = build_cli_parse_expr(&ty, None).to_string();
        assert!(tokens.contains("parse :: < usize >"));
        assert!(tokens.contains("configuration"));
    }

    #[test]
    fn parse_expr_calls_custom_parser_when_given() {
        let ty: syn::Type = parse_quote!(LogLevel);
        let path: syn::Path = parse_quote!(LogLevel::parse);
        let tokens = build_cli_parse_expr(&ty, Some(&path)).to_string();
        assert!(tokens.starts_with("LogLevel :: parse"));
    }
}
