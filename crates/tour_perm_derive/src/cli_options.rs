use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Data, DeriveInput, Field, Fields, Ident, LitStr, Meta, Path, parse_macro_input,
    spanned::Spanned,
};

use crate::utils;

/// A struct field that is settable from the command line.
struct CliField<'a> {
    ident: &'a Ident,
    field: &'a Field,
    long: String,
    parse_with: Option<Path>,
}

/// `None` for fields without a `#[cli]` attribute. `long` defaults to the
/// kebab-cased field name.
fn cli_field(field: &Field) -> syn::Result<Option<CliField<'_>>> {
    let Some(ident) = &field.ident else {
        return Ok(None);
    };

    let mut marked = false;
    let mut long = None;
    let mut parse_with = None;
    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("cli")) {
        marked = true;
        if matches!(attr.meta, Meta::Path(_)) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            let lit: LitStr = if meta.path.is_ident("long") || meta.path.is_ident("parse_with") {
                meta.value()?.parse()?
            } else {
                return Err(meta.error("unsupported cli attribute; expected long/parse_with"));
            };
            if meta.path.is_ident("long") {
                long = Some(lit.value());
            } else {
                parse_with = Some(lit.parse::<Path>()?);
            }
            Ok(())
        })?;
    }

    if !marked {
        return Ok(None);
    }
    Ok(Some(CliField {
        ident,
        field,
        long: long.unwrap_or_else(|| utils::to_kebab_case(&ident.to_string())),
        parse_with,
    }))
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let Data::Struct(data_struct) = &input.data else {
        return Err(syn::Error::new(input.span(), "CliOptions can only be derived for structs"));
    };
    let Fields::Named(fields) = &data_struct.fields else {
        return Err(syn::Error::new(input.span(), "CliOptions requires named fields"));
    };

    let mut cli_fields = Vec::new();
    for field in &fields.named {
        if let Some(cli) = cli_field(field)? {
            cli_fields.push(cli);
        }
    }

    let flags: Vec<&str> = cli_fields.iter().map(|cli| cli.long.as_str()).collect();
    let arms = cli_fields.iter().map(|cli| {
        let long = &cli.long;
        let ident = cli.ident;
        let parse_expr = utils::build_cli_parse_expr(&cli.field.ty, cli.parse_with.as_ref());
        quote! {
            #long => {
                let Some(raw) = value else {
                    return Err(crate::Error::configuration(format!(
                        "Missing value for --{name}"
                    )));
                };
                self.#ident = #parse_expr;
                Ok(true)
            }
        }
    });

    let struct_ident = &input.ident;
    Ok(quote! {
        impl #struct_ident {
            /// Long names of every value-taking option, in declaration order.
            pub const CLI_FLAGS: &'static [&'static str] = &[#(#flags),*];

            /// Splits `name=value`, or takes the next argument as the value
            /// unless it is another option.
            fn split_arg(
                raw_name: &str,
                args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
            ) -> (String, Option<String>) {
                match raw_name.split_once('=') {
                    Some((name, value)) => (name.to_owned(), Some(value.to_owned())),
                    None => {
                        let value = args.next_if(|next| !next.starts_with("--"));
                        (raw_name.to_owned(), value)
                    }
                }
            }

            /// `Ok(false)` when `name` is not a derived option.
            fn apply_cli_option(
                &mut self,
                name: &str,
                value: Option<String>,
            ) -> crate::Result<bool> {
                match name {
                    #(#arms,)*
                    _ => Ok(false),
                }
            }
        }
    })
}

pub fn derive_cli_options_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[cfg(test)]
mod tests {
    use syn::{Field, parse_quote};

    use super::cli_field;

    #[test]
    fn cli_field_defaults_the_long_name_to_kebab_case() {
        let field: Field = parse_quote! {
            #[cli]
            pub max_interior: usize
        };
        let cli = cli_field(&field).expect("parse").expect("marked");
        assert_eq!(cli.long, "max-interior");
        assert!(cli.parse_with.is_none());
    }

    #[test]
    fn cli_field_reads_long_and_parse_with() {
        let field: Field = parse_quote! {
            #[cli(long = "mode", parse_with = "RunMode::parse")]
            pub run_mode: RunMode
        };
        let cli = cli_field(&field).expect("parse").expect("marked");
        assert_eq!(cli.long, "mode");
        assert!(cli.parse_with.is_some());
    }

    #[test]
    fn unmarked_fields_are_left_to_the_hand_written_parser() {
        let field: Field = parse_quote! { pub log_timestamp: bool };
        assert!(cli_field(&field).expect("parse").is_none());
    }

    #[test]
    fn unknown_cli_keys_are_rejected() {
        let field: Field = parse_quote! {
            #[cli(short = "m")]
            pub mode: RunMode
        };
        assert!(cli_field(&field).is_err());
    }
}
