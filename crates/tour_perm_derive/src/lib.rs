//! Derives backing the `tour_perm_core` configuration layer.
//!
//! The generated code refers to `crate::Error` and `crate::Result`, so these
//! derives are only usable from inside `tour_perm_core`.

mod cli_options;
mod cli_value;
mod kv_display;
mod utils;

use proc_macro::TokenStream;

/// Generates `split_arg`, `apply_cli_option` and `CLI_FLAGS` for a struct whose
/// fields carry `#[cli(long = "...")]`.
#[proc_macro_derive(CliOptions, attributes(cli))]
pub fn derive_cli_options(item: TokenStream) -> TokenStream {
    cli_options::derive_cli_options_inner(item)
}

/// Generates `parse` and `Display` for a unit-only enum.
#[proc_macro_derive(CliValue, attributes(cli_value, cli))]
pub fn derive_cli_value(item: TokenStream) -> TokenStream {
    cli_value::derive_cli_value_inner(item)
}

/// Generates an aligned `key = value` `Display` for a struct.
#[proc_macro_derive(KvDisplay, attributes(kv))]
pub fn derive_kv_display(item: TokenStream) -> TokenStream {
    kv_display::derive_kv_display_inner(item)
}
