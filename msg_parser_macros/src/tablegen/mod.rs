//! # Command Table Macro
//!
//! Generates a `static` command table for `msg_parser` from a compact
//! description, either written inline or read from a descriptor file.
//!
//! ## Entry syntax
//! ```text
//! "NAME" => path::to::handler, "optional description";
//! ```
//! - Entries keep their order; the parser searches them front to back.
//! - The trailing `;` after the last entry is optional.
//! - `//` comments are allowed in descriptor files.
//!
//! ## Macro input format
//! - Inline: `define_command_table!(pub static COMMANDS; "A" => a; "B" => b, "help");`
//! - File:   `define_command_table!(pub static COMMANDS; path = "src/commands.cfg");`
//!
//! ## Checks
//! Names are compared against one whitespace-delimited token, so the macro
//! refuses at compile time:
//! - empty names,
//! - names containing whitespace,
//! - duplicate names (only the first could ever be dispatched).

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, Error, Ident, LitStr, Path, Result, Token, Visibility,
};

/// One `"NAME" => handler, "description"` line.
struct EntryDef {
    name: LitStr,
    handler: Path,
    description: Option<LitStr>,
}

impl Parse for EntryDef {
    fn parse(input: ParseStream) -> Result<Self> {
        let name: LitStr = input.parse()?;
        input.parse::<Token![=>]>()?;
        let handler: Path = input.parse()?;
        let description = if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
            Some(input.parse::<LitStr>()?)
        } else {
            None
        };
        Ok(EntryDef { name, handler, description })
    }
}

/// `;`-separated entries.
struct EntryList(Vec<EntryDef>);

impl Parse for EntryList {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut entries = Vec::new();
        while !input.is_empty() {
            entries.push(input.parse::<EntryDef>()?);
            if input.is_empty() {
                break;
            }
            input.parse::<Token![;]>()?;
        }
        Ok(EntryList(entries))
    }
}

/// Where the entries come from.
enum TableSource {
    Inline(EntryList),
    File(LitStr),
}

/// Parsed macro input: `<vis> static <ident>;` followed by the entries or by
/// `path = "<file>";`.
struct TableMacroInput {
    vis: Visibility,
    ident: Ident,
    source: TableSource,
}

impl Parse for TableMacroInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let vis: Visibility = input.parse()?;
        input.parse::<Token![static]>()?;
        let ident: Ident = input.parse()?;
        input.parse::<Token![;]>()?;

        let source = if input.peek(Ident) && input.peek2(Token![=]) {
            let key: Ident = input.parse()?;
            if key != "path" {
                return Err(Error::new(key.span(), "Unexpected identifier, expected 'path'"));
            }
            input.parse::<Token![=]>()?;
            let path: LitStr = input.parse()?;
            if input.peek(Token![;]) {
                input.parse::<Token![;]>()?;
            }
            if !input.is_empty() {
                return Err(input.error("nothing may follow the descriptor file path"));
            }
            TableSource::File(path)
        } else {
            TableSource::Inline(input.parse()?)
        };

        Ok(TableMacroInput { vis, ident, source })
    }
}

/// Entry point used by the `#[proc_macro]` wrapper.
pub fn define_command_table_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as TableMacroInput);
    match expand_input(input) {
        Ok(out) => out.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_input(input: TableMacroInput) -> Result<TokenStream2> {
    let TableMacroInput { vis, ident, source } = input;
    match source {
        TableSource::Inline(EntryList(entries)) => {
            validate(&entries)?;
            Ok(expand(&vis, &ident, &entries, None))
        }
        TableSource::File(path) => {
            let (entries, full_path) = load_entries(&path)?;
            // Spans from the file text point nowhere useful; report on the path.
            validate(&entries).map_err(|err| respan(err, &path))?;
            Ok(expand(&vis, &ident, &entries, Some(full_path)))
        }
    }
}

/// Reads and parses a descriptor file relative to `CARGO_MANIFEST_DIR`.
fn load_entries(path: &LitStr) -> Result<(Vec<EntryDef>, String)> {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map_err(|_| Error::new(path.span(), "CARGO_MANIFEST_DIR is not set"))?;
    let full_path = std::path::Path::new(&manifest_dir).join(path.value());

    let text = std::fs::read_to_string(&full_path).map_err(|e| {
        Error::new(
            path.span(),
            format!("Failed to read command descriptor file {}: {e}", full_path.display()),
        )
    })?;
    let tokens: TokenStream2 = text.parse().map_err(|e| {
        Error::new(path.span(), format!("{}: {e}", full_path.display()))
    })?;
    let EntryList(entries) = syn::parse2(tokens).map_err(|e| {
        Error::new(path.span(), format!("{}: {e}", full_path.display()))
    })?;

    Ok((entries, full_path.display().to_string()))
}

/// Rejects names the parser could never dispatch to.
fn validate(entries: &[EntryDef]) -> Result<()> {
    let mut errors: Option<Error> = None;

    for (i, entry) in entries.iter().enumerate() {
        let name = entry.name.value();
        let problem = if name.is_empty() {
            Some("command name must not be empty".to_string())
        } else if name.bytes().any(|b| b.is_ascii_whitespace()) {
            Some(format!("command name `{name}` contains whitespace and can never match"))
        } else if entries[..i].iter().any(|prev| prev.name.value() == name) {
            Some(format!("duplicate command `{name}`, only the first entry would be dispatched"))
        } else {
            None
        };

        if let Some(msg) = problem {
            let err = Error::new(entry.name.span(), msg);
            match &mut errors {
                Some(all) => all.combine(err),
                None => errors = Some(err),
            }
        }
    }

    match errors {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn respan(err: Error, path: &LitStr) -> Error {
    err.into_iter()
        .map(|e| Error::new(path.span(), e.to_string()))
        .reduce(|mut all, e| {
            all.combine(e);
            all
        })
        .unwrap_or_else(|| Error::new(path.span(), "invalid command descriptor file"))
}

/// Emits the table, its length constant and, for the file form, an
/// `include_bytes!` so the table is rebuilt when the file changes.
fn expand(
    vis: &Visibility,
    ident: &Ident,
    entries: &[EntryDef],
    tracked_file: Option<String>,
) -> TokenStream2 {
    let len = entries.len();
    let len_ident = format_ident!("{}_LEN", ident);

    let inits = entries.iter().map(|entry| {
        let name = &entry.name;
        let handler = &entry.handler;
        let description = match &entry.description {
            Some(desc) => quote! { ::core::option::Option::Some(#desc) },
            None => quote! { ::core::option::Option::None },
        };
        quote! {
            ::msg_parser::CommandEntry {
                name: #name,
                description: #description,
                handler: #handler,
            }
        }
    });

    let tracking = tracked_file.map(|file| {
        quote! { const _: &[u8] = include_bytes!(#file); }
    });

    quote! {
        #tracking

        /// Generated by `define_command_table!`. Search order is entry order.
        #vis static #ident: [::msg_parser::CommandEntry; #len] = [
            #( #inits ),*
        ];

        /// Number of entries in the generated table.
        #vis const #len_ident: usize = #len;
    }
}

// ================= TESTS ==========================
