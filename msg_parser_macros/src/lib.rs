extern crate proc_macro;

mod tablegen;

use proc_macro::TokenStream;
use tablegen::define_command_table_impl;

/// Generates a `static` array of `msg_parser::CommandEntry`.
///
/// Inline form:
/// ```text
/// define_command_table! {
///     pub static COMMANDS;
///     "LED"  => handlers::led, "Switch the LED: LED <0|1>";
///     "PING" => handlers::ping;
/// }
/// ```
///
/// File form, the path being relative to the crate's `Cargo.toml`:
/// ```text
/// define_command_table! {
///     pub static COMMANDS;
///     path = "src/commands.cfg";
/// }
/// ```
///
/// A `COMMANDS_LEN` constant with the same visibility is emitted alongside.
#[proc_macro]
pub fn define_command_table(input: TokenStream) -> TokenStream {
    define_command_table_impl(input)
}
