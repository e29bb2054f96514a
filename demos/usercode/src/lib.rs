pub mod commands;

use msg_parser_macros::define_command_table;

define_command_table! {
    pub static COMMANDS;
    path = "src/commands.cfg";
}
