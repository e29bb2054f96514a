//! End-to-end behaviour of the parser as seen by the code feeding bytes.

use std::cell::RefCell;

use msg_parser::{Args, CommandEntry, CommandList, MsgParser, ParserConfig, ParserState};
use msg_parser_macros::define_command_table;

std::thread_local! {
    static CALL_LOG: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

fn record_call(entry: String) {
    CALL_LOG.with(|log| log.borrow_mut().push(entry));
}

fn get_calls() -> Vec<String> {
    CALL_LOG.with(|log| log.borrow().clone())
}

fn clear_log() {
    CALL_LOG.with(|log| log.borrow_mut().clear());
}

mod handlers {
    use super::record_call;
    use msg_parser::Args;

    pub fn cmd(args: &mut Args<'_>) {
        let first = args.next_str().unwrap_or("").to_string();
        let second = args.next_str().unwrap_or("").to_string();
        record_call(format!("CMD [{first}] [{second}]"));
    }

    pub fn set(args: &mut Args<'_>) {
        let int = args.get_int();
        let float = args.get_float();
        record_call(format!("SET {int} {float}"));
    }

    pub fn big(args: &mut Args<'_>) {
        let value = args.get_long();
        record_call(format!("BIG {value}"));
    }
}

define_command_table! {
    static COMMANDS;
    "CMD" => handlers::cmd, "CMD <a> <b>";
    "SET" => handlers::set, "SET <int> <float>";
    "BIG" => handlers::big;
}

fn not_found(raw: &[u8]) {
    record_call(format!("NOT FOUND {:?} {}", String::from_utf8_lossy(raw), raw.len()));
}

fn parser(config: ParserConfig) -> MsgParser<'static> {
    clear_log();
    let mut parser = MsgParser::with_config(config);
    parser.set_table(&COMMANDS);
    parser.set_handler_for_cmd_not_found(Some(not_found));
    parser
}

#[test]
fn generated_table_keeps_entry_order() {
    assert_eq!(COMMANDS_LEN, 3);
    let mut parser = parser(ParserConfig::default());
    assert_eq!(parser.num_cmds(), 3);
    assert_eq!(parser.cmd_string(0), Some("CMD"));
    assert_eq!(parser.cmd_desc(1), Some("SET <int> <float>"));
    assert_eq!(parser.cmd_desc(2), None);
    assert_eq!(parser.cmd_string(3), None);

    parser.process_bytes(b"BIG -123456789012\r");
    assert_eq!(get_calls(), ["BIG -123456789012"]);
}

#[test]
fn partial_message_does_not_dispatch() {
    let mut parser = parser(ParserConfig::default());
    parser.process_bytes(b"CMD one two");
    assert!(get_calls().is_empty());
    assert_eq!(parser.state(), ParserState::ReadingMessage);
    assert_eq!(parser.buffered(), b"CMD one two");
    assert_eq!(parser.stats().messages, 0);
}

#[test]
fn start_byte_message_dispatches_once() {
    let mut parser = parser(ParserConfig::new().with_use_start_byte(true));
    parser.process_bytes(b"/CMD arg1 arg2\r");
    assert_eq!(get_calls(), ["CMD [arg1] [arg2]"]);
    assert_eq!(parser.state(), ParserState::AwaitingStart);
    assert_eq!(parser.stats().dispatched, 1);
}

#[test]
fn not_found_sees_untokenized_message_without_end_byte() {
    let mut parser = parser(ParserConfig::default());
    parser.process_bytes(b"XYZ\r");
    assert_eq!(get_calls(), [r#"NOT FOUND "XYZ" 3"#]);

    clear_log();
    parser.process_bytes(b"cmd  a  b\r");
    assert_eq!(get_calls(), [r#"NOT FOUND "cmd  a  b" 9"#]);
}

#[test]
fn overflow_drops_silently_and_recovers() {
    let mut parser = parser(ParserConfig::default());
    let long = [b'A'; 200];
    parser.process_bytes(&long);
    assert!(get_calls().is_empty());
    assert_eq!(parser.stats().overflows, 3);
    assert_eq!(parser.buffered().len(), 200 - 3 * 64);

    parser.reset();
    parser.process_bytes(b"SET 1 2\r");
    assert_eq!(get_calls(), ["SET 1 2"]);
}

#[test]
fn overflow_mid_stream_resyncs_on_next_start_byte() {
    let mut parser = parser(ParserConfig::new().with_use_start_byte(true));
    let mut stream = vec![b'/'];
    stream.extend_from_slice(&[b'x'; 64]);
    stream.extend_from_slice(b" trailing garbage\r/SET 5 0.25\r");
    parser.process_bytes(&stream);
    assert_eq!(get_calls(), ["SET 5 0.25"]);
    assert_eq!(parser.stats().overflows, 1);
}

#[test]
fn arguments_flow_in_token_order() {
    let mut parser = parser(ParserConfig::default());
    parser.process_bytes(b"SET 10 3.5\r");
    assert_eq!(get_calls(), ["SET 10 3.5"]);
}

#[test]
fn enabling_start_byte_mid_message_applies_after_end_byte() {
    let mut parser = parser(ParserConfig::default());
    parser.process_bytes(b"SET 7");
    parser.use_start_byte_set(true);
    assert_eq!(parser.state(), ParserState::ReadingMessage);

    parser.process_bytes(b" 1.5\rSET 1 1\r/SET 2 2\r");
    assert_eq!(get_calls(), ["SET 7 1.5", "SET 2 2"]);
    assert_eq!(parser.state(), ParserState::AwaitingStart);
}

#[test]
fn disabling_start_byte_while_waiting_reads_immediately() {
    let mut parser = parser(ParserConfig::new().with_use_start_byte(true));
    parser.use_start_byte_set(false);
    assert_eq!(parser.state(), ParserState::ReadingMessage);
    parser.process_bytes(b"SET 3 3\r");
    assert_eq!(get_calls(), ["SET 3 3"]);
}

#[test]
fn lookup_is_case_sensitive() {
    let mut parser = parser(ParserConfig::default());
    parser.process_bytes(b"set 1 1\rSet 1 1\r");
    assert_eq!(
        get_calls(),
        [r#"NOT FOUND "set 1 1" 7"#, r#"NOT FOUND "Set 1 1" 7"#]
    );
}

#[test]
fn crlf_line_endings_are_tolerated() {
    let mut parser = parser(ParserConfig::default());
    parser.process_bytes(b"SET 1 2\r\nSET 3 4\r\n");
    assert_eq!(get_calls(), ["SET 1 2", "SET 3 4"]);
}

#[test]
fn metadata_follows_table_replacement() {
    fn noop(_: &mut Args<'_>) {}

    let mut runtime: CommandList<4> = CommandList::new();
    runtime.push(CommandEntry::new("A", noop).with_description("first")).unwrap();
    runtime.push(CommandEntry::new("B", noop)).unwrap();

    let mut parser = MsgParser::new();
    parser.set_table(&COMMANDS);
    assert_eq!(parser.num_cmds(), 3);

    parser.set_table(&runtime);
    assert_eq!(parser.num_cmds(), 2);
    assert_eq!(parser.cmd_string(0), Some("A"));
    assert_eq!(parser.cmd_desc(0), Some("first"));
    assert_eq!(parser.cmd_string(1), Some("B"));
    assert_eq!(parser.cmd_desc(1), None);
    assert_eq!(parser.cmd_string(2), None);
    assert_eq!(parser.cmd_desc(99), None);
}

#[test]
fn custom_markers_frame_messages() {
    let config = ParserConfig::new()
        .with_start_byte(b'<')
        .with_end_byte(b'>')
        .with_use_start_byte(true);
    let mut parser = parser(config);
    assert_eq!(parser.state(), ParserState::AwaitingStart);

    parser.process_bytes(b"/SET 1 1>x<SET 4 0.5>");
    assert_eq!(get_calls(), ["SET 4 0.5"]);
    assert_eq!(parser.state(), ParserState::AwaitingStart);
    assert_eq!(parser.stats().messages, 1);
}

#[test]
fn markers_change_on_a_running_parser() {
    let mut parser = parser(ParserConfig::new().with_use_start_byte(true));
    parser.set_start_byte(b'<');
    parser.set_end_byte(b'>');
    assert_eq!(parser.config().start_byte, b'<');
    assert_eq!(parser.config().end_byte, b'>');

    parser.process_bytes(b"/SET 1 1\r<SET 2 2>");
    assert_eq!(get_calls(), ["SET 2 2"]);
}

#[test]
fn set_config_follows_setter_state_rules() {
    let mut parser = parser(ParserConfig::default());
    let angled = ParserConfig::new()
        .with_start_byte(b'<')
        .with_end_byte(b'>')
        .with_use_start_byte(true);

    // Enabling the start byte mid-stream keeps reading the current message.
    parser.set_config(angled);
    assert_eq!(parser.state(), ParserState::ReadingMessage);
    assert_eq!(*parser.config(), angled);

    parser.process_bytes(b"/SET 1 1>");
    assert_eq!(get_calls(), [r#"NOT FOUND "/SET 1 1" 8"#]);
    assert_eq!(parser.state(), ParserState::AwaitingStart);

    clear_log();
    parser.process_bytes(b"SET 3 3><SET 4 4>");
    assert_eq!(get_calls(), ["SET 4 4"]);

    // Disabling it while waiting switches straight to reading.
    clear_log();
    parser.set_config(ParserConfig::default());
    assert_eq!(parser.state(), ParserState::ReadingMessage);
    parser.process_bytes(b"SET 5 5\r");
    assert_eq!(get_calls(), ["SET 5 5"]);
}
