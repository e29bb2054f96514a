mod logging;
mod terminal;

use std::io::{self, IsTerminal, Read, Write};

use anyhow::{Context, Result};
use clap::Parser;
use msg_parser::{MsgParser, ParserConfig, ParserEvent};
use parser_config::{END_BYTE, EXIT_BYTE, INPUT_BUFFER_SIZE, START_BYTE, USE_START_BYTE};
use terminal::RawMode;
use usercode::{commands, COMMANDS};

/// Feeds stdin into the message parser one byte at a time, the way a UART
/// driver would.
#[derive(Parser, Debug)]
#[command(name = "demo_app", version)]
struct Cli {
    /// Start-of-message marker: a character, an escape like `\r`, or hex like `0x02`
    #[arg(long, value_parser = parse_marker)]
    start_byte: Option<u8>,

    /// End-of-message marker, same formats as `--start-byte`
    #[arg(long, value_parser = parse_marker)]
    end_byte: Option<u8>,

    /// Ignore bytes until the start byte arrives
    #[arg(long)]
    use_start_byte: bool,

    /// Echo received bytes back to stdout
    #[arg(long)]
    echo: bool,
}

fn parse_marker(s: &str) -> Result<u8, String> {
    let byte = match s {
        "\\r" => b'\r',
        "\\n" => b'\n',
        "\\t" => b'\t',
        "\\0" => 0,
        _ => {
            if let Some(hex) = s.strip_prefix("0x") {
                u8::from_str_radix(hex, 16).map_err(|e| format!("bad hex byte '{s}': {e}"))?
            } else {
                match s.as_bytes() {
                    [b] => *b,
                    _ => return Err(format!("expected a single ASCII character, got '{s}'")),
                }
            }
        }
    };
    Ok(byte)
}

fn on_event(event: &ParserEvent) {
    match event {
        ParserEvent::Overflow { dropped } => {
            tracing::warn!(dropped, "message longer than the buffer, dropped")
        }
        other => tracing::debug!(event = ?other, "parser event"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_stderr_logging();

    let config = ParserConfig::new()
        .with_start_byte(cli.start_byte.unwrap_or(START_BYTE))
        .with_end_byte(cli.end_byte.unwrap_or(END_BYTE))
        .with_use_start_byte(cli.use_start_byte || USE_START_BYTE);
    config.validate().context("invalid framing configuration")?;

    let mut parser = MsgParser::<INPUT_BUFFER_SIZE>::with_config(config);
    parser.set_table(&COMMANDS);
    parser.set_handler_for_cmd_not_found(Some(commands::unknown));
    parser.set_event_hook(Some(on_event));

    let stdin = io::stdin();
    let _raw = if stdin.is_terminal() {
        Some(RawMode::new(0).context("failed to switch the terminal to raw mode")?)
    } else {
        None
    };

    tracing::info!(
        version = parser.version(),
        commands = parser.num_cmds(),
        "parser ready, type 'help' then Enter, Ctrl-D to exit"
    );

    let mut stdout = io::stdout();
    for byte in stdin.lock().bytes() {
        let byte = byte.context("failed to read from stdin")?;
        if byte == EXIT_BYTE {
            break;
        }
        if cli.echo {
            if byte == config.end_byte {
                stdout.write_all(b"\r\n")?;
            } else {
                stdout.write_all(&[byte])?;
            }
            stdout.flush()?;
        }
        parser.process_byte(byte);
    }

    let stats = parser.stats();
    tracing::info!(
        messages = stats.messages,
        dispatched = stats.dispatched,
        not_found = stats.not_found,
        overflows = stats.overflows,
        "session ended"
    );
    Ok(())
}
