use msg_parser::{Args, VERSION};

pub fn help(args: &mut Args<'_>) {
    for entry in args.commands().iter() {
        println!("{:<8} {}", entry.name, entry.description.unwrap_or(""));
    }
}

pub fn add(args: &mut Args<'_>) {
    let a = args.get_long();
    let b = args.get_long();
    println!("add | {} + {} = {}", a, b, a.wrapping_add(b));
}

pub fn scale(args: &mut Args<'_>) {
    let value = args.get_float();
    let factor = args.get_float();
    println!("scale | {} * {} = {}", value, factor, value * factor);
}

pub fn led(args: &mut Args<'_>) {
    if args.get_int() != 0 {
        println!("led | ON");
    } else {
        println!("led | OFF");
    }
}

pub fn echo(args: &mut Args<'_>) {
    println!("echo | {}", String::from_utf8_lossy(args.rest()));
}

pub fn version(_: &mut Args<'_>) {
    println!("version | {:#04x}", VERSION);
}

/// Prints messages whose command is not in the table.
pub fn unknown(raw: &[u8]) {
    println!("unknown command | '{}' ({} bytes)", String::from_utf8_lossy(raw), raw.len());
}
