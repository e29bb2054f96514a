//! Token extraction over a received message.
//!
//! A message is split on ASCII whitespace. The first token is the command,
//! the following ones are its arguments. [`Args`] keeps a read cursor into the
//! message; every accessor consumes exactly one token, so a handler must read
//! its arguments in the order they appear on the line.
//!
//! Numbers are parsed the permissive way small firmware usually does it: the
//! longest numeric prefix of the token is used and anything that does not
//! start with a number reads as zero.

use crate::table::CommandTable;

/// Message context handed to command handlers.
pub struct Args<'m> {
    message: &'m [u8],
    cursor: usize,
    command: &'m [u8],
    table: &'m dyn CommandTable,
}

impl<'m> Args<'m> {
    /// Wraps `message` and consumes its first token as the command.
    pub fn new(message: &'m [u8], table: &'m dyn CommandTable) -> Self {
        let mut args = Self {
            message,
            cursor: 0,
            command: &[],
            table,
        };
        args.command = args.next_token().unwrap_or_default();
        args
    }

    /// The command token. Empty when the message holds only whitespace.
    pub fn command(&self) -> &'m [u8] {
        self.command
    }

    /// The whole message as received, end byte excluded.
    pub fn raw(&self) -> &'m [u8] {
        self.message
    }

    /// The table the command was looked up in.
    pub fn commands(&self) -> &'m dyn CommandTable {
        self.table
    }

    /// Consumes the next whitespace-delimited token.
    ///
    /// Leading whitespace is skipped and the cursor ends up just past the
    /// delimiter that closed the token. Returns `None` once the message is
    /// exhausted.
    pub fn next_token(&mut self) -> Option<&'m [u8]> {
        let bytes = self.message;
        let mut i = self.cursor;

        while i < bytes.len() && is_space(bytes[i]) {
            i += 1;
        }
        if i >= bytes.len() {
            self.cursor = bytes.len();
            return None;
        }

        let start = i;
        while i < bytes.len() && !is_space(bytes[i]) {
            i += 1;
        }
        // Step over the delimiter, if there was one.
        self.cursor = (i + 1).min(bytes.len());
        Some(&bytes[start..i])
    }

    /// Consumes the next token and returns it if it is valid UTF-8.
    ///
    /// The token is consumed even when it is not UTF-8.
    pub fn next_str(&mut self) -> Option<&'m str> {
        self.next_token().and_then(|t| core::str::from_utf8(t).ok())
    }

    /// Everything not consumed yet, leading whitespace skipped.
    pub fn rest(&self) -> &'m [u8] {
        let tail = &self.message[self.cursor.min(self.message.len())..];
        let skip = tail.iter().take_while(|&&b| is_space(b)).count();
        &tail[skip..]
    }

    /// Next token as a 64-bit integer, `0` if absent or not numeric.
    pub fn get_long(&mut self) -> i64 {
        self.next_token().map(parse_long).unwrap_or(0)
    }

    /// Next token as a 32-bit integer, `0` if absent or not numeric.
    pub fn get_int(&mut self) -> i32 {
        self.next_token().map(parse_int).unwrap_or(0)
    }

    /// Next token as a float, `0.0` if absent or not numeric.
    pub fn get_float(&mut self) -> f32 {
        self.next_token().map(parse_float).unwrap_or(0.0)
    }
}

/// ASCII space, tab, line feed, form feed or carriage return.
#[inline(always)]
const fn is_space(b: u8) -> bool {
    b.is_ascii_whitespace()
}

/// Parses the leading decimal integer of `s`.
///
/// Leading whitespace and one sign are accepted, parsing stops at the first
/// non-digit. Out-of-range values saturate. Returns `0` when there is no digit.
pub fn parse_long(s: &[u8]) -> i64 {
    let s = trim_start(s);
    let (negative, digits) = split_sign(s);

    let mut value: i64 = 0;
    for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        let d = i64::from(b - b'0');
        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(d)
        } else {
            value.saturating_add(d)
        };
    }
    value
}

/// [`parse_long`] clamped to the `i32` range.
pub fn parse_int(s: &[u8]) -> i32 {
    parse_long(s).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Parses the leading decimal floating point number of `s`.
///
/// Accepts an optional sign, digits with an optional fraction, an optional
/// exponent, and `inf`, `infinity` or `nan` in any case. Returns `0.0` when
/// there is no number.
pub fn parse_float(s: &[u8]) -> f32 {
    let s = trim_start(s);
    let (negative, body) = split_sign(s);

    let mut i = count_digits(body);
    let mut mantissa_digits = i;
    if body.get(i) == Some(&b'.') {
        let fraction = count_digits(&body[i + 1..]);
        mantissa_digits += fraction;
        i += 1 + fraction;
    }

    if mantissa_digits == 0 {
        let special = if starts_with_ignore_case(body, b"inf") {
            f32::INFINITY
        } else if starts_with_ignore_case(body, b"nan") {
            f32::NAN
        } else {
            return 0.0;
        };
        return if negative { -special } else { special };
    }

    if matches!(body.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(body.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exponent = count_digits(&body[j.min(body.len())..]);
        if exponent > 0 {
            i = j + exponent;
        }
    }

    let value = core::str::from_utf8(&body[..i])
        .ok()
        .and_then(|text| text.parse::<f32>().ok())
        .unwrap_or(0.0);
    if negative { -value } else { value }
}

fn trim_start(s: &[u8]) -> &[u8] {
    let skip = s.iter().take_while(|&&b| is_space(b)).count();
    &s[skip..]
}

fn split_sign(s: &[u8]) -> (bool, &[u8]) {
    match s.first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    }
}

fn count_digits(s: &[u8]) -> usize {
    s.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn starts_with_ignore_case(s: &[u8], prefix: &[u8]) -> bool {
    s.len() >= prefix.len() && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CommandEntry;
    use rstest::rstest;

    const NO_COMMANDS: [CommandEntry; 0] = [];

    #[test]
    fn first_token_is_the_command() {
        let args = Args::new(b"SET 10 3.5", &NO_COMMANDS);
        assert_eq!(args.command(), b"SET");
        assert_eq!(args.raw(), b"SET 10 3.5");
        assert_eq!(args.rest(), b"10 3.5");
    }

    #[test]
    fn tokens_come_out_in_order() {
        let mut args = Args::new(b"SET 10 3.5", &NO_COMMANDS);
        assert_eq!(args.get_int(), 10);
        assert_eq!(args.get_float(), 3.5);
        assert_eq!(args.next_token(), None);
        assert_eq!(args.get_long(), 0);
    }

    #[test]
    fn whitespace_runs_collapse() {
        let mut args = Args::new(b"  MOVE \t -4   7  ", &NO_COMMANDS);
        assert_eq!(args.command(), b"MOVE");
        assert_eq!(args.get_long(), -4);
        assert_eq!(args.get_long(), 7);
        assert_eq!(args.next_token(), None);
        assert!(args.rest().is_empty());
    }

    #[test]
    fn whitespace_only_message_has_empty_command() {
        let mut args = Args::new(b"   ", &NO_COMMANDS);
        assert!(args.command().is_empty());
        assert_eq!(args.next_token(), None);
    }

    #[test]
    fn next_str_consumes_non_utf8_tokens() {
        let mut args = Args::new(b"NAME \xff\xfe bob", &NO_COMMANDS);
        assert_eq!(args.next_str(), None);
        assert_eq!(args.next_str(), Some("bob"));
    }

    #[test]
    fn out_of_order_reads_take_whatever_is_next() {
        let mut args = Args::new(b"SET 3.5 10", &NO_COMMANDS);
        assert_eq!(args.get_int(), 3);
        assert_eq!(args.get_float(), 10.0);
    }

    #[rstest]
    #[case(b"42", 42)]
    #[case(b"-17", -17)]
    #[case(b"+8", 8)]
    #[case(b"  12", 12)]
    #[case(b"12abc", 12)]
    #[case(b"abc", 0)]
    #[case(b"-", 0)]
    #[case(b"", 0)]
    #[case(b"0x1F", 0)]
    #[case(b"99999999999999999999999", i64::MAX)]
    #[case(b"-99999999999999999999999", i64::MIN)]
    fn long_prefix(#[case] input: &[u8], #[case] expected: i64) {
        assert_eq!(parse_long(input), expected);
    }

    #[rstest]
    #[case(b"123", 123)]
    #[case(b"-5x", -5)]
    #[case(b"4294967296", i32::MAX)]
    #[case(b"-4294967296", i32::MIN)]
    fn int_prefix(#[case] input: &[u8], #[case] expected: i32) {
        assert_eq!(parse_int(input), expected);
    }

    #[rstest]
    #[case(b"3.5", 3.5)]
    #[case(b"-2.25", -2.25)]
    #[case(b"+.5", 0.5)]
    #[case(b"7.", 7.0)]
    #[case(b"1e3", 1000.0)]
    #[case(b"2.5E-1", 0.25)]
    #[case(b"4e", 4.0)]
    #[case(b"6e+", 6.0)]
    #[case(b"1.5volts", 1.5)]
    #[case(b"volts", 0.0)]
    #[case(b".", 0.0)]
    #[case(b"-", 0.0)]
    #[case(b"", 0.0)]
    fn float_prefix(#[case] input: &[u8], #[case] expected: f32) {
        assert_eq!(parse_float(input), expected);
    }

    #[test]
    fn float_specials() {
        assert_eq!(parse_float(b"inf"), f32::INFINITY);
        assert_eq!(parse_float(b"-Infinity"), f32::NEG_INFINITY);
        assert!(parse_float(b"NaN").is_nan());
        assert_eq!(parse_float(b"in"), 0.0);
    }
}
