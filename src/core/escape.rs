//! Backslash escape decoding for C-family string literals.
//!
//! Escapes that stand for control characters or quoting (`\n`, `\t`, `\\`,
//! `\"`, ...) stay in the value as written, so the localizable resource keeps
//! them machine-readable. Numeric escapes that name a character (octal,
//! `\xNN`, `\uNNNN`, `\u{...}`) are replaced by that character.
//!
//! Decoding never fails: a malformed escape passes through unchanged.

/// Result of decoding one escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape<'a> {
    /// Keep the original escape text byte-for-byte.
    Literal(&'a str),
    /// Replace the escape with this character.
    Decoded(char),
}

/// String literal dialect, selecting which numeric escapes exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeSyntax {
    /// JavaScript-like: octal, `\x`, `\u` and `\u{}`.
    #[default]
    CFamily,
    /// Go: additionally `\UNNNNNNNN`.
    Go,
}

const MAX_BRACED_DIGITS: usize = 6;

/// Decode the escape sequence at the start of `input`.
///
/// `input` must start with the backslash. Returns the decoded escape and the
/// number of bytes of `input` it covers.
pub fn decode_escape(input: &str, syntax: EscapeSyntax) -> (Escape<'_>, usize) {
    debug_assert!(input.starts_with('\\'));
    let rest = &input[1..];
    let Some(c) = rest.chars().next() else {
        return (Escape::Literal(&input[..1]), 1);
    };

    let decoded = match c {
        '0'..='7' => Some(decode_octal(rest)),
        'x' => decode_hex_byte(rest),
        'u' if rest[1..].starts_with('{') => decode_braced(rest),
        'u' => decode_utf16(rest),
        'U' if syntax == EscapeSyntax::Go => {
            decode_fixed_hex(&rest[1..], 8).map(|(ch, len)| (ch, len + 1))
        }
        _ => None,
    };

    match decoded {
        Some((ch, len)) => (Escape::Decoded(ch), len + 1),
        None => {
            let len = 1 + c.len_utf8();
            (Escape::Literal(&input[..len]), len)
        }
    }
}

/// Decode every escape sequence in a string body.
pub fn decode_escapes(body: &str, syntax: EscapeSyntax) -> String {
    let mut out = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let (escape, len) = decode_escape(&rest[pos..], syntax);
        match escape {
            Escape::Literal(text) => out.push_str(text),
            Escape::Decoded(ch) => out.push(ch),
        }
        rest = &rest[pos + len..];
    }
    out.push_str(rest);

    out
}

/// `\NNN`: up to three octal digits, as long as the value stays within a byte.
fn decode_octal(rest: &str) -> (char, usize) {
    let mut value: u32 = 0;
    let mut len = 0;
    for b in rest.bytes().take(3) {
        if !(b'0'..=b'7').contains(&b) {
            break;
        }
        let next = value * 8 + u32::from(b - b'0');
        if next > 0xFF {
            break;
        }
        value = next;
        len += 1;
    }
    (char::from(value as u8), len)
}

/// `\xNN`: exactly two hex digits.
fn decode_hex_byte(rest: &str) -> Option<(char, usize)> {
    decode_fixed_hex(&rest[1..], 2).map(|(ch, len)| (ch, len + 1))
}

/// `\u{H...H}`: one to six hex digits naming a scalar value.
fn decode_braced(rest: &str) -> Option<(char, usize)> {
    let digits = &rest[2..];
    let close = digits.find('}')?;
    if close == 0 || close > MAX_BRACED_DIGITS {
        return None;
    }
    let hex = &digits[..close];
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    // "u{" + digits + "}"
    char::from_u32(value).map(|ch| (ch, close + 3))
}

/// `\uNNNN`, composing a surrogate pair written as two consecutive escapes.
fn decode_utf16(rest: &str) -> Option<(char, usize)> {
    let high = parse_hex(rest.get(1..5)?)?;
    if let Some(ch) = char::from_u32(high) {
        return Some((ch, 5));
    }
    if !(0xD800..=0xDBFF).contains(&high) {
        return None;
    }
    let low = rest
        .get(5..7)
        .filter(|marker| *marker == "\\u")
        .and_then(|_| rest.get(7..11))
        .and_then(parse_hex)
        .filter(|low| (0xDC00..=0xDFFF).contains(low))?;
    let scalar = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
    // "uNNNN" + "\uNNNN"
    char::from_u32(scalar).map(|ch| (ch, 11))
}

fn decode_fixed_hex(digits: &str, count: usize) -> Option<(char, usize)> {
    let value = parse_hex(digits.get(..count)?)?;
    char::from_u32(value).map(|ch| (ch, count))
}

fn parse_hex(hex: &str) -> Option<u32> {
    if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode(body: &str) -> String {
        decode_escapes(body, EscapeSyntax::CFamily)
    }

    #[test]
    fn test_named_escapes_pass_through() {
        for escape in [
            r"\n", r"\t", r"\r", r"\b", r"\f", r"\v", r"\\", r#"\""#, r"\'",
        ] {
            assert_eq!(
                decode_escape(escape, EscapeSyntax::CFamily),
                (Escape::Literal(escape), 2)
            );
            let once = decode(escape);
            assert_eq!(once, escape);
            assert_eq!(decode(&once), once);
        }
    }

    #[test]
    fn test_octal() {
        assert_eq!(decode(r"foo\101bar"), "fooAbar");
        assert_eq!(decode(r"\7"), "\u{7}");
        assert_eq!(decode(r"\0"), "\0");
        assert_eq!(decode(r"\377"), "\u{FF}");
        // \400 exceeds a byte, so only \40 is taken
        assert_eq!(decode(r"\400"), " 0");
    }

    #[test]
    fn test_hex_byte() {
        assert_eq!(decode(r"foo\x41bar"), "fooAbar");
        assert_eq!(decode(r"\xe9"), "é");
        assert_eq!(decode(r"\x4"), r"\x4");
        assert_eq!(decode(r"\xZZ"), r"\xZZ");
    }

    #[test]
    fn test_unicode_four_digits() {
        assert_eq!(decode(r"foo\u0102bar"), "fooĂbar");
        assert_eq!(decode(r"foo\u0466bar"), "fooѦbar");
        assert_eq!(decode(r"\u00DA are welcome!"), "Ú are welcome!");
        assert_eq!(decode(r"\u12"), r"\u12");
    }

    #[test]
    fn test_unicode_braced() {
        for body in [
            r"foo\u{41}bar",
            r"foo\u{041}bar",
            r"foo\u{0041}bar",
            r"foo\u{00041}bar",
        ] {
            assert_eq!(decode(body), "fooAbar");
        }
        assert_eq!(decode(r"foo\u{1F600}bar"), "foo😀bar");
        assert_eq!(decode(r"\u{10FFFF}"), "\u{10FFFF}");
    }

    #[test]
    fn test_unicode_braced_malformed() {
        assert_eq!(decode(r"\u{}"), r"\u{}");
        assert_eq!(decode(r"\u{110000}"), r"\u{110000}");
        assert_eq!(decode(r"\u{0000041}"), r"\u{0000041}");
        assert_eq!(decode(r"\u{41"), r"\u{41");
        assert_eq!(decode(r"\u{D800}"), r"\u{D800}");
    }

    #[test]
    fn test_surrogate_pair_composes() {
        assert_eq!(decode(r"\uD83D\uDE00"), "😀");
        assert_eq!(decode(r"a\ud83d\ude00b"), "a😀b");
    }

    #[test]
    fn test_lone_surrogate_passes_through() {
        assert_eq!(decode(r"\uD800"), r"\uD800");
        assert_eq!(decode(r"\uD800x"), r"\uD800x");
        assert_eq!(decode(r"\uDE00"), r"\uDE00");
        assert_eq!(decode(r"\uD83DA"), r"\uD83DA");
    }

    #[test]
    fn test_escaped_backslash_protects_following_text() {
        assert_eq!(decode(r"foo\\nbar"), r"foo\\nbar");
        assert_eq!(decode(r"foo\\\nbar"), r"foo\\\nbar");
        assert_eq!(decode(r"foo\\x41"), r"foo\\x41");
        assert_eq!(decode(r#"value \\\"4\""#), r#"value \\\"4\""#);
    }

    #[test]
    fn test_unknown_and_trailing_escapes() {
        assert_eq!(decode(r"\q"), r"\q");
        assert_eq!(decode(r"\8"), r"\8");
        assert_eq!(decode(r"\é"), r"\é");
        assert_eq!(decode("trailing\\"), "trailing\\");
    }

    #[test]
    fn test_long_unicode_only_in_go() {
        assert_eq!(decode(r"\U0001F600"), r"\U0001F600");
        assert_eq!(decode_escapes(r"\U0001F600", EscapeSyntax::Go), "😀");
        assert_eq!(decode_escapes(r"\U0011FFFF", EscapeSyntax::Go), r"\U0011FFFF");
    }
}
