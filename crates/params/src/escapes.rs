//! Shared "decode quoted-with-escapes" helper, used by both quoted and
//! unquoted values in the params grammar (and reused by the task grammar's
//! argument strings, per the spec's note on factoring this rather than
//! duplicating escape rules).

use crate::grammar::ParamsError;

/// Decode backslash escapes: `\n \t \r \\ \" \' \xHH \uHHHH \OOO` (1-3
/// octal digits); any other `\X` decodes to the literal character `X`.
pub fn decode_escapes(input: &str) -> Result<String, ParamsError> {
    let mut out = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            None => return Err(ParamsError::MalformedEscape("trailing backslash".into())),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('x') => {
                let hex = take_hex(&mut chars, 2)
                    .ok_or_else(|| ParamsError::MalformedEscape("\\x".into()))?;
                let byte = u8::from_str_radix(&hex, 16)
                    .map_err(|_| ParamsError::MalformedEscape(format!("\\x{hex}")))?;
                out.push(byte as char);
            }
            Some('u') => {
                let hex = take_hex(&mut chars, 4)
                    .ok_or_else(|| ParamsError::MalformedEscape("\\u".into()))?;
                let code = u32::from_str_radix(&hex, 16)
                    .map_err(|_| ParamsError::MalformedEscape(format!("\\u{hex}")))?;
                let ch = char::from_u32(code)
                    .ok_or_else(|| ParamsError::MalformedEscape(format!("\\u{hex}")))?;
                out.push(ch);
            }
            Some(d) if d.is_digit(8) => {
                let mut octal = String::new();
                octal.push(d);
                for _ in 0..2 {
                    match chars.peek() {
                        Some(next) if next.is_digit(8) => {
                            octal.push(*next);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                let value = u32::from_str_radix(&octal, 8)
                    .map_err(|_| ParamsError::MalformedEscape(format!("\\{octal}")))?;
                let ch = char::from_u32(value)
                    .ok_or_else(|| ParamsError::MalformedEscape(format!("\\{octal}")))?;
                out.push(ch);
            }
            Some(other) => out.push(other),
        }
    }

    Ok(out)
}

fn take_hex(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, count: usize) -> Option<String> {
    let mut hex = String::new();
    for _ in 0..count {
        let c = chars.next()?;
        if !c.is_ascii_hexdigit() {
            return None;
        }
        hex.push(c);
    }
    Some(hex)
}
