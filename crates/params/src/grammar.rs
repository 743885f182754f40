//! Permissive key/value/positional tokenizer with quotes, escapes, and
//! unicode whitespace separators.
//!
//! `Items := (Separator | Named | Positional)*`
//! `Separator ∈ {Whitespace, Comma}`, `Named := Token '=' Value?`,
//! `Positional := Value`.

use crate::escapes::decode_escapes;
use crate::store::Params;
use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamsError {
    #[error("unclosed quote starting near `{0}`")]
    UnclosedQuote(String),
    #[error("malformed escape sequence: {0}")]
    MalformedEscape(String),
    #[error("empty key in `{0}`")]
    EmptyKey(String),
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || c == ',' || c == '=' || c == '"' || c == '\''
}

/// Read a raw (not-yet-decoded) token: a run of non-delimiter bytes, with
/// `\X` escape sequences passed through unchanged so `decode_escapes` can
/// process them afterward. Returns the raw token and the delimiter that
/// stopped it (peeked, not consumed), or `None` at end of input.
fn read_raw_token(chars: &mut Peekable<Chars<'_>>) -> (String, Option<char>) {
    let mut raw = String::new();
    loop {
        match chars.peek().copied() {
            None => return (raw, None),
            Some(c) if is_delimiter(c) => return (raw, Some(c)),
            Some('\\') => {
                raw.push(chars.next().unwrap());
                if let Some(escaped) = chars.next() {
                    raw.push(escaped);
                }
            }
            Some(c) => {
                raw.push(c);
                chars.next();
            }
        }
    }
}

/// Read raw content up to (and consuming) the matching unescaped `quote`.
/// Escapes are left undecoded in the returned buffer.
fn read_quoted_raw(chars: &mut Peekable<Chars<'_>>, quote: char) -> Result<String, ParamsError> {
    let mut raw = String::new();
    loop {
        match chars.next() {
            None => return Err(ParamsError::UnclosedQuote(raw)),
            Some('\\') => {
                raw.push('\\');
                if let Some(escaped) = chars.next() {
                    raw.push(escaped);
                }
            }
            Some(c) if c == quote => return Ok(raw),
            Some(c) => raw.push(c),
        }
    }
}

fn decode_unquoted(raw: &str) -> Result<String, ParamsError> {
    Ok(decode_escapes(raw)?.trim().to_string())
}

/// Parse a permissive key/value/positional argument string into `Params`.
pub fn parse_params(input: &str) -> Result<Params, ParamsError> {
    let mut params = Params::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() || c == ',' {
            chars.next();
            continue;
        }

        if c == '"' || c == '\'' {
            chars.next();
            let raw = read_quoted_raw(&mut chars, c)?;
            let value = decode_escapes(&raw)?;
            // A quoted token followed immediately by `=` is still a Named
            // value assignment only if it appeared after a key; a leading
            // quote starts a positional value.
            params.push_argument(value);
            continue;
        }

        let (raw, terminator) = read_raw_token(&mut chars);

        if terminator == Some('=') {
            chars.next(); // consume '='
            let key = raw.trim().to_lowercase();
            if key.is_empty() {
                return Err(ParamsError::EmptyKey(input.to_string()));
            }

            match chars.peek().copied() {
                None => params.ensure_key(&key),
                Some(next) if next.is_whitespace() || next == ',' => params.ensure_key(&key),
                Some('"') | Some('\'') => {
                    let quote = chars.next().unwrap();
                    let value_raw = read_quoted_raw(&mut chars, quote)?;
                    let value = decode_escapes(&value_raw)?;
                    params.insert(&key, value);
                }
                Some(_) => {
                    let (value_raw, _) = read_raw_token(&mut chars);
                    let value = decode_unquoted(&value_raw)?;
                    params.insert(&key, value);
                }
            }
        } else {
            let value = decode_unquoted(&raw)?;
            params.push_argument(value);
        }
    }

    Ok(params)
}

/// When a caller submits a single `key=value` whose value contains
/// whitespace, commas, or quotes, wrap the value in double quotes before
/// reparsing (CLI convenience).
pub fn auto_quote(kv: &str) -> String {
    let Some((key, value)) = kv.split_once('=') else {
        return kv.to_string();
    };
    if value
        .chars()
        .any(|c| c.is_whitespace() || c == ',' || c == '"' || c == '\'')
    {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("{key}=\"{escaped}\"")
    } else {
        kv.to_string()
    }
}
