//! Tokenizes a body into text blocks and slash-command invocations.
//!
//! `Input := Block*`; `Block := SlashCommand | Text`.
//! `SlashCommand := Whitespace? '/' Term (Whitespace Argument)* Whitespace? Newline?`
//! — requires `/` at line start (possibly after horizontal whitespace); a
//! non-whitespace byte before the `/` keeps it inside the surrounding text.

use crate::types::{Argument, Block, SlashCommand, Task};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("slash command has no name")]
    EmptyCommandName,
    #[error("unclosed string literal in slash-command arguments")]
    UnclosedString,
}

fn is_horizontal_ws(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Split `line` (no terminator) into leading whitespace, command name, and
/// raw argument slices.
fn parse_command_content(content: &str) -> Result<SlashCommand, TaskError> {
    let bytes = content.as_bytes();
    let mut idx = 0usize;

    let ws_start = idx;
    while idx < bytes.len() && is_horizontal_ws(bytes[idx]) {
        idx += 1;
    }
    let leading_whitespace = content[ws_start..idx].to_string();

    debug_assert_eq!(bytes[idx], b'/');
    idx += 1;

    let name_start = idx;
    while idx < bytes.len() && !is_horizontal_ws(bytes[idx]) {
        idx += 1;
    }
    let name = content[name_start..idx].to_string();
    if name.is_empty() {
        return Err(TaskError::EmptyCommandName);
    }

    let mut arguments = Vec::new();
    loop {
        let sep_start = idx;
        while idx < bytes.len() && is_horizontal_ws(bytes[idx]) {
            idx += 1;
        }
        if idx == sep_start || idx >= bytes.len() {
            break;
        }

        let arg_start = idx;
        let mut cursor = idx;
        while cursor < bytes.len()
            && !is_horizontal_ws(bytes[cursor])
            && bytes[cursor] != b'='
            && bytes[cursor] != b'"'
        {
            cursor += 1;
        }

        if cursor < bytes.len() && bytes[cursor] == b'=' {
            cursor += 1; // consume '='
            if cursor < bytes.len() && bytes[cursor] == b'"' {
                cursor = scan_quoted(bytes, cursor)?;
            } else {
                while cursor < bytes.len() && !is_horizontal_ws(bytes[cursor]) {
                    cursor += 1;
                }
            }
        } else if cursor < bytes.len() && bytes[cursor] == b'"' {
            cursor = scan_quoted(bytes, cursor)?;
        }

        arguments.push(Argument {
            raw: content[arg_start..cursor].to_string(),
        });
        idx = cursor;
    }

    Ok(SlashCommand {
        leading_whitespace,
        name,
        arguments,
        raw: String::new(),
    })
}

/// `bytes[quote_pos]` is the opening `"`; scan to just past the matching
/// unescaped closing quote, returning the new cursor position.
fn scan_quoted(bytes: &[u8], quote_pos: usize) -> Result<usize, TaskError> {
    let mut cursor = quote_pos + 1;
    loop {
        if cursor >= bytes.len() {
            return Err(TaskError::UnclosedString);
        }
        if bytes[cursor] == b'\\' && cursor + 1 < bytes.len() {
            cursor += 2;
            continue;
        }
        if bytes[cursor] == b'"' {
            return Ok(cursor + 1);
        }
        cursor += 1;
    }
}

/// Parse a body string into an ordered sequence of blocks.
pub fn parse_task(body: &str) -> Result<Task, TaskError> {
    if body.trim().is_empty() {
        return Ok(Task::default());
    }

    let mut blocks = Vec::new();
    let mut text_buffer = String::new();
    let mut rest = body;

    while !rest.is_empty() {
        let newline_pos = rest.find('\n');
        let (line_with_terminator, remainder) = match newline_pos {
            Some(pos) => (&rest[..=pos], &rest[pos + 1..]),
            None => (rest, ""),
        };
        let terminator_len = if line_with_terminator.ends_with("\r\n") {
            2
        } else if line_with_terminator.ends_with('\n') {
            1
        } else {
            0
        };
        let content = &line_with_terminator[..line_with_terminator.len() - terminator_len];
        let trimmed_start = content.trim_start_matches([' ', '\t']);

        if trimmed_start.starts_with('/') {
            if !text_buffer.is_empty() {
                blocks.push(Block::Text(std::mem::take(&mut text_buffer)));
            }
            let mut command = parse_command_content(content)?;
            command.raw = line_with_terminator.to_string();
            blocks.push(Block::SlashCommand(command));
        } else {
            text_buffer.push_str(line_with_terminator);
        }

        rest = remainder;
    }

    if !text_buffer.is_empty() {
        blocks.push(Block::Text(text_buffer));
    }

    Ok(Task { blocks })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_plain_text() {
        let body = "line one\nline two\n";
        let task = parse_task(body).unwrap();
        assert_eq!(task.to_string(), body);
    }

    #[test]
    fn parses_slash_command_with_args() {
        let body = "/msg value=\"specific\" extra\n";
        let task = parse_task(body).unwrap();
        assert_eq!(task.blocks.len(), 1);
        match &task.blocks[0] {
            Block::SlashCommand(cmd) => {
                assert_eq!(cmd.name, "msg");
                assert_eq!(cmd.arguments.len(), 2);
                assert_eq!(cmd.arguments[0].raw, "value=\"specific\"");
                assert_eq!(cmd.arguments[1].raw, "extra");
            }
            _ => panic!("expected slash command"),
        }
        assert_eq!(task.to_string(), body);
    }

    #[test]
    fn slash_mid_line_stays_in_text() {
        let body = "see docs/guide.md for more\n";
        let task = parse_task(body).unwrap();
        assert_eq!(task.blocks.len(), 1);
        assert!(matches!(&task.blocks[0], Block::Text(_)));
        assert_eq!(task.to_string(), body);
    }

    #[test]
    fn indented_slash_command_is_recognized() {
        let body = "  /cmd arg\n";
        let task = parse_task(body).unwrap();
        match &task.blocks[0] {
            Block::SlashCommand(cmd) => assert_eq!(cmd.leading_whitespace, "  "),
            _ => panic!("expected slash command"),
        }
        assert_eq!(task.to_string(), body);
    }

    #[test]
    fn empty_input_is_empty_sequence() {
        let task = parse_task("").unwrap();
        assert!(task.is_empty());
        let task = parse_task("   \n  ").unwrap();
        assert!(task.is_empty());
    }

    #[test]
    fn mixed_text_and_commands_round_trip() {
        let body = "intro\n/one a=1\nmiddle text\n/two\ntrailing\n";
        let task = parse_task(body).unwrap();
        assert_eq!(task.to_string(), body);
        assert_eq!(task.blocks.len(), 4);
    }

    #[test]
    fn unclosed_string_is_error() {
        let body = "/cmd value=\"unterminated\n";
        assert!(parse_task(body).is_err());
    }
}
