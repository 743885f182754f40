//! The parsed body entity: an ordered sequence of text and slash-command blocks.

use context_engine_params::{parse_params, Params, ParamsError};

/// One argument exactly as it appeared in the source line: either
/// `key=value` or a bare positional term (quoting preserved verbatim).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub raw: String,
}

/// A `/name arg1 arg2=value` invocation occupying exactly one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlashCommand {
    pub leading_whitespace: String,
    pub name: String,
    pub arguments: Vec<Argument>,
    /// Exact source text of the line, including its line terminator (if
    /// any): this is what makes round-tripping trivial and exact.
    pub raw: String,
}

impl SlashCommand {
    /// Arguments re-joined with single spaces, ready to be re-parsed
    /// through the params grammar.
    pub fn argument_string(&self) -> String {
        self.arguments
            .iter()
            .map(|a| a.raw.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Re-parse this command's arguments through the params grammar.
    pub fn effective_params(&self) -> Result<Params, ParamsError> {
        parse_params(&self.argument_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Text(String),
    SlashCommand(SlashCommand),
}

impl Block {
    fn raw_text(&self) -> &str {
        match self {
            Block::Text(text) => text,
            Block::SlashCommand(cmd) => &cmd.raw,
        }
    }
}

/// A parsed task (or command/rule/prompt) body: an ordered sequence of blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Task {
    pub blocks: Vec<Block>,
}

impl Task {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for block in &self.blocks {
            f.write_str(block.raw_text())?;
        }
        Ok(())
    }
}
