//! Task-body grammar: tokenizes a markdown body into an ordered sequence of
//! text blocks and slash-command invocations, exactly round-trippable.

pub mod grammar;
pub mod types;

pub use grammar::{parse_task, TaskError};
pub use types::{Argument, Block, SlashCommand, Task};
