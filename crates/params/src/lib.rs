//! Parameter store (`Params`) and the command-line argument grammar.

pub mod escapes;
pub mod grammar;
pub mod store;

pub use grammar::{auto_quote, parse_params, ParamsError};
pub use store::{Params, ARGUMENTS};
