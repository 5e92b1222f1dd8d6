#![allow(
    // Mark and Null are part of the value model but nothing on this surface
    // constructs them at runtime
    dead_code,
)]

mod builtin;
mod error;
mod interpreter;
mod lexer;
mod object;
mod operator;
mod parser;

pub use crate::{
    error::{PostScriptError, PostScriptResult},
    interpreter::PostscriptInterpreter,
};
