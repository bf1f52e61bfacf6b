//! This crate implements the lexical analysis phase of the compiler.

pub mod error;
pub mod token;
pub mod token_stream;
