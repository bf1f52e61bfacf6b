//! This crate implements the syntactic analysis phase of the compiler.

pub mod error;
pub mod parser;
pub mod syntax_tree;
