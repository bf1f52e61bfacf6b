//! The executable for the Lumen programming language.

use std::process::ExitCode;

use clap::Parser;
use lumenc_driver::Arguments;

fn main() -> ExitCode { lumenc_driver::run(Arguments::parse()) }
