//! Contains the main `run()` function for the compiler.

use std::{
    fs::File,
    path::PathBuf,
    process::ExitCode,
    sync::{Arc, RwLock},
};

use lumenc_base::{
    diagnostic::Report,
    handler::Handler,
    log::{Message, Severity},
    source_file::SourceFile,
};
use lumenc_symbol::table::Table;

/// The arguments to the program.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::Parser)]
#[clap(name = "lumenc", about = "The Lumen programming language compiler")]
pub struct Arguments {
    /// The input file to compile.
    pub file: PathBuf,
}

/// A struct that implements [`Handler`] by printing all the diagnostics to
/// the standard error stream.
#[derive(Debug)]
struct Printer {
    printed: RwLock<bool>,
}

impl Printer {
    /// Creates a new [`Printer`].
    const fn new() -> Self { Self { printed: RwLock::new(false) } }

    fn has_printed(&self) -> bool { *self.printed.read().unwrap() }
}

impl<E: Report + Send + Sync> Handler<E> for Printer {
    fn receive(&self, error: E) {
        // a condition with no reportable source position still fails the run
        if let Some(diagnostic) = error.report() {
            eprintln!("{diagnostic}\n");
        }

        *self.printed.write().unwrap() = true;
    }
}

/// Runs the compiler with the given arguments.
#[must_use]
pub fn run(arguments: Arguments) -> ExitCode {
    let file = match File::open(&arguments.file) {
        Ok(file) => file,
        Err(error) => {
            let msg = Message::new(
                Severity::Error,
                format!("{}: {error}", arguments.file.display()),
            );

            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let source_file = match SourceFile::load(file, arguments.file.clone()) {
        Ok(source_file) => Arc::new(source_file),
        Err(error) => {
            let msg = Message::new(
                Severity::Error,
                format!("{}: {error}", arguments.file.display()),
            );

            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let printer = Printer::new();
    let (table, result) = Table::build(source_file, &printer);

    let Ok(program_id) = result else {
        return ExitCode::FAILURE;
    };

    if printer.has_printed() {
        return ExitCode::FAILURE;
    }

    let msg = Message::new(
        Severity::Info,
        format!(
            "parsed program `{}` containing {} routine(s)",
            table.routines()[program_id].name,
            table.routines().len(),
        ),
    );
    println!("{msg}");

    ExitCode::SUCCESS
}
