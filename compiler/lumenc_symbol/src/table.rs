//! Contains the definition of [`Table`], the symbol table of the compiler.

use std::{collections::HashMap, sync::Arc};

use getset::{CopyGetters, Getters};
use lumenc_arena::{Arena, ID};
use lumenc_base::{handler, source_file::SourceFile};
use lumenc_lexical::token_stream::TokenStream;
use lumenc_syntax::parser::Parser;

use crate::{error, Routine, SymbolID, Variable};

mod declaration;

#[cfg(test)]
mod tests;

/// Represents a single lexical scope: the symbol table of one routine's
/// local names.
#[derive(Debug, Clone, Default, Getters, CopyGetters)]
pub struct Scope {
    /// Maps the case-folded name of a symbol to its ID.
    #[get = "pub"]
    symbol_ids_by_name: HashMap<String, SymbolID>,

    /// The nesting level of the scope; the scope holding the program name
    /// itself is at level 0.
    #[get_copy = "pub"]
    nesting_level: usize,
}

impl Scope {
    /// Looks a name up in this scope alone, case-insensitively.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<SymbolID> {
        self.symbol_ids_by_name.get(&name.to_lowercase()).copied()
    }

    fn insert(&mut self, name: String, id: SymbolID) {
        self.symbol_ids_by_name.insert(name, id);
    }
}

/// Represents the symbol table of one parsing session.
///
/// The table bundles the state that the routine declaration parsing threads
/// through its recursion: the arena of scopes with the stack of the ones
/// currently open, the routine and variable symbols, the program-level
/// entry, and the counter used to synthesize placeholder routine names.
#[derive(Debug, Getters, CopyGetters)]
pub struct Table {
    /// The scopes created so far; the stack references them by ID.
    #[get = "pub"]
    scopes: Arena<Scope>,

    /// The routine symbols created so far.
    #[get = "pub"]
    routines: Arena<Routine>,

    /// The variable symbols created so far.
    #[get = "pub"]
    variables: Arena<Variable>,

    /// The entry of the program-level routine, set at most once per
    /// compilation unit.
    #[get_copy = "pub"]
    program_id: Option<ID<Routine>>,

    scope_stack: Vec<ID<Scope>>,
    dummy_counter: usize,
}

impl Default for Table {
    fn default() -> Self { Self::new() }
}

impl Table {
    /// Creates a new table containing only the global scope that the program
    /// name itself is bound in.
    #[must_use]
    pub fn new() -> Self {
        let mut table = Self {
            scopes: Arena::new(),
            routines: Arena::new(),
            variables: Arena::new(),
            program_id: None,
            scope_stack: Vec::new(),
            dummy_counter: 0,
        };

        table.push_new_scope();
        table
    }

    /// Tokenizes and parses the given source file as a complete program.
    ///
    /// The returned table holds every symbol created during the parse even
    /// when the parse itself failed.
    pub fn build(
        source_file: Arc<SourceFile>,
        handler: &impl Handler,
    ) -> (Self, Result<ID<Routine>>) {
        let token_stream = TokenStream::tokenize(source_file, handler);
        let mut parser = Parser::new(&token_stream);

        let mut table = Self::new();
        let result = table.parse_program(&mut parser, handler);

        (table, result)
    }

    /// Gets the number of scopes currently on the scope stack.
    #[must_use]
    pub fn scope_depth(&self) -> usize { self.scope_stack.len() }

    /// Gets the ID of the scope at the top of the scope stack.
    #[must_use]
    pub fn current_scope_id(&self) -> Option<ID<Scope>> {
        self.scope_stack.last().copied()
    }

    /// Creates a fresh scope and pushes it onto the scope stack.
    pub fn push_new_scope(&mut self) -> ID<Scope> {
        let scope_id = self.scopes.insert(Scope {
            symbol_ids_by_name: HashMap::new(),
            nesting_level: self.scope_stack.len(),
        });
        self.scope_stack.push(scope_id);

        scope_id
    }

    /// Pushes an existing scope back onto the scope stack.
    ///
    /// This is how the defining occurrence of a forwarded routine reuses the
    /// scope created at the forward declaration.
    pub fn push_scope(&mut self, scope_id: ID<Scope>) {
        self.scope_stack.push(scope_id);
    }

    /// Pops the scope at the top of the scope stack.
    pub fn pop_scope(&mut self) -> Option<ID<Scope>> { self.scope_stack.pop() }

    /// Looks a name up in the scope at the top of the scope stack,
    /// case-insensitively.
    #[must_use]
    pub fn lookup_local(&self, name: &str) -> Option<SymbolID> {
        self.current_scope_id()
            .and_then(|scope_id| self.scopes[scope_id].lookup(name))
    }

    /// Looks a name up through the whole scope stack, innermost scope
    /// first, case-insensitively.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<SymbolID> {
        self.scope_stack
            .iter()
            .rev()
            .find_map(|scope_id| self.scopes[*scope_id].lookup(name))
    }

    fn next_dummy_number(&mut self) -> usize {
        self.dummy_counter += 1;
        self.dummy_counter
    }
}

/// Is an error that occurs when encountering a fatal error that cannot be
/// recovered.
///
/// The errors that caused the failure were reported to the handler.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error,
)]
#[error("encountered a fatal error that cannot be recovered")]
pub struct Error;

/// Is a result type returned by the parsing methods of the [`Table`].
pub type Result<T> = std::result::Result<T, Error>;

/// A supertrait for the handlers that are required to parse a full program:
/// one that handles the lexical, the syntactic, and the binding errors.
pub trait Handler:
    handler::Handler<lumenc_lexical::error::Error>
    + handler::Handler<lumenc_syntax::error::Error>
    + handler::Handler<error::Error>
{
}

impl<
        T: handler::Handler<lumenc_lexical::error::Error>
            + handler::Handler<lumenc_syntax::error::Error>
            + handler::Handler<error::Error>,
    > Handler for T
{
}
