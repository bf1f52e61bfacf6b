//! Contains the code related to the symbol binding pass of the compiler:
//! routine declarations are parsed and bound into a stack of nested lexical
//! scopes while their bodies are parsed into syntax trees.

use derive_more::From;
use enum_as_inner::EnumAsInner;
use lumenc_arena::ID;
use lumenc_base::source_file::Span;
use lumenc_syntax::syntax_tree::statement::CompoundStatement;

use crate::{table::Scope, ty::Type};

pub mod error;
pub mod table;
pub mod ty;

/// The kind of a routine declaration, selected by its leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoutineKind {
    /// The top-level compilation unit.
    Program,

    /// A routine without a return value.
    Procedure,

    /// A routine with a return value.
    Function,
}

/// The lifecycle state of a routine name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoutineCode {
    /// The entry was just created and carries no declaration yet.
    Unset,

    /// The header was parsed but the body is deferred to a later
    /// declaration.
    Forward,

    /// The routine is fully declared; its body is present. This state is
    /// terminal.
    Declared,
}

/// Represents one declared or forwarded routine name.
#[derive(Debug, Clone)]
pub struct Routine {
    /// The case-folded name of the routine.
    pub name: String,

    /// The span of the name at its first occurrence, absent for placeholder
    /// names.
    pub name_span: Option<Span>,

    /// The kind of the routine.
    pub kind: RoutineKind,

    /// The lifecycle state of the routine.
    pub code: RoutineCode,

    /// The scope owning the routine's local names.
    ///
    /// The scope is created once, on first sight of the name, and is shared
    /// by the forward occurrence and its later defining occurrence.
    pub scope_id: Option<ID<Scope>>,

    /// The parameters of the routine, in declaration order.
    pub parameter_ids: Vec<ID<Variable>>,

    /// The return type of the routine, present only for functions.
    pub return_type: Option<Type>,

    /// The declared (non-forward) routines nested in this routine, in
    /// declaration order.
    ///
    /// A forward-only entry never appears in this list.
    pub routine_ids: Vec<ID<Routine>>,

    /// The body of the routine, present if and only if
    /// [`Self::code`] is [`RoutineCode::Declared`].
    pub body: Option<CompoundStatement>,
}

/// The kind of a variable symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VariableKind {
    /// A variable declared in a `var` section.
    Variable,

    /// A parameter passed by value.
    ValueParameter,

    /// A parameter passed by reference, declared with `var`.
    VarParameter,
}

/// Represents a variable or parameter symbol.
#[derive(Debug, Clone)]
pub struct Variable {
    /// The case-folded name of the variable.
    pub name: String,

    /// The span of the name at its declaration.
    pub name_span: Option<Span>,

    /// The type of the variable.
    pub ty: Type,

    /// The kind of the variable.
    pub kind: VariableKind,
}

/// Is an enumeration of IDs of the symbols that can be named in a scope.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, From,
)]
#[allow(missing_docs)]
pub enum SymbolID {
    Routine(ID<Routine>),
    Variable(ID<Variable>),
}
