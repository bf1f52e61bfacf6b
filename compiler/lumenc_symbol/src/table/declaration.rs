//! Contains the routine declaration parsing core of the compiler.
//!
//! [`Table::parse_routine_declaration`] recognizes program, procedure, and
//! function declarations, resolves forward declarations, and binds each
//! declared routine into the stack of nested lexical scopes while its body
//! is parsed into a syntax tree.

use lumenc_arena::ID;
use lumenc_base::{handler, source_file::Span};
use lumenc_lexical::token::{Identifier, KeywordKind, Token};
use lumenc_syntax::{
    parser::Parser,
    syntax_tree::{statement::CompoundStatement, ConnectedList},
};

use super::{Error, Handler, Result, Table};
use crate::{
    error::{
        AlreadyForwarded, IdentifierRedefined, MissingPeriod, MissingSemicolon,
    },
    ty::Type,
    Routine, RoutineCode, RoutineKind, SymbolID, Variable, VariableKind,
};

/// Routes an error to the one [`handler::Handler`] implementation selected
/// by the error type; a direct method call on the [`Handler`] supertrait
/// would be ambiguous between its bounds.
fn receive<E>(handler: &impl handler::Handler<E>, error: E) {
    handler.receive(error);
}

impl Table {
    /// Parses a complete program: a routine declaration followed by the
    /// terminating `.`.
    ///
    /// # Errors
    /// Returns [`Error`] when a collaborating parser fails beyond recovery;
    /// the diagnostics explaining the failure were reported to the handler.
    pub fn parse_program(
        &mut self,
        parser: &mut Parser,
        handler: &impl Handler,
    ) -> Result<ID<Routine>> {
        let program_id = self.parse_routine_declaration(parser, None, handler)?;

        match parser.stop_at_significant() {
            Some(Token::Punctuation(period)) if period.punctuation == '.' => {
                parser.forward();
            }
            found => receive(
                handler,
                crate::error::Error::MissingPeriod(MissingPeriod {
                    found: found.cloned(),
                }),
            ),
        }

        Ok(program_id)
    }

    /// Parses one routine declaration and returns the entry of the declared
    /// routine's name.
    ///
    /// The leading `program`, `procedure`, or `function` keyword selects the
    /// kind of the routine; a missing keyword means the top-level
    /// compilation unit. The routine's scope is pushed while the header and
    /// the body are parsed and popped again before returning, on every
    /// recoverable path.
    ///
    /// The returned entry is either fully declared (its body attached) or
    /// forwarded (its body deferred to a later declaration of the same
    /// name). A routine is appended to `parent_id`'s nested routines exactly
    /// when it stops being forward-pending.
    ///
    /// # Errors
    /// Returns [`Error`] when a collaborating parser fails beyond recovery.
    /// No scope balance is guaranteed in that case; the whole parse is
    /// expected to be abandoned.
    pub fn parse_routine_declaration(
        &mut self,
        parser: &mut Parser,
        parent_id: Option<ID<Routine>>,
        handler: &impl Handler,
    ) -> Result<ID<Routine>> {
        // dispatch on the leading keyword
        let (kind, dummy_name) = match parser.stop_at_significant() {
            Some(Token::Keyword(keyword))
                if keyword.keyword == KeywordKind::Program =>
            {
                parser.forward();
                (RoutineKind::Program, "dummyprogramname".to_owned())
            }
            Some(Token::Keyword(keyword))
                if keyword.keyword == KeywordKind::Procedure =>
            {
                parser.forward();
                (
                    RoutineKind::Procedure,
                    format!(
                        "dummyprocedurename_{:03}",
                        self.next_dummy_number()
                    ),
                )
            }
            Some(Token::Keyword(keyword))
                if keyword.keyword == KeywordKind::Function =>
            {
                parser.forward();
                (
                    RoutineKind::Function,
                    format!("dummyfunctionname_{:03}", self.next_dummy_number()),
                )
            }
            _ => (RoutineKind::Program, "dummyprogramname".to_owned()),
        };

        // resolve the routine name and stamp the kind
        let routine_id = self.resolve_routine_name(parser, dummy_name, handler);
        self.routines[routine_id].kind = kind;

        // push the routine's scope; the defining occurrence of a forwarded
        // routine reuses the scope created at the forward declaration
        let forwarded = self.routines[routine_id].code == RoutineCode::Forward;
        if forwarded {
            let scope_id = self.routines[routine_id]
                .scope_id
                .expect("a forwarded routine always owns a scope");
            self.push_scope(scope_id);
        } else {
            let scope_id = self.push_new_scope();
            self.routines[routine_id].scope_id = Some(scope_id);
        }

        // the first program entry becomes the program-level entry of the
        // whole table
        if kind == RoutineKind::Program && self.program_id.is_none() {
            self.program_id = Some(routine_id);
        }

        // a forwarded routine already fixed its signature, so no header is
        // expected; parse it anyway if it is there to keep the token stream
        // synchronized
        if forwarded {
            if !matches!(
                parser.stop_at_significant(),
                Some(Token::Punctuation(punctuation))
                    if punctuation.punctuation == ';'
            ) {
                receive(
                    handler,
                    crate::error::Error::AlreadyForwarded(AlreadyForwarded {
                        routine_name: self.routines[routine_id].name.clone(),
                        found: parser.stop_at_significant().cloned(),
                    }),
                );
                self.parse_routine_header(parser, routine_id, false, handler)?;
            }
        } else {
            self.parse_routine_header(parser, routine_id, true, handler)?;
        }

        // the header is terminated by a semicolon; tolerate redundant
        // repeats, and keep going from the current token when it is absent
        match parser.stop_at_significant() {
            Some(Token::Punctuation(punctuation))
                if punctuation.punctuation == ';' =>
            {
                parser.forward();

                while matches!(
                    parser.stop_at_significant(),
                    Some(Token::Punctuation(punctuation))
                        if punctuation.punctuation == ';'
                ) {
                    parser.forward();
                }
            }
            found => receive(
                handler,
                crate::error::Error::MissingSemicolon(MissingSemicolon {
                    found: found.cloned(),
                }),
            ),
        }

        // either the `forward` directive or the routine's body follows
        match parser.stop_at_significant() {
            Some(Token::Identifier(identifier))
                if identifier.span.str().eq_ignore_ascii_case("forward") =>
            {
                parser.forward();
                self.routines[routine_id].code = RoutineCode::Forward;
            }
            _ => {
                self.routines[routine_id].code = RoutineCode::Declared;

                // the routine joins its parent's subroutine list exactly
                // when it stops being forward-pending
                if kind != RoutineKind::Program {
                    if let Some(parent_id) = parent_id {
                        self.routines[parent_id].routine_ids.push(routine_id);
                    }
                }

                let body = self.parse_block(parser, routine_id, handler)?;
                self.routines[routine_id].body = Some(body);
            }
        }

        // balance the push performed above
        self.pop_scope();

        Ok(routine_id)
    }

    /// Resolves the name of a routine declaration to its symbol entry.
    ///
    /// An existing entry is reused only when it is a forwarded routine; any
    /// other existing binding is a redefinition. When no identifier can be
    /// read or the name is redefined, an entry under the given placeholder
    /// name is created instead.
    fn resolve_routine_name(
        &mut self,
        parser: &mut Parser,
        dummy_name: String,
        handler: &impl Handler,
    ) -> ID<Routine> {
        let mut routine_id = None;

        match parser.stop_at_significant() {
            Some(Token::Identifier(identifier)) => {
                parser.forward();
                let name = identifier.span.str().to_lowercase();

                match self.lookup_local(&name) {
                    // not yet declared locally: enter a fresh entry
                    None => {
                        routine_id = Some(self.enter_routine(
                            name,
                            Some(identifier.span.clone()),
                        ));
                    }

                    // the defining occurrence of a forwarded routine shares
                    // the entry of the forward occurrence
                    Some(SymbolID::Routine(id))
                        if self.routines[id].code == RoutineCode::Forward =>
                    {
                        routine_id = Some(id);
                    }

                    // anything else is a redefinition
                    Some(previous) => {
                        receive(
                            handler,
                            crate::error::Error::IdentifierRedefined(
                                IdentifierRedefined {
                                    name,
                                    span: identifier.span.clone(),
                                    previous_span: self
                                        .symbol_name_span(previous),
                                },
                            ),
                        );
                    }
                }
            }

            // no identifier to read; the error is flagged without consuming
            // the offending token
            _ => {
                let _ = parser.parse_identifier(handler);
            }
        }

        // fall back to an entry under the placeholder name
        routine_id.unwrap_or_else(|| self.enter_routine(dummy_name, None))
    }

    /// Parses the formal parameter list and, for functions, the return type
    /// annotation of a routine header.
    ///
    /// With `bind` set, the parameters are entered into the routine's scope
    /// and recorded on its entry; otherwise the header is parsed for token
    /// stream synchronization only and nothing is overwritten.
    fn parse_routine_header(
        &mut self,
        parser: &mut Parser,
        routine_id: ID<Routine>,
        bind: bool,
        handler: &impl Handler,
    ) -> Result<()> {
        if matches!(
            parser.stop_at_significant(),
            Some(Token::Punctuation(punctuation))
                if punctuation.punctuation == '('
        ) {
            let Some(parameters) = parser.parse_formal_parameters(handler)
            else {
                return Err(Error);
            };

            if bind {
                for group in parameters
                    .parameter_groups()
                    .iter()
                    .flat_map(ConnectedList::elements)
                {
                    let kind = if group.var_keyword().is_some() {
                        VariableKind::VarParameter
                    } else {
                        VariableKind::ValueParameter
                    };
                    let ty = Type::from_name(
                        group.type_specifier().identifier().span.str(),
                    );

                    for identifier in group.identifiers().elements() {
                        if let Some(variable_id) = self.bind_variable(
                            identifier,
                            ty.clone(),
                            kind,
                            handler,
                        ) {
                            self.routines[routine_id]
                                .parameter_ids
                                .push(variable_id);
                        }
                    }
                }
            }
        }

        // functions carry a return type annotation
        if self.routines[routine_id].kind == RoutineKind::Function {
            let annotation = parser.parse_return_type_annotation(handler);

            if bind {
                self.routines[routine_id].return_type =
                    annotation.map(|annotation| {
                        Type::from_name(
                            annotation.type_specifier().identifier().span.str(),
                        )
                    });
            }
        }

        Ok(())
    }

    /// Parses the block of a routine: its `var` sections and nested routine
    /// declarations followed by its compound statement.
    ///
    /// Nested routine declarations recurse into
    /// [`Self::parse_routine_declaration`] with this routine as the parent.
    fn parse_block(
        &mut self,
        parser: &mut Parser,
        routine_id: ID<Routine>,
        handler: &impl Handler,
    ) -> Result<CompoundStatement> {
        // variable declaration sections
        while matches!(
            parser.stop_at_significant(),
            Some(Token::Keyword(keyword))
                if keyword.keyword == KeywordKind::Var
        ) {
            let Some(section) = parser.parse_var_section(handler) else {
                return Err(Error);
            };

            for declaration in section.declarations() {
                let ty = Type::from_name(
                    declaration.type_specifier().identifier().span.str(),
                );

                for identifier in declaration.identifiers().elements() {
                    self.bind_variable(
                        identifier,
                        ty.clone(),
                        VariableKind::Variable,
                        handler,
                    );
                }
            }
        }

        // nested routine declarations, each followed by its separating
        // semicolons
        while matches!(
            parser.stop_at_significant(),
            Some(Token::Keyword(keyword))
                if matches!(
                    keyword.keyword,
                    KeywordKind::Procedure | KeywordKind::Function
                )
        ) {
            self.parse_routine_declaration(parser, Some(routine_id), handler)?;

            while matches!(
                parser.stop_at_significant(),
                Some(Token::Punctuation(punctuation))
                    if punctuation.punctuation == ';'
            ) {
                parser.forward();
            }
        }

        // the compound statement of the routine
        parser.parse_compound_statement(handler).ok_or(Error)
    }

    /// Enters a fresh routine entry under the given name into the current
    /// scope, with its lifecycle state unset.
    fn enter_routine(
        &mut self,
        name: String,
        name_span: Option<Span>,
    ) -> ID<Routine> {
        let routine_id = self.routines.insert(Routine {
            name: name.clone(),
            name_span,
            kind: RoutineKind::Program,
            code: RoutineCode::Unset,
            scope_id: None,
            parameter_ids: Vec::new(),
            return_type: None,
            routine_ids: Vec::new(),
            body: None,
        });

        let scope_id = self
            .current_scope_id()
            .expect("the table always holds the global scope");
        self.scopes[scope_id].insert(name, SymbolID::Routine(routine_id));

        routine_id
    }

    /// Enters a variable symbol into the current scope, flagging a
    /// redefinition of a locally bound name.
    fn bind_variable(
        &mut self,
        identifier: &Identifier,
        ty: Type,
        kind: VariableKind,
        handler: &impl Handler,
    ) -> Option<ID<Variable>> {
        let name = identifier.span.str().to_lowercase();

        if let Some(previous) = self.lookup_local(&name) {
            receive(
                handler,
                crate::error::Error::IdentifierRedefined(IdentifierRedefined {
                    name,
                    span: identifier.span.clone(),
                    previous_span: self.symbol_name_span(previous),
                }),
            );
            return None;
        }

        let variable_id = self.variables.insert(Variable {
            name: name.clone(),
            name_span: Some(identifier.span.clone()),
            ty,
            kind,
        });

        let scope_id = self
            .current_scope_id()
            .expect("the table always holds the global scope");
        self.scopes[scope_id].insert(name, SymbolID::Variable(variable_id));

        Some(variable_id)
    }

    fn symbol_name_span(&self, id: SymbolID) -> Option<Span> {
        match id {
            SymbolID::Routine(id) => self.routines[id].name_span.clone(),
            SymbolID::Variable(id) => self.variables[id].name_span.clone(),
        }
    }
}
