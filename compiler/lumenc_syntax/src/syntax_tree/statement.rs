//! Contains all definition of statement syntax trees.

use derive_more::From;
use enum_as_inner::EnumAsInner;
use getset::Getters;
use lumenc_base::{
    handler::Handler,
    source_file::{SourceElement, Span},
};
use lumenc_lexical::token::{Identifier, Keyword, KeywordKind, Punctuation, Token};

use super::expression::Expression;
use crate::{
    error::{self, KeywordExpected, PunctuationExpected, StatementExpected},
    parser::Parser,
};

/// Syntax Synopsis:
/// ``` txt
/// Statement:
///     CompoundStatement
///     | Assignment
///     | If
///     | While
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Statement {
    Compound(CompoundStatement),
    Assignment(Assignment),
    If(If),
    While(While),
}

impl SourceElement for Statement {
    fn span(&self) -> Span {
        match self {
            Self::Compound(statement) => statement.span(),
            Self::Assignment(statement) => statement.span(),
            Self::If(statement) => statement.span(),
            Self::While(statement) => statement.span(),
        }
    }
}

/// Syntax Synopsis:
/// ``` txt
/// CompoundStatement:
///     'begin' (Statement (';' Statement)*)? 'end'
///     ;
/// ```
///
/// Redundant semicolons between the statements are tolerated.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct CompoundStatement {
    /// The `begin` keyword opening the block.
    #[get = "pub"]
    begin_keyword: Keyword,

    /// The statements of the block, in source order.
    #[get = "pub"]
    statements: Vec<Statement>,

    /// The `end` keyword closing the block.
    #[get = "pub"]
    end_keyword: Keyword,
}

impl SourceElement for CompoundStatement {
    fn span(&self) -> Span {
        self.begin_keyword.span.join(&self.end_keyword.span).unwrap()
    }
}

/// Syntax Synopsis:
/// ``` txt
/// Assign:
///     ':' '='
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Assign {
    /// The colon of the `:=` compound.
    #[get = "pub"]
    colon: Punctuation,

    /// The equals sign of the `:=` compound.
    #[get = "pub"]
    equals: Punctuation,
}

impl SourceElement for Assign {
    fn span(&self) -> Span { self.colon.span.join(&self.equals.span).unwrap() }
}

/// Syntax Synopsis:
/// ``` txt
/// Assignment:
///     Identifier Assign Expression
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Assignment {
    /// The variable being assigned to.
    #[get = "pub"]
    variable: Identifier,

    /// The `:=` compound.
    #[get = "pub"]
    assign: Assign,

    /// The expression whose value is assigned to the variable.
    #[get = "pub"]
    expression: Expression,
}

impl SourceElement for Assignment {
    fn span(&self) -> Span {
        self.variable.span.join(&self.expression.span()).unwrap()
    }
}

/// Syntax Synopsis:
/// ``` txt
/// Else:
///     'else' Statement
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Else {
    /// The `else` keyword.
    #[get = "pub"]
    else_keyword: Keyword,

    /// The statement executed when the condition is false.
    #[get = "pub"]
    statement: Box<Statement>,
}

impl SourceElement for Else {
    fn span(&self) -> Span {
        self.else_keyword.span.join(&self.statement.span()).unwrap()
    }
}

/// Syntax Synopsis:
/// ``` txt
/// If:
///     'if' Expression 'then' Statement Else?
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct If {
    /// The `if` keyword.
    #[get = "pub"]
    if_keyword: Keyword,

    /// The condition of the statement.
    #[get = "pub"]
    condition: Expression,

    /// The `then` keyword.
    #[get = "pub"]
    then_keyword: Keyword,

    /// The statement executed when the condition is true.
    #[get = "pub"]
    then_statement: Box<Statement>,

    /// The optional else portion of the statement.
    #[get = "pub"]
    else_portion: Option<Else>,
}

impl SourceElement for If {
    fn span(&self) -> Span {
        let end = self.else_portion.as_ref().map_or_else(
            || self.then_statement.span(),
            SourceElement::span,
        );

        self.if_keyword.span.join(&end).unwrap()
    }
}

/// Syntax Synopsis:
/// ``` txt
/// While:
///     'while' Expression 'do' Statement
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct While {
    /// The `while` keyword.
    #[get = "pub"]
    while_keyword: Keyword,

    /// The condition of the loop.
    #[get = "pub"]
    condition: Expression,

    /// The `do` keyword.
    #[get = "pub"]
    do_keyword: Keyword,

    /// The statement executed while the condition holds.
    #[get = "pub"]
    statement: Box<Statement>,
}

impl SourceElement for While {
    fn span(&self) -> Span {
        self.while_keyword.span.join(&self.statement.span()).unwrap()
    }
}

impl<'a> Parser<'a> {
    /// Parses a [`Statement`].
    pub fn parse_statement(
        &mut self,
        handler: &dyn Handler<error::Error>,
    ) -> Option<Statement> {
        match self.stop_at_significant() {
            Some(Token::Keyword(keyword))
                if keyword.keyword == KeywordKind::Begin =>
            {
                self.parse_compound_statement(handler)
                    .map(Statement::Compound)
            }
            Some(Token::Keyword(keyword))
                if keyword.keyword == KeywordKind::If =>
            {
                self.parse_if(handler).map(Statement::If)
            }
            Some(Token::Keyword(keyword))
                if keyword.keyword == KeywordKind::While =>
            {
                self.parse_while(handler).map(Statement::While)
            }
            Some(Token::Identifier(..)) => {
                self.parse_assignment(handler).map(Statement::Assignment)
            }
            found => {
                handler.receive(error::Error::StatementExpected(
                    StatementExpected { found: found.cloned() },
                ));
                None
            }
        }
    }

    /// Parses a [`CompoundStatement`].
    ///
    /// The parser recovers from a malformed statement by skipping to the next
    /// semicolon or the `end` keyword, and from a missing semicolon between
    /// two statements by reporting it and carrying on.
    pub fn parse_compound_statement(
        &mut self,
        handler: &dyn Handler<error::Error>,
    ) -> Option<CompoundStatement> {
        let begin_keyword = self.parse_keyword(KeywordKind::Begin, handler)?;
        let mut statements = Vec::new();

        let end_keyword = loop {
            match self.stop_at_significant() {
                Some(Token::Keyword(end_keyword))
                    if end_keyword.keyword == KeywordKind::End =>
                {
                    self.forward();
                    break end_keyword.clone();
                }

                // tolerate a redundant semicolon
                Some(Token::Punctuation(semicolon))
                    if semicolon.punctuation == ';' =>
                {
                    self.forward();
                    continue;
                }

                None => {
                    handler.receive(error::Error::KeywordExpected(
                        KeywordExpected {
                            expected: KeywordKind::End,
                            found: None,
                        },
                    ));
                    return None;
                }

                _ => (),
            }

            let Some(statement) = self.parse_statement(handler) else {
                // skip to the next semicolon or the end of the block
                let _ = self.stop_at(|token| {
                    matches!(
                        token,
                        Token::Punctuation(punctuation)
                            if punctuation.punctuation == ';'
                    ) || matches!(
                        token,
                        Token::Keyword(keyword)
                            if keyword.keyword == KeywordKind::End
                    )
                });
                continue;
            };

            statements.push(statement);

            // a semicolon must separate the statement from the next one
            match self.stop_at_significant() {
                Some(Token::Punctuation(semicolon))
                    if semicolon.punctuation == ';' =>
                {
                    self.forward();
                }
                Some(Token::Keyword(keyword))
                    if keyword.keyword == KeywordKind::End => {}
                found => {
                    handler.receive(error::Error::PunctuationExpected(
                        PunctuationExpected {
                            expected: ';',
                            found: found.cloned(),
                        },
                    ));
                }
            }
        };

        Some(CompoundStatement { begin_keyword, statements, end_keyword })
    }

    /// Parses an [`Assignment`].
    pub fn parse_assignment(
        &mut self,
        handler: &dyn Handler<error::Error>,
    ) -> Option<Assignment> {
        let variable = self.parse_identifier(handler)?;
        let colon = self.parse_punctuation(':', true, handler)?;
        let equals = self.parse_punctuation('=', false, handler)?;
        let expression = self.parse_expression(handler)?;

        Some(Assignment {
            variable,
            assign: Assign { colon, equals },
            expression,
        })
    }

    /// Parses an [`If`].
    pub fn parse_if(
        &mut self,
        handler: &dyn Handler<error::Error>,
    ) -> Option<If> {
        let if_keyword = self.parse_keyword(KeywordKind::If, handler)?;
        let condition = self.parse_expression(handler)?;
        let then_keyword = self.parse_keyword(KeywordKind::Then, handler)?;
        let then_statement = Box::new(self.parse_statement(handler)?);

        let else_portion = match self.stop_at_significant() {
            Some(Token::Keyword(else_keyword))
                if else_keyword.keyword == KeywordKind::Else =>
            {
                self.forward();
                Some(Else {
                    else_keyword: else_keyword.clone(),
                    statement: Box::new(self.parse_statement(handler)?),
                })
            }
            _ => None,
        };

        Some(If {
            if_keyword,
            condition,
            then_keyword,
            then_statement,
            else_portion,
        })
    }

    /// Parses a [`While`].
    pub fn parse_while(
        &mut self,
        handler: &dyn Handler<error::Error>,
    ) -> Option<While> {
        let while_keyword = self.parse_keyword(KeywordKind::While, handler)?;
        let condition = self.parse_expression(handler)?;
        let do_keyword = self.parse_keyword(KeywordKind::Do, handler)?;
        let statement = Box::new(self.parse_statement(handler)?);

        Some(While { while_keyword, condition, do_keyword, statement })
    }
}
