//! Contains the syntax trees involved in routine and variable declarations
//! and their parsing functions.

use getset::Getters;
use lumenc_base::{
    handler::Handler,
    source_file::{SourceElement, Span},
};
use lumenc_lexical::token::{Identifier, Keyword, KeywordKind, Punctuation, Token};

use super::ConnectedList;
use crate::{
    error::{self, TypeSpecifierExpected},
    parser::Parser,
};

/// Syntax Synopsis:
/// ``` txt
/// TypeSpecifier:
///     Identifier
///     ;
/// ```
///
/// Type names are plain identifiers; the binding layer decides whether the
/// name denotes a primitive type.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct TypeSpecifier {
    /// The identifier that names the type.
    #[get = "pub"]
    identifier: Identifier,
}

impl SourceElement for TypeSpecifier {
    fn span(&self) -> Span { self.identifier.span.clone() }
}

/// Syntax Synopsis:
/// ``` txt
/// IdentifierList:
///     Identifier (',' Identifier)*
///     ;
/// ```
pub type IdentifierList = ConnectedList<Identifier, Punctuation>;

/// Syntax Synopsis:
/// ``` txt
/// FormalParameterGroup:
///     'var'? IdentifierList ':' TypeSpecifier
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct FormalParameterGroup {
    /// The keyword making the parameters of the group pass-by-reference.
    #[get = "pub"]
    var_keyword: Option<Keyword>,

    /// The names of the parameters in the group.
    #[get = "pub"]
    identifiers: IdentifierList,

    /// The colon separating the names from the type.
    #[get = "pub"]
    colon: Punctuation,

    /// The type shared by all the parameters of the group.
    #[get = "pub"]
    type_specifier: TypeSpecifier,
}

impl SourceElement for FormalParameterGroup {
    fn span(&self) -> Span {
        let start = self.var_keyword.as_ref().map_or_else(
            || self.identifiers.span(),
            |keyword| keyword.span.clone(),
        );

        start.join(&self.type_specifier.span()).unwrap()
    }
}

/// Syntax Synopsis:
/// ``` txt
/// FormalParameters:
///     '(' (FormalParameterGroup (';' FormalParameterGroup)*)? ')'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct FormalParameters {
    /// The opening parenthesis.
    #[get = "pub"]
    open_paren: Punctuation,

    /// The parameter groups, if any.
    #[get = "pub"]
    parameter_groups: Option<ConnectedList<FormalParameterGroup, Punctuation>>,

    /// The closing parenthesis.
    #[get = "pub"]
    close_paren: Punctuation,
}

impl SourceElement for FormalParameters {
    fn span(&self) -> Span {
        self.open_paren.span.join(&self.close_paren.span).unwrap()
    }
}

/// Syntax Synopsis:
/// ``` txt
/// ReturnTypeAnnotation:
///     ':' TypeSpecifier
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ReturnTypeAnnotation {
    /// The colon introducing the return type.
    #[get = "pub"]
    colon: Punctuation,

    /// The return type of the function.
    #[get = "pub"]
    type_specifier: TypeSpecifier,
}

impl SourceElement for ReturnTypeAnnotation {
    fn span(&self) -> Span {
        self.colon.span.join(&self.type_specifier.span()).unwrap()
    }
}

/// Syntax Synopsis:
/// ``` txt
/// VariableDeclaration:
///     IdentifierList ':' TypeSpecifier ';'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct VariableDeclaration {
    /// The names of the declared variables.
    #[get = "pub"]
    identifiers: IdentifierList,

    /// The colon separating the names from the type.
    #[get = "pub"]
    colon: Punctuation,

    /// The type shared by all the declared variables.
    #[get = "pub"]
    type_specifier: TypeSpecifier,

    /// The semicolon terminating the declaration.
    #[get = "pub"]
    semicolon: Punctuation,
}

impl SourceElement for VariableDeclaration {
    fn span(&self) -> Span {
        self.identifiers.span().join(&self.semicolon.span).unwrap()
    }
}

/// Syntax Synopsis:
/// ``` txt
/// VarSection:
///     'var' VariableDeclaration+
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct VarSection {
    /// The `var` keyword starting the section.
    #[get = "pub"]
    var_keyword: Keyword,

    /// The declarations of the section.
    #[get = "pub"]
    declarations: Vec<VariableDeclaration>,
}

impl SourceElement for VarSection {
    fn span(&self) -> Span {
        self.declarations.last().map_or_else(
            || self.var_keyword.span.clone(),
            |declaration| {
                self.var_keyword.span.join(&declaration.span()).unwrap()
            },
        )
    }
}

impl<'a> Parser<'a> {
    /// Parses a [`TypeSpecifier`].
    pub fn parse_type_specifier(
        &mut self,
        handler: &dyn Handler<error::Error>,
    ) -> Option<TypeSpecifier> {
        match self.stop_at_significant() {
            Some(Token::Identifier(identifier)) => {
                self.forward();
                Some(TypeSpecifier { identifier: identifier.clone() })
            }
            found => {
                handler.receive(error::Error::TypeSpecifierExpected(
                    TypeSpecifierExpected { found: found.cloned() },
                ));
                None
            }
        }
    }

    /// Parses an [`IdentifierList`].
    pub fn parse_identifier_list(
        &mut self,
        handler: &dyn Handler<error::Error>,
    ) -> Option<IdentifierList> {
        let first = self.parse_identifier(handler)?;
        let mut rest = Vec::new();

        while let Some(Token::Punctuation(comma)) = self.stop_at_significant()
        {
            if comma.punctuation != ',' {
                break;
            }

            self.forward();
            let identifier = self.parse_identifier(handler)?;
            rest.push((comma.clone(), identifier));
        }

        Some(ConnectedList::new(first, rest, None))
    }

    /// Parses a [`FormalParameterGroup`].
    pub fn parse_formal_parameter_group(
        &mut self,
        handler: &dyn Handler<error::Error>,
    ) -> Option<FormalParameterGroup> {
        let var_keyword = match self.stop_at_significant() {
            Some(Token::Keyword(keyword))
                if keyword.keyword == KeywordKind::Var =>
            {
                self.forward();
                Some(keyword.clone())
            }
            _ => None,
        };

        let identifiers = self.parse_identifier_list(handler)?;
        let colon = self.parse_punctuation(':', true, handler)?;
        let type_specifier = self.parse_type_specifier(handler)?;

        Some(FormalParameterGroup {
            var_keyword,
            identifiers,
            colon,
            type_specifier,
        })
    }

    /// Parses a [`FormalParameters`].
    ///
    /// The parser position must be at the opening parenthesis of the
    /// parameter list; the whole list is consumed.
    pub fn parse_formal_parameters(
        &mut self,
        handler: &dyn Handler<error::Error>,
    ) -> Option<FormalParameters> {
        let open_paren = self.parse_punctuation('(', true, handler)?;

        // empty parameter list
        if let Some(Token::Punctuation(close_paren)) =
            self.stop_at_significant()
        {
            if close_paren.punctuation == ')' {
                self.forward();
                return Some(FormalParameters {
                    open_paren,
                    parameter_groups: None,
                    close_paren: close_paren.clone(),
                });
            }
        }

        let mut first: Option<FormalParameterGroup> = None;
        let mut rest = Vec::new();
        let mut latest_separator: Option<Punctuation> = None;

        let close_paren = loop {
            match self.parse_formal_parameter_group(handler) {
                Some(group) => match (&first, &latest_separator) {
                    (None, _) => first = Some(group),
                    (Some(_), Some(_)) => {
                        rest.push((latest_separator.take().unwrap(), group));
                    }
                    (Some(_), None) => {
                        // a group is only parsed right after the opening
                        // parenthesis or a separator
                        unreachable!()
                    }
                },
                None => {
                    // skip to the next group separator or the closing
                    // parenthesis
                    self.stop_at(|token| {
                        matches!(
                            token,
                            Token::Punctuation(punctuation)
                                if punctuation.punctuation == ';'
                                    || punctuation.punctuation == ')'
                        )
                    });
                }
            }

            match self.stop_at_significant() {
                Some(Token::Punctuation(semicolon))
                    if semicolon.punctuation == ';' =>
                {
                    self.forward();
                    latest_separator = Some(semicolon.clone());
                }
                Some(Token::Punctuation(close_paren))
                    if close_paren.punctuation == ')' =>
                {
                    self.forward();
                    break close_paren.clone();
                }
                found => {
                    handler.receive(error::Error::PunctuationExpected(
                        crate::error::PunctuationExpected {
                            expected: ')',
                            found: found.cloned(),
                        },
                    ));
                    return None;
                }
            }
        };

        Some(FormalParameters {
            open_paren,
            parameter_groups: first
                .map(|first| ConnectedList::new(first, rest, None)),
            close_paren,
        })
    }

    /// Parses a [`ReturnTypeAnnotation`].
    pub fn parse_return_type_annotation(
        &mut self,
        handler: &dyn Handler<error::Error>,
    ) -> Option<ReturnTypeAnnotation> {
        let colon = self.parse_punctuation(':', true, handler)?;
        let type_specifier = self.parse_type_specifier(handler)?;

        Some(ReturnTypeAnnotation { colon, type_specifier })
    }

    /// Parses a [`VariableDeclaration`].
    pub fn parse_variable_declaration(
        &mut self,
        handler: &dyn Handler<error::Error>,
    ) -> Option<VariableDeclaration> {
        let identifiers = self.parse_identifier_list(handler)?;
        let colon = self.parse_punctuation(':', true, handler)?;
        let type_specifier = self.parse_type_specifier(handler)?;
        let semicolon = self.parse_punctuation(';', true, handler)?;

        Some(VariableDeclaration {
            identifiers,
            colon,
            type_specifier,
            semicolon,
        })
    }

    /// Parses a [`VarSection`].
    pub fn parse_var_section(
        &mut self,
        handler: &dyn Handler<error::Error>,
    ) -> Option<VarSection> {
        let var_keyword = self.parse_keyword(KeywordKind::Var, handler)?;

        let mut declarations = vec![self.parse_variable_declaration(handler)?];

        while let Some(Token::Identifier(..)) = self.stop_at_significant() {
            declarations.push(self.parse_variable_declaration(handler)?);
        }

        Some(VarSection { var_keyword, declarations })
    }
}
