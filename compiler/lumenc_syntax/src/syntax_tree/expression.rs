//! Contains all definition of expression syntax trees.
//!
//! The grammar follows the classic Pascal precedence levels: a relational
//! operator connects two simple expressions, a simple expression chains
//! terms with additive operators, and a term chains factors with
//! multiplicative operators.

use derive_more::From;
use enum_as_inner::EnumAsInner;
use getset::Getters;
use lumenc_base::{
    handler::Handler,
    source_file::{SourceElement, Span},
};
use lumenc_lexical::token::{
    Identifier, Keyword, KeywordKind, NumericLiteral, Punctuation, Token,
};

use crate::{
    error::{self, ExpressionExpected},
    parser::Parser,
};

/// Syntax Synopsis:
/// ``` txt
/// RelationalOperator:
///     '=' | '<' '>' | '<' | '<' '=' | '>' | '>' '='
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, EnumAsInner)]
#[allow(missing_docs)]
pub enum RelationalOperator {
    Equal(Punctuation),
    NotEqual(Punctuation, Punctuation),
    LessThan(Punctuation),
    LessThanOrEqual(Punctuation, Punctuation),
    GreaterThan(Punctuation),
    GreaterThanOrEqual(Punctuation, Punctuation),
}

impl SourceElement for RelationalOperator {
    fn span(&self) -> Span {
        match self {
            Self::Equal(punctuation)
            | Self::LessThan(punctuation)
            | Self::GreaterThan(punctuation) => punctuation.span.clone(),
            Self::NotEqual(first, second)
            | Self::LessThanOrEqual(first, second)
            | Self::GreaterThanOrEqual(first, second) => {
                first.span.join(&second.span).unwrap()
            }
        }
    }
}

/// Syntax Synopsis:
/// ``` txt
/// AdditiveOperator:
///     '+' | '-' | 'or'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, EnumAsInner)]
#[allow(missing_docs)]
pub enum AdditiveOperator {
    Plus(Punctuation),
    Minus(Punctuation),
    Or(Keyword),
}

impl SourceElement for AdditiveOperator {
    fn span(&self) -> Span {
        match self {
            Self::Plus(punctuation) | Self::Minus(punctuation) => {
                punctuation.span.clone()
            }
            Self::Or(keyword) => keyword.span.clone(),
        }
    }
}

/// Syntax Synopsis:
/// ``` txt
/// MultiplicativeOperator:
///     '*' | '/' | 'div' | 'mod' | 'and'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, EnumAsInner)]
#[allow(missing_docs)]
pub enum MultiplicativeOperator {
    Times(Punctuation),
    Divide(Punctuation),
    Div(Keyword),
    Mod(Keyword),
    And(Keyword),
}

impl SourceElement for MultiplicativeOperator {
    fn span(&self) -> Span {
        match self {
            Self::Times(punctuation) | Self::Divide(punctuation) => {
                punctuation.span.clone()
            }
            Self::Div(keyword) | Self::Mod(keyword) | Self::And(keyword) => {
                keyword.span.clone()
            }
        }
    }
}

/// Syntax Synopsis:
/// ``` txt
/// Parenthesized:
///     '(' Expression ')'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Parenthesized {
    /// The opening parenthesis.
    #[get = "pub"]
    open_paren: Punctuation,

    /// The inner expression.
    #[get = "pub"]
    expression: Box<Expression>,

    /// The closing parenthesis.
    #[get = "pub"]
    close_paren: Punctuation,
}

impl SourceElement for Parenthesized {
    fn span(&self) -> Span {
        self.open_paren.span.join(&self.close_paren.span).unwrap()
    }
}

/// Syntax Synopsis:
/// ``` txt
/// Not:
///     'not' Factor
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Not {
    /// The `not` keyword.
    #[get = "pub"]
    not_keyword: Keyword,

    /// The negated factor.
    #[get = "pub"]
    factor: Box<Factor>,
}

impl SourceElement for Not {
    fn span(&self) -> Span {
        self.not_keyword.span.join(&self.factor.span()).unwrap()
    }
}

/// Syntax Synopsis:
/// ``` txt
/// Factor:
///     Identifier
///     | NumericLiteral
///     | Parenthesized
///     | Not
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Factor {
    Variable(Identifier),
    NumericLiteral(NumericLiteral),
    Parenthesized(Parenthesized),
    Not(Not),
}

impl SourceElement for Factor {
    fn span(&self) -> Span {
        match self {
            Self::Variable(identifier) => identifier.span.clone(),
            Self::NumericLiteral(literal) => literal.span.clone(),
            Self::Parenthesized(parenthesized) => parenthesized.span(),
            Self::Not(not) => not.span(),
        }
    }
}

/// Syntax Synopsis:
/// ``` txt
/// Term:
///     Factor (MultiplicativeOperator Factor)*
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Term {
    /// The first factor of the term.
    #[get = "pub"]
    first: Factor,

    /// The remaining factors, each preceded by its operator.
    #[get = "pub"]
    rest: Vec<(MultiplicativeOperator, Factor)>,
}

impl SourceElement for Term {
    fn span(&self) -> Span {
        self.rest.last().map_or_else(
            || self.first.span(),
            |(_, factor)| self.first.span().join(&factor.span()).unwrap(),
        )
    }
}

/// Syntax Synopsis:
/// ``` txt
/// SimpleExpression:
///     ('+' | '-')? Term (AdditiveOperator Term)*
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct SimpleExpression {
    /// The optional leading sign.
    #[get = "pub"]
    sign: Option<Punctuation>,

    /// The first term of the expression.
    #[get = "pub"]
    first: Term,

    /// The remaining terms, each preceded by its operator.
    #[get = "pub"]
    rest: Vec<(AdditiveOperator, Term)>,
}

impl SourceElement for SimpleExpression {
    fn span(&self) -> Span {
        let start = self.sign.as_ref().map_or_else(
            || self.first.span(),
            |sign| sign.span.clone(),
        );

        let end = self.rest.last().map_or_else(
            || self.first.span(),
            |(_, term)| term.span(),
        );

        start.join(&end).unwrap()
    }
}

/// Syntax Synopsis:
/// ``` txt
/// Expression:
///     SimpleExpression (RelationalOperator SimpleExpression)?
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Expression {
    /// The left-hand side of the expression.
    #[get = "pub"]
    left: SimpleExpression,

    /// The optional relational portion of the expression.
    #[get = "pub"]
    relational: Option<(RelationalOperator, SimpleExpression)>,
}

impl SourceElement for Expression {
    fn span(&self) -> Span {
        self.relational.as_ref().map_or_else(
            || self.left.span(),
            |(_, right)| self.left.span().join(&right.span()).unwrap(),
        )
    }
}

impl<'a> Parser<'a> {
    /// Parses an [`Expression`].
    pub fn parse_expression(
        &mut self,
        handler: &dyn Handler<error::Error>,
    ) -> Option<Expression> {
        let left = self.parse_simple_expression(handler)?;

        let relational = match self.parse_relational_operator() {
            Some(operator) => {
                Some((operator, self.parse_simple_expression(handler)?))
            }
            None => None,
        };

        Some(Expression { left, relational })
    }

    fn parse_relational_operator(&mut self) -> Option<RelationalOperator> {
        let first = match self.stop_at_significant() {
            Some(Token::Punctuation(punctuation))
                if matches!(punctuation.punctuation, '=' | '<' | '>') =>
            {
                self.forward();
                punctuation.clone()
            }
            _ => return None,
        };

        // the second character must follow without any gap
        let second = match self.peek() {
            Some(Token::Punctuation(punctuation)) => Some(punctuation),
            _ => None,
        };

        Some(match (first.punctuation, second.map(|x| x.punctuation)) {
            ('=', _) => RelationalOperator::Equal(first),
            ('<', Some('>')) => {
                let second = second.unwrap().clone();
                self.forward();
                RelationalOperator::NotEqual(first, second)
            }
            ('<', Some('=')) => {
                let second = second.unwrap().clone();
                self.forward();
                RelationalOperator::LessThanOrEqual(first, second)
            }
            ('<', _) => RelationalOperator::LessThan(first),
            ('>', Some('=')) => {
                let second = second.unwrap().clone();
                self.forward();
                RelationalOperator::GreaterThanOrEqual(first, second)
            }
            ('>', _) => RelationalOperator::GreaterThan(first),
            _ => unreachable!(),
        })
    }

    /// Parses a [`SimpleExpression`].
    pub fn parse_simple_expression(
        &mut self,
        handler: &dyn Handler<error::Error>,
    ) -> Option<SimpleExpression> {
        let sign = match self.stop_at_significant() {
            Some(Token::Punctuation(punctuation))
                if matches!(punctuation.punctuation, '+' | '-') =>
            {
                self.forward();
                Some(punctuation.clone())
            }
            _ => None,
        };

        let first = self.parse_term(handler)?;
        let mut rest = Vec::new();

        loop {
            let operator = match self.stop_at_significant() {
                Some(Token::Punctuation(punctuation))
                    if punctuation.punctuation == '+' =>
                {
                    AdditiveOperator::Plus(punctuation.clone())
                }
                Some(Token::Punctuation(punctuation))
                    if punctuation.punctuation == '-' =>
                {
                    AdditiveOperator::Minus(punctuation.clone())
                }
                Some(Token::Keyword(keyword))
                    if keyword.keyword == KeywordKind::Or =>
                {
                    AdditiveOperator::Or(keyword.clone())
                }
                _ => break,
            };

            self.forward();
            rest.push((operator, self.parse_term(handler)?));
        }

        Some(SimpleExpression { sign, first, rest })
    }

    /// Parses a [`Term`].
    pub fn parse_term(
        &mut self,
        handler: &dyn Handler<error::Error>,
    ) -> Option<Term> {
        let first = self.parse_factor(handler)?;
        let mut rest = Vec::new();

        loop {
            let operator = match self.stop_at_significant() {
                Some(Token::Punctuation(punctuation))
                    if punctuation.punctuation == '*' =>
                {
                    MultiplicativeOperator::Times(punctuation.clone())
                }
                Some(Token::Punctuation(punctuation))
                    if punctuation.punctuation == '/' =>
                {
                    MultiplicativeOperator::Divide(punctuation.clone())
                }
                Some(Token::Keyword(keyword))
                    if keyword.keyword == KeywordKind::Div =>
                {
                    MultiplicativeOperator::Div(keyword.clone())
                }
                Some(Token::Keyword(keyword))
                    if keyword.keyword == KeywordKind::Mod =>
                {
                    MultiplicativeOperator::Mod(keyword.clone())
                }
                Some(Token::Keyword(keyword))
                    if keyword.keyword == KeywordKind::And =>
                {
                    MultiplicativeOperator::And(keyword.clone())
                }
                _ => break,
            };

            self.forward();
            rest.push((operator, self.parse_factor(handler)?));
        }

        Some(Term { first, rest })
    }

    /// Parses a [`Factor`].
    pub fn parse_factor(
        &mut self,
        handler: &dyn Handler<error::Error>,
    ) -> Option<Factor> {
        match self.stop_at_significant() {
            Some(Token::Identifier(identifier)) => {
                self.forward();
                Some(Factor::Variable(identifier.clone()))
            }
            Some(Token::NumericLiteral(literal)) => {
                self.forward();
                Some(Factor::NumericLiteral(literal.clone()))
            }
            Some(Token::Punctuation(open_paren))
                if open_paren.punctuation == '(' =>
            {
                self.forward();
                let expression = Box::new(self.parse_expression(handler)?);
                let close_paren = self.parse_punctuation(')', true, handler)?;

                Some(Factor::Parenthesized(Parenthesized {
                    open_paren: open_paren.clone(),
                    expression,
                    close_paren,
                }))
            }
            Some(Token::Keyword(not_keyword))
                if not_keyword.keyword == KeywordKind::Not =>
            {
                self.forward();
                let factor = Box::new(self.parse_factor(handler)?);

                Some(Factor::Not(Not {
                    not_keyword: not_keyword.clone(),
                    factor,
                }))
            }
            found => {
                handler.receive(error::Error::ExpressionExpected(
                    ExpressionExpected { found: found.cloned() },
                ));
                None
            }
        }
    }
}
