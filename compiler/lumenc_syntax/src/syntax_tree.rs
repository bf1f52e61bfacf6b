//! Contains all the definition of syntax trees and their parsing functions.

use getset::Getters;
use lumenc_base::source_file::{SourceElement, Span};

pub mod declaration;
pub mod expression;
pub mod statement;

/// Represents a syntax tree node with a pattern of syntax tree nodes
/// separated by a separator.
///
/// This struct is useful for representing syntax tree nodes that are
/// separated by a separator. For example, the parameter name list `a, b, c`
/// can be represented by a [`ConnectedList`] with the separator being a comma
/// token and the elements being the identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ConnectedList<Element, Separator> {
    /// The first element of the list.
    #[get = "pub"]
    first: Element,

    /// The rest of the elements of the list.
    ///
    /// Each element of the list is a tuple containing the separator and the
    /// element. The separator is the token that separates the current element
    /// from the prior one.
    #[get = "pub"]
    rest: Vec<(Separator, Element)>,

    /// The trailing separator of the list, if any.
    #[get = "pub"]
    trailing_separator: Option<Separator>,
}

impl<Element, Separator> ConnectedList<Element, Separator> {
    /// Creates a new [`ConnectedList`] out of its parts.
    #[must_use]
    pub const fn new(
        first: Element,
        rest: Vec<(Separator, Element)>,
        trailing_separator: Option<Separator>,
    ) -> Self {
        Self { first, rest, trailing_separator }
    }

    /// Returns an iterator over the elements of the list.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        std::iter::once(&self.first)
            .chain(self.rest.iter().map(|(_, element)| element))
    }

    /// Returns an iterator over the elements of the list, consuming it.
    pub fn into_elements(self) -> impl Iterator<Item = Element> {
        std::iter::once(self.first)
            .chain(self.rest.into_iter().map(|(_, element)| element))
    }

    /// Gets the number of elements in the list.
    #[must_use]
    pub fn len(&self) -> usize { self.rest.len() + 1 }

    /// Returns `true` if the list is empty.
    ///
    /// The function will never return `true`.
    #[must_use]
    pub const fn is_empty(&self) -> bool { false }
}

impl<Element: SourceElement, Separator: SourceElement> SourceElement
    for ConnectedList<Element, Separator>
{
    fn span(&self) -> Span {
        let end = self.trailing_separator.as_ref().map_or_else(
            || {
                self.rest.last().map_or_else(
                    || self.first.span(),
                    |(_, element)| element.span(),
                )
            },
            SourceElement::span,
        );

        self.first.span().join(&end).unwrap()
    }
}

#[cfg(test)]
mod tests;
