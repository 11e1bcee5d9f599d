//! Lazy traversal over one or more independent error chains
//!
//! A document can hold several inner errors, each with its own `source()`
//! chain. [`ChainQueue`] concatenates those chains into a single sequence
//! that is walked one level at a time: the chain of the current error is
//! drained depth-first before the next pending error is visited. Every step
//! produces a fresh value, so no cursor state is shared between callers.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

use crate::document::{ErrorDocument, ErrorResponse};
use crate::format::Printer;
use crate::inner::InnerError;

/// Capability of exposing the next link of a diagnostic chain
pub trait Unwrappable {
    /// Step one level down, or `None` once nothing follows
    fn unwrap_one(&self) -> Option<Link<'_>>;
}

/// Capability of printing type-specific detail for a frame
pub trait DetailFormattable {
    /// Print this error's frame; must not emit line breaks
    fn format_details(&self, printer: &mut Printer);
}

/// Structured error that both unwraps and formats its own details
pub trait Traced: StdError + Unwrappable + DetailFormattable {}

impl<T> Traced for T where T: StdError + Unwrappable + DetailFormattable {}

/// A queue was found where a single error was required
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("nested chain not supported")]
pub struct NestedChain;

/// A single error visited during traversal
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    /// Any error; unwraps through [`StdError::source`]
    Plain(&'a (dyn StdError + 'static)),
    /// An error of this crate with its own unwrap and detail formatting
    Structured(&'a dyn Traced),
}

impl<'a> Node<'a> {
    /// Classify an arbitrary error, recognising this crate's structured types
    ///
    /// Only [`InnerError`], [`ErrorDocument`] and [`ErrorResponse`] are
    /// recognised behind a `dyn Error`. Other [`Traced`] types get their own
    /// unwrapping and detail formatting only when a traversal starts from
    /// them through `Link::from(&value)`; found as a cause they are `Plain`.
    pub fn from_error(err: &'a (dyn StdError + 'static)) -> Self {
        if let Some(inner) = err.downcast_ref::<InnerError>() {
            Self::Structured(inner)
        } else if let Some(document) = err.downcast_ref::<ErrorDocument>() {
            Self::Structured(document)
        } else if let Some(response) = err.downcast_ref::<ErrorResponse>() {
            Self::Structured(response)
        } else {
            Self::Plain(err)
        }
    }

    /// The next link of this node's own chain
    pub fn next(self) -> Option<Link<'a>> {
        match self {
            Self::Plain(err) => err.source().map(Link::from_error),
            Self::Structured(err) => err.unwrap_one(),
        }
    }

    fn print(self, printer: &mut Printer) {
        match self {
            Self::Plain(err) => printer.print(err),
            Self::Structured(err) => err.format_details(printer),
        }
    }
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(err) => fmt::Display::fmt(err, f),
            Self::Structured(err) => fmt::Display::fmt(err, f),
        }
    }
}

/// One step of a traversal: a single error or a queue of chains
#[derive(Debug, Clone, Copy)]
pub enum Link<'a> {
    Node(Node<'a>),
    Queue(ChainQueue<'a>),
}

impl<'a> Link<'a> {
    /// Wrap an arbitrary error as the start of a traversal
    pub fn from_error(err: &'a (dyn StdError + 'static)) -> Self {
        Self::Node(Node::from_error(err))
    }

    /// Advance one level without printing
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Node(node) => node.next(),
            Self::Queue(queue) => queue.next(),
        }
    }

    /// Advance one level, reporting a nested queue instead of panicking
    ///
    /// # Errors
    ///
    /// Returns [`NestedChain`] where [`Link::next`] would panic
    pub fn try_next(self) -> Result<Option<Self>, NestedChain> {
        match self {
            Self::Node(node) => Ok(node.next()),
            Self::Queue(queue) => queue.try_next(),
        }
    }

    /// Print this step's frame and return the step after it
    ///
    /// # Panics
    ///
    /// Panics where [`ChainQueue::next`] does
    pub fn format_step(self, printer: &mut Printer) -> Option<Self> {
        self.try_format_step(printer).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Print this step's frame, reporting a nested queue instead of panicking
    ///
    /// The frame is printed even when the step after it is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`NestedChain`] where [`Link::format_step`] would panic
    pub fn try_format_step(self, printer: &mut Printer) -> Result<Option<Self>, NestedChain> {
        match self {
            Self::Node(node) => {
                node.print(printer);
                Ok(node.next())
            }
            Self::Queue(queue) => {
                queue.current.print(printer);
                queue.try_next()
            }
        }
    }
}

impl Unwrappable for Link<'_> {
    fn unwrap_one(&self) -> Option<Link<'_>> {
        self.next()
    }
}

impl fmt::Display for Link<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(node) => fmt::Display::fmt(node, f),
            Self::Queue(queue) => fmt::Display::fmt(queue, f),
        }
    }
}

impl<'a> From<Node<'a>> for Link<'a> {
    fn from(node: Node<'a>) -> Self {
        Self::Node(node)
    }
}

impl<'a> From<ChainQueue<'a>> for Link<'a> {
    fn from(queue: ChainQueue<'a>) -> Self {
        Self::Queue(queue)
    }
}

impl<'a> From<&'a (dyn StdError + 'static)> for Link<'a> {
    fn from(err: &'a (dyn StdError + 'static)) -> Self {
        Self::from_error(err)
    }
}

impl<'a> From<&'a InnerError> for Link<'a> {
    fn from(err: &'a InnerError) -> Self {
        Self::Node(Node::Structured(err))
    }
}

impl<'a> From<&'a ErrorDocument> for Link<'a> {
    fn from(err: &'a ErrorDocument) -> Self {
        Self::Node(Node::Structured(err))
    }
}

impl<'a> From<&'a ErrorResponse> for Link<'a> {
    fn from(err: &'a ErrorResponse) -> Self {
        Self::Node(Node::Structured(err))
    }
}

/// Errors still waiting to be visited after the current chain
#[derive(Debug, Clone, Copy)]
pub enum Pending<'a> {
    /// Remaining inner errors of a document
    Inner(&'a [InnerError]),
    /// Remaining arbitrary errors
    Errors(&'a [&'a (dyn StdError + 'static)]),
}

impl<'a> Pending<'a> {
    pub const EMPTY: Self = Self::Errors(&[]);

    pub const fn len(&self) -> usize {
        match self {
            Self::Inner(errors) => errors.len(),
            Self::Errors(errors) => errors.len(),
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn split_first(self) -> Option<(Node<'a>, Self)> {
        match self {
            Self::Inner(errors) => errors
                .split_first()
                .map(|(head, rest)| (Node::Structured(head), Self::Inner(rest))),
            Self::Errors(errors) => errors
                .split_first()
                .map(|(head, rest)| (Node::from_error(*head), Self::Errors(rest))),
        }
    }
}

impl Default for Pending<'_> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<'a> From<&'a [InnerError]> for Pending<'a> {
    fn from(errors: &'a [InnerError]) -> Self {
        Self::Inner(errors)
    }
}

impl<'a> From<&'a [&'a (dyn StdError + 'static)]> for Pending<'a> {
    fn from(errors: &'a [&'a (dyn StdError + 'static)]) -> Self {
        Self::Errors(errors)
    }
}

impl<'a, const N: usize> From<&'a [&'a (dyn StdError + 'static); N]> for Pending<'a> {
    fn from(errors: &'a [&'a (dyn StdError + 'static); N]) -> Self {
        Self::Errors(errors)
    }
}

/// The current error being drained plus the errors queued behind it
///
/// Immutable: [`ChainQueue::next`] returns the state one step later instead
/// of moving a cursor. The current error is never itself a queue.
#[derive(Debug, Clone, Copy)]
pub struct ChainQueue<'a> {
    current: Node<'a>,
    pending: Pending<'a>,
}

impl<'a> ChainQueue<'a> {
    /// Queue `pending` behind the chain of `current`
    ///
    /// # Panics
    ///
    /// Panics if `current` is itself a queue. Only one level of chain
    /// concatenation is modelled; nesting is a caller bug.
    pub fn new(current: impl Into<Link<'a>>, pending: impl Into<Pending<'a>>) -> Self {
        match current.into() {
            Link::Node(current) => Self {
                current,
                pending: pending.into(),
            },
            Link::Queue(_) => panic!("nested chain not supported"),
        }
    }

    pub const fn current(&self) -> Node<'a> {
        self.current
    }

    pub const fn pending(&self) -> Pending<'a> {
        self.pending
    }

    /// The state one unwrap step later
    ///
    /// Descends into the current error's own cause first. Once that chain is
    /// exhausted the next pending error becomes current; the last pending
    /// error is returned bare so the tail of a trace is not a queue.
    ///
    /// # Panics
    ///
    /// Panics if the current error unwraps into a queue of its own, e.g. a
    /// document with several inner errors used as a cause. Whether that
    /// happens depends on position: only errors with siblings still pending
    /// are inside a queue. The last pending error is handed out bare, so a
    /// queue below it starts a fresh traversal, as does one below the only
    /// inner error of a document.
    pub fn next(self) -> Option<Link<'a>> {
        self.try_next().unwrap_or_else(|e| panic!("{e}"))
    }

    /// The state one unwrap step later, or [`NestedChain`] where
    /// [`ChainQueue::next`] would panic
    ///
    /// # Errors
    ///
    /// Returns [`NestedChain`] if the current error unwraps into a queue
    pub fn try_next(self) -> Result<Option<Link<'a>>, NestedChain> {
        match self.current.next() {
            Some(Link::Node(deeper)) => {
                return Ok(Some(Link::Queue(Self {
                    current: deeper,
                    pending: self.pending,
                })));
            }
            Some(Link::Queue(_)) => return Err(NestedChain),
            None => {}
        }

        let Some((head, rest)) = self.pending.split_first() else {
            return Ok(None);
        };

        if rest.is_empty() {
            Ok(Some(Link::Node(head)))
        } else {
            Ok(Some(Link::Queue(Self {
                current: head,
                pending: rest,
            })))
        }
    }

    /// Print the current error's frame and return the next step
    ///
    /// # Panics
    ///
    /// Panics where [`ChainQueue::next`] does
    pub fn format_step(self, printer: &mut Printer) -> Option<Link<'a>> {
        self.current.print(printer);
        self.next()
    }
}

impl Unwrappable for ChainQueue<'_> {
    fn unwrap_one(&self) -> Option<Link<'_>> {
        self.next()
    }
}

impl fmt::Display for ChainQueue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.current, f)
    }
}
