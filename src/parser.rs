use std::fmt;

use crate::prelude::{Context, Cursor, ParseError};

/// What every parser returns: the cursor after the match plus the decoded value.
pub type PResult<'a, C, T> = Result<(Cursor<'a, C>, T), ParseError>;

/// A type-erased parser, for heterogeneous lists handed to `alt` or `seq`.
pub type BoxedParser<'p, 'a, C, T> =
    Box<dyn Fn(&Context<C>, Cursor<'a, C>) -> PResult<'a, C, T> + 'p>;

/// The contract every combinator implements and composes.
///
/// Implemented for every `Fn(&Context<C>, Cursor<'a, C>) -> PResult<'a, C, T>`,
/// so free functions, closures and boxed parsers can all be used directly.
pub trait Parser<'a, C, T> {
    fn parse(&self, ctx: &Context<C>, input: Cursor<'a, C>) -> PResult<'a, C, T>;

    /// Top-level invocation. On failure the reported cursor is `input` itself.
    fn run(&self, ctx: &Context<C>, input: Cursor<'a, C>) -> Outcome<'a, C, T> {
        match self.parse(ctx, input) {
            Ok((cursor, value)) => Outcome {
                cursor,
                result: Ok(value),
            },
            Err(e) => Outcome {
                cursor: input,
                result: Err(e),
            },
        }
    }
}

impl<'a, C: 'a, T, F> Parser<'a, C, T> for F
where
    F: Fn(&Context<C>, Cursor<'a, C>) -> PResult<'a, C, T>,
{
    #[inline]
    fn parse(&self, ctx: &Context<C>, input: Cursor<'a, C>) -> PResult<'a, C, T> {
        (self)(ctx, input)
    }
}

/// Result of [`Parser::run`]: where parsing stopped and what it produced.
pub struct Outcome<'a, C, T> {
    pub cursor: Cursor<'a, C>,
    pub result: Result<T, ParseError>,
}

impl<'a, C, T> Outcome<'a, C, T> {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }
}

impl<'a, C, T: fmt::Debug> fmt::Debug for Outcome<'a, C, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Outcome")
            .field("cursor", &self.cursor)
            .field("result", &self.result)
            .finish()
    }
}

/// Pins a closure to the parser signature, so its argument types need not be
/// spelled out.
#[inline]
pub fn from_fn<'a, C: 'a, T, F>(f: F) -> F
where
    F: Fn(&Context<C>, Cursor<'a, C>) -> PResult<'a, C, T>,
{
    f
}

/// Borrows a parser as a parser, so it can be handed to a combinator without
/// giving it up.
pub fn by_ref<'p, 'a, C: 'a, T, P>(parser: &'p P) -> impl Parser<'a, C, T> + 'p
where
    P: Parser<'a, C, T>,
{
    move |ctx: &Context<C>, input: Cursor<'a, C>| -> PResult<'a, C, T> {
        parser.parse(ctx, input)
    }
}

pub fn boxed<'p, 'a, C: 'a, T, P>(parser: P) -> BoxedParser<'p, 'a, C, T>
where
    P: Parser<'a, C, T> + 'p,
{
    Box::new(move |ctx: &Context<C>, input: Cursor<'a, C>| parser.parse(ctx, input))
}
