//! Single-token primitives, generic over any comparable token type.
//!
//! Token-family front ends ([`crate::chars`], [`crate::bytes`]) specialise these.

use std::{borrow::Cow, fmt::Debug};

use crate::{
    prelude::{seq, value, Context, Cursor, PResult, ParseError, Parser},
    trace::site,
};

#[inline]
pub(crate) fn eof_error<C>(start: Cursor<'_, C>) -> ParseError {
    ParseError::new(start.position(), "got EOF")
}

/// One token equal to `want`.
pub fn expect<'a, C>(want: C) -> impl Parser<'a, C, C>
where
    C: PartialEq + Clone + Debug + 'a,
{
    let expect = move |_ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, C> {
        match start.read() {
            None => Err(ParseError::new(
                start.position(),
                format!("got EOF, want {want:?}"),
            )),
            Some(got) if *got != want => Err(ParseError::new(
                start.position(),
                format!("got {got:?}, want {want:?}"),
            )),
            Some(_) => Ok((start.advance(), want.clone())),
        }
    };
    site("chainparse::expect", expect)
}

/// A fixed run of tokens, matched one `expect` at a time; the value is the whole
/// literal.
pub fn expects<'a, C>(literal: impl Into<Vec<C>>) -> impl Parser<'a, C, Vec<C>>
where
    C: PartialEq + Clone + Debug + 'a,
{
    let literal = literal.into();
    let parts: Vec<_> = literal.iter().cloned().map(expect).collect();
    site("chainparse::expects", value(literal, seq(parts)))
}

/// One token for which `test` holds.
pub fn satisfy<'a, C, F>(test: F) -> impl Parser<'a, C, C>
where
    C: Clone + Debug + 'a,
    F: Fn(&C) -> bool,
{
    let satisfy = move |_ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, C> {
        let got = start.read().ok_or_else(|| eof_error(start))?;
        if !test(got) {
            return Err(ParseError::new(
                start.position(),
                format!("{got:?} does not satisfy test"),
            ));
        }
        Ok((start.advance(), got.clone()))
    };
    site("chainparse::satisfy", satisfy)
}

fn member_of<'a, C>(name: &'static str, set: Vec<C>, allowed: bool) -> impl Parser<'a, C, C>
where
    C: PartialEq + Clone + Debug + 'a,
{
    let member_of = move |_ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, C> {
        let got = start.read().ok_or_else(|| eof_error(start))?;
        if set.contains(got) != allowed {
            return Err(ParseError::new(
                start.position(),
                format!("{got:?} not allowed"),
            ));
        }
        Ok((start.advance(), got.clone()))
    };
    site(name, member_of)
}

/// One token from the allow-list.
pub fn one_of<'a, C>(allowed: impl IntoIterator<Item = C>) -> impl Parser<'a, C, C>
where
    C: PartialEq + Clone + Debug + 'a,
{
    member_of("chainparse::one_of", allowed.into_iter().collect(), true)
}

/// One token not on the deny-list.
pub fn none_of<'a, C>(denied: impl IntoIterator<Item = C>) -> impl Parser<'a, C, C>
where
    C: PartialEq + Clone + Debug + 'a,
{
    member_of("chainparse::none_of", denied.into_iter().collect(), false)
}

pub fn any<'a, C: Clone + 'a>() -> impl Parser<'a, C, C> {
    let any = |_ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, C> {
        let got = start.read().ok_or_else(|| eof_error(start))?;
        Ok((start.advance(), got.clone()))
    };
    site("chainparse::any", any)
}

/// Everything left; never fails.
pub fn rest<'a, C: 'a>() -> impl Parser<'a, C, &'a [C]> {
    let rest = |_ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, &'a [C]> {
        Ok((start.jump_to_end(), start.remaining()))
    };
    site("chainparse::rest", rest)
}

pub fn rest_len<'a, C: 'a>() -> impl Parser<'a, C, usize> {
    let rest_len = |_ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, usize> {
        Ok((start.jump_to_end(), start.remaining_len()))
    };
    site("chainparse::rest_len", rest_len)
}

/// Succeeds, consuming nothing, only at end of input.
pub fn eof<'a, C: 'a>() -> impl Parser<'a, C, ()> {
    let eof = |_ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, ()> {
        if !start.at_end() {
            return Err(ParseError::new(start.position(), "got input, want EOF"));
        }
        Ok((start, ()))
    };
    site("chainparse::eof", eof)
}

/// Always succeeds with `val`, consuming nothing.
pub fn success<'a, C: 'a, T: Clone>(val: T) -> impl Parser<'a, C, T> {
    let success = move |_ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, T> {
        Ok((start, val.clone()))
    };
    site("chainparse::success", success)
}

/// Always fails with `message`, consuming nothing.
pub fn failure<'a, C: 'a, T>(message: impl Into<Cow<'static, str>>) -> impl Parser<'a, C, T> {
    let message = message.into();
    let failure = move |_ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, T> {
        Err(ParseError::new(start.position(), message.clone()))
    };
    site("chainparse::failure", failure)
}
