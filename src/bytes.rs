//! Parsers over `u8` input. Multi-byte results borrow from the input.

use crate::{
    prelude::{expect, recognize, satisfy as satisfy_token, seq, Parser},
    token,
};

pub fn byte<'a>(want: u8) -> impl Parser<'a, u8, u8> {
    expect(want)
}

/// The literal `tag`, as the matching slice of the input.
pub fn tag<'a>(tag: &[u8]) -> impl Parser<'a, u8, &'a [u8]> {
    recognize(seq(tag.iter().copied().map(expect).collect::<Vec<_>>()))
}

/// The literal `tag`, ASCII case-insensitively.
pub fn tag_no_case<'a>(tag: &[u8]) -> impl Parser<'a, u8, &'a [u8]> {
    let parts: Vec<_> = tag
        .iter()
        .map(|want| {
            let want = *want;
            satisfy_token(move |got: &u8| got.eq_ignore_ascii_case(&want))
        })
        .collect();
    recognize(seq(parts))
}

pub fn satisfy<'a, F>(test: F) -> impl Parser<'a, u8, u8>
where
    F: Fn(u8) -> bool,
{
    satisfy_token(move |b: &u8| test(*b))
}

pub fn one_of<'a>(allowed: &[u8]) -> impl Parser<'a, u8, u8> {
    token::one_of(allowed.to_vec())
}

pub fn none_of<'a>(denied: &[u8]) -> impl Parser<'a, u8, u8> {
    token::none_of(denied.to_vec())
}

pub fn any<'a>() -> impl Parser<'a, u8, u8> {
    token::any()
}
