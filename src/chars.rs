//! Parsers over `char` input.
//!
//! Multi-char results are owned `String`s. The class parsers are traced as
//! `chars::<name>`, so a [`TraceFilter`](crate::prelude::TraceFilter) can keep
//! them out of trace output with `exclude_module("chars")`.

use once_cell::sync::Lazy;

use crate::{
    prelude::{
        expect, many0, many1, map, opt, preceded, recognize as recognize_slice, satisfy, seq,
        surrounded as surrounded_strict, traced, Context, Cursor, PResult, Parser, Sequence,
    },
    token,
};

/// The chars of `s`, ready to be parsed.
pub fn input(s: &str) -> Vec<char> {
    s.chars().collect()
}

static HEX_DIGITS: Lazy<Vec<char>> =
    Lazy::new(|| ('0'..='9').chain('a'..='f').chain('A'..='F').collect());
static OCTAL_DIGITS: Lazy<Vec<char>> = Lazy::new(|| ('0'..='7').collect());

pub fn is_alpha(c: &char) -> bool {
    c.is_ascii_alphabetic()
}

pub fn is_alphanumeric(c: &char) -> bool {
    c.is_ascii_alphanumeric()
}

pub fn is_digit(c: &char) -> bool {
    c.is_ascii_digit()
}

pub fn is_hex_digit(c: &char) -> bool {
    HEX_DIGITS.contains(c)
}

pub fn is_octal_digit(c: &char) -> bool {
    OCTAL_DIGITS.contains(c)
}

/// Space or tab.
pub fn is_space(c: &char) -> bool {
    matches!(c, ' ' | '\t')
}

/// Space, tab, carriage return or line feed.
pub fn is_multispace(c: &char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

pub fn is_sign(c: &char) -> bool {
    matches!(c, '+' | '-')
}

/// Exactly `want`.
pub fn char<'a>(want: char) -> impl Parser<'a, char, char> {
    expect(want)
}

/// `want`, ignoring case.
pub fn char_no_case<'a>(want: char) -> impl Parser<'a, char, char> {
    satisfy(move |got: &char| eq_no_case(*got, want))
}

fn eq_no_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// The literal `tag`.
pub fn tag<'a>(tag: &str) -> impl Parser<'a, char, String> {
    join(seq(tag.chars().map(expect).collect::<Vec<_>>()))
}

/// The literal `tag` ignoring case; the value is the text as it appears in the
/// input.
pub fn tag_no_case<'a>(tag: &str) -> impl Parser<'a, char, String> {
    join(seq(tag.chars().map(char_no_case).collect::<Vec<_>>()))
}

pub fn one_of<'a>(allowed: &str) -> impl Parser<'a, char, char> {
    token::one_of(allowed.chars().collect::<Vec<_>>())
}

pub fn none_of<'a>(denied: &str) -> impl Parser<'a, char, char> {
    token::none_of(denied.chars().collect::<Vec<_>>())
}

/// A line ending, `\n` or `\r\n`; the value is always `'\n'`.
pub fn eol<'a>(ctx: &Context<char>, start: Cursor<'a, char>) -> PResult<'a, char, char> {
    traced("chars::eol", preceded(opt(expect('\r')), expect('\n'))).parse(ctx, start)
}

pub fn newline<'a>(ctx: &Context<char>, start: Cursor<'a, char>) -> PResult<'a, char, char> {
    traced("chars::newline", expect('\n')).parse(ctx, start)
}

macro_rules! char_class {
    ($(#[$meta:meta])* $one:ident, $zero:ident, $many:ident, $test:ident) => {
        $(#[$meta])*
        pub fn $one<'a>(ctx: &Context<char>, start: Cursor<'a, char>) -> PResult<'a, char, char> {
            let name = concat!("chars::", stringify!($one));
            traced(name, satisfy($test)).parse(ctx, start)
        }

        pub fn $zero<'a>(
            ctx: &Context<char>,
            start: Cursor<'a, char>,
        ) -> PResult<'a, char, String> {
            let name = concat!("chars::", stringify!($zero));
            traced(name, join(many0(satisfy($test)))).parse(ctx, start)
        }

        pub fn $many<'a>(
            ctx: &Context<char>,
            start: Cursor<'a, char>,
        ) -> PResult<'a, char, String> {
            let name = concat!("chars::", stringify!($many));
            traced(name, join(many1(satisfy($test)))).parse(ctx, start)
        }
    };
}

char_class!(
    /// One ASCII letter.
    alpha, alpha0, alpha1, is_alpha
);
char_class!(digit, digit0, digit1, is_digit);
char_class!(hex_digit, hex_digit0, hex_digit1, is_hex_digit);
char_class!(octal_digit, octal_digit0, octal_digit1, is_octal_digit);
char_class!(alphanumeric, alphanumeric0, alphanumeric1, is_alphanumeric);
char_class!(
    /// One space or tab. `space0` is the usual separator skip.
    space, space0, space1, is_space
);
char_class!(multispace, multispace0, multispace1, is_multispace);

pub fn sign<'a>(ctx: &Context<char>, start: Cursor<'a, char>) -> PResult<'a, char, char> {
    traced("chars::sign", satisfy(is_sign)).parse(ctx, start)
}

/// Like [`seq`], but skips spaces and tabs before each part.
pub fn phrase<'a, T, S>(parts: S) -> impl Parser<'a, char, Vec<T>>
where
    S: Sequence<'a, char, T>,
{
    move |ctx: &Context<char>, start: Cursor<'a, char>| -> PResult<'a, char, Vec<T>> {
        parts.parse_each_preceded(&space0, ctx, start)
    }
}

/// `middle` between `left` and `right`, each of the three allowed leading
/// spaces and tabs.
pub fn surrounded<'a, L, R, M, P, Q, V>(left: P, right: Q, middle: V) -> impl Parser<'a, char, M>
where
    P: Parser<'a, char, L>,
    Q: Parser<'a, char, R>,
    V: Parser<'a, char, M>,
{
    surrounded_strict(
        preceded(space0, left),
        preceded(space0, right),
        preceded(space0, middle),
    )
}

/// `middle` between the chars `left` and `right`, spaces allowed.
pub fn surrounded_by<'a, M, V>(left: char, right: char, middle: V) -> impl Parser<'a, char, M>
where
    V: Parser<'a, char, M>,
{
    surrounded(expect(left), expect(right), middle)
}

/// The text `parser` consumed.
pub fn recognize<'a, T, P>(parser: P) -> impl Parser<'a, char, String>
where
    P: Parser<'a, char, T>,
{
    map(recognize_slice(parser), |cs: &[char]| cs.iter().collect::<String>())
}

pub fn join<'a, P>(parser: P) -> impl Parser<'a, char, String>
where
    P: Parser<'a, char, Vec<char>>,
{
    map(parser, |cs: Vec<char>| cs.into_iter().collect::<String>())
}

pub fn concat<'a, P>(parser: P) -> impl Parser<'a, char, String>
where
    P: Parser<'a, char, Vec<String>>,
{
    map(parser, |ss: Vec<String>| ss.concat())
}

/// A head char followed by a tail string.
pub fn cons<'a, P, Q>(head: P, tail: Q) -> impl Parser<'a, char, String>
where
    P: Parser<'a, char, char>,
    Q: Parser<'a, char, String>,
{
    concat(seq((map(head, String::from), tail)))
}
