//! Combinators over a single parser: value transforms, optionality and lookahead.

use std::{cell::RefCell, fmt::Display};

use crate::{
    prelude::{eof, terminated, Context, Cursor, PResult, ParseError, Parser, Span},
    trace::{parse_site, site},
};

pub fn map<'a, C: 'a, T, U, P, F>(parser: P, f: F) -> impl Parser<'a, C, U>
where
    P: Parser<'a, C, T>,
    F: Fn(T) -> U,
{
    let map = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, U> {
        let (end, t) = parser.parse(ctx, start)?;
        Ok((end, f(t)))
    };
    site("chainparse::map", map)
}

/// Like [`map`], but `f` may refuse the value; its error becomes the failure
/// message, reported at the start of the match.
pub fn map_res<'a, C: 'a, T, U, E, P, F>(parser: P, f: F) -> impl Parser<'a, C, U>
where
    P: Parser<'a, C, T>,
    F: Fn(T) -> Result<U, E>,
    E: Display,
{
    let map_res = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, U> {
        let (end, t) = parser.parse(ctx, start)?;
        let u = f(t).map_err(|e| ParseError::new(start.position(), e.to_string()))?;
        Ok((end, u))
    };
    site("chainparse::map_res", map_res)
}

/// Never fails; `None` (and no consumption) when `parser` does not match.
pub fn opt<'a, C: 'a, T, P>(parser: P) -> impl Parser<'a, C, Option<T>>
where
    P: Parser<'a, C, T>,
{
    let opt = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, Option<T>> {
        match parser.parse(ctx, start) {
            Ok((end, t)) => Ok((end, Some(t))),
            Err(_) => Ok((start, None)),
        }
    };
    site("chainparse::opt", opt)
}

/// Runs `parser` only when `enabled`; otherwise succeeds with `None`.
pub fn cond<'a, C: 'a, T, P>(enabled: bool, parser: P) -> impl Parser<'a, C, Option<T>>
where
    P: Parser<'a, C, T>,
{
    let cond = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, Option<T>> {
        if !enabled {
            return Ok((start, None));
        }
        let (end, t) = parser.parse(ctx, start)?;
        Ok((end, Some(t)))
    };
    site("chainparse::cond", cond)
}

/// Lookahead: `parser`'s value, without consuming.
pub fn peek<'a, C: 'a, T, P>(parser: P) -> impl Parser<'a, C, T>
where
    P: Parser<'a, C, T>,
{
    let peek = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, T> {
        let (_, t) = parser.parse(ctx, start)?;
        Ok((start, t))
    };
    site("chainparse::peek", peek)
}

/// Negative lookahead: succeeds exactly when `parser` fails. Never consumes.
pub fn not<'a, C: 'a, T, P>(parser: P) -> impl Parser<'a, C, ()>
where
    P: Parser<'a, C, T>,
{
    let not = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, ()> {
        match parser.parse(ctx, start) {
            Ok(_) => Err(ParseError::new(start.position(), "not: inner parser matched")),
            Err(_) => Ok((start, ())),
        }
    };
    site("chainparse::not", not)
}

pub fn verify<'a, C: 'a, T, P, F>(parser: P, check: F) -> impl Parser<'a, C, T>
where
    P: Parser<'a, C, T>,
    F: Fn(&T) -> bool,
{
    let verify = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, T> {
        let (end, t) = parser.parse(ctx, start)?;
        if !check(&t) {
            return Err(ParseError::new(start.position(), "verify: check failed"));
        }
        Ok((end, t))
    };
    site("chainparse::verify", verify)
}

/// Runs `parser` for control flow only and yields `val` instead.
pub fn value<'a, C: 'a, T, U, P>(val: U, parser: P) -> impl Parser<'a, C, U>
where
    P: Parser<'a, C, T>,
    U: Clone,
{
    let value = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, U> {
        let (end, _) = parser.parse(ctx, start)?;
        Ok((end, val.clone()))
    };
    site("chainparse::value", value)
}

/// Stores the value in `slot` on success. Nothing is written on failure.
pub fn bind<'s, 'a, C: 'a, T, P>(slot: &'s RefCell<T>, parser: P) -> impl Parser<'a, C, ()> + 's
where
    P: Parser<'a, C, T> + 's,
{
    move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, ()> {
        let (end, t) = parse_site("chainparse::bind", &parser, ctx, start)?;
        *slot.borrow_mut() = t;
        Ok((end, ()))
    }
}

pub fn discard<'a, C: 'a, T, P>(parser: P) -> impl Parser<'a, C, ()>
where
    P: Parser<'a, C, T>,
{
    let discard = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, ()> {
        let (end, _) = parser.parse(ctx, start)?;
        Ok((end, ()))
    };
    site("chainparse::discard", discard)
}

/// The input tokens `parser` consumed, borrowed straight from the buffer.
pub fn recognize<'a, C: 'a, T, P>(parser: P) -> impl Parser<'a, C, &'a [C]>
where
    P: Parser<'a, C, T>,
{
    let recognize = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, &'a [C]> {
        let (end, _) = parser.parse(ctx, start)?;
        Ok((end, start.slice_to(&end).unwrap_or_default()))
    };
    site("chainparse::recognize", recognize)
}

/// The start and end cursors of what `parser` consumed.
pub fn spanning<'a, C: 'a, T, P>(parser: P) -> impl Parser<'a, C, Span<'a, C>>
where
    P: Parser<'a, C, T>,
{
    let spanning = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, Span<'a, C>> {
        let (end, _) = parser.parse(ctx, start)?;
        Ok((end, Span::new(start, end)))
    };
    site("chainparse::spanning", spanning)
}

/// `parser`, which must then have used up the whole input.
pub fn all_consuming<'a, C: 'a, T, P>(parser: P) -> impl Parser<'a, C, T>
where
    P: Parser<'a, C, T>,
{
    site("chainparse::all_consuming", terminated(parser, eof()))
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use crate::prelude::*;
    use test_log::test;

    fn run<'a, T>(p: impl Parser<'a, char, T>, input: &'a [char]) -> Outcome<'a, char, T> {
        p.run(&Context::new(), Cursor::new(input))
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_map() {
        let input = chars("7x");
        let p = map(satisfy(|c: &char| c.is_ascii_digit()), |c: char| c.to_digit(10));
        let out = run(p, &input);
        assert_eq!((out.position(), out.result), (1, Ok(Some(7))));

        let p = map(expect('x'), |_| 1);
        assert_eq!(run(p, &input).position(), 0);
    }

    #[test]
    fn test_map_res() {
        let input = chars("300");
        let digits = recognize(many1(satisfy(|c: &char| c.is_ascii_digit())));
        let p = map_res(digits, |cs: &[char]| cs.iter().collect::<String>().parse::<u8>());
        let out = run(p, &input);
        assert_eq!(out.position(), 0);
        assert_eq!(
            out.result.unwrap_err().message(),
            "number too large to fit in target type"
        );
    }

    #[test]
    fn test_opt() {
        let (hello, jello) = (chars("Hello"), chars("Jello"));
        let out = run(opt(expect('H')), &hello);
        assert_eq!((out.position(), out.result), (1, Ok(Some('H'))));

        let out = run(opt(expect('H')), &jello);
        assert_eq!((out.position(), out.result), (0, Ok(None)));

        let out = run(opt(expect('H')), &[]);
        assert_eq!((out.position(), out.result), (0, Ok(None)));
    }

    #[test]
    fn test_cond() {
        let input = chars("Hello");
        let out = run(cond(true, expect('H')), &input);
        assert_eq!((out.position(), out.result), (1, Ok(Some('H'))));

        let out = run(cond(false, expect('H')), &input);
        assert_eq!((out.position(), out.result), (0, Ok(None)));

        assert!(!run(cond(true, expect('J')), &input).is_ok());
    }

    #[test]
    fn test_peek() {
        let (hello, jello) = (chars("Hello"), chars("Jello"));
        let out = run(peek(expect('H')), &hello);
        assert_eq!((out.position(), out.result), (0, Ok('H')));
        assert!(!run(peek(expect('H')), &jello).is_ok());
    }

    #[test]
    fn test_not() {
        let (hello, jello) = (chars("Hello"), chars("Jello"));
        let out = run(not(expect('H')), &hello);
        assert_eq!(out.position(), 0);
        assert!(!out.is_ok());

        let out = run(not(expect('H')), &jello);
        assert_eq!((out.position(), out.result), (0, Ok(())));
        assert!(run(not(expect('H')), &[]).is_ok());
    }

    #[test]
    fn test_verify() {
        let input = chars("Hello");
        let p = verify(any(), |c: &char| c.is_uppercase());
        assert_eq!(run(p, &input).result, Ok('H'));

        let p = verify(any(), |c: &char| c.is_lowercase());
        let out = run(p, &input);
        assert_eq!(out.position(), 0);
        assert_eq!(out.result.unwrap_err().message(), "verify: check failed");
    }

    #[test]
    fn test_value_and_discard() {
        let input = chars("+1");
        let out = run(value("plus", expect('+')), &input);
        assert_eq!((out.position(), out.result), (1, Ok("plus")));

        let out = run(discard(expect('+')), &input);
        assert_eq!((out.position(), out.result), (1, Ok(())));
        assert!(!run(discard(expect('-')), &input).is_ok());
    }

    #[test]
    fn test_bind() {
        let input = chars("Hello");
        let slot = RefCell::new('?');

        let out = run(bind(&slot, expect('J')), &input);
        assert!(!out.is_ok());
        assert_eq!(*slot.borrow(), '?', "failed bind must not write");

        let out = run(bind(&slot, expect('H')), &input);
        assert_eq!((out.position(), out.result), (1, Ok(())));
        assert_eq!(*slot.borrow(), 'H');
    }

    #[test]
    fn test_bind_fields_in_sequence() {
        #[derive(Debug, Default, PartialEq)]
        struct Assignment {
            name: char,
            value: u32,
        }

        let input = chars("x=7");
        let (name, val) = (RefCell::new(' '), RefCell::new(0));
        let p = seq((
            bind(&name, satisfy(|c: &char| c.is_alphabetic())),
            discard(expect('=')),
            bind(&val, map(any(), |c: char| c.to_digit(10).unwrap_or_default())),
        ));
        let out = run(p, &input);
        assert_eq!(out.position(), 3);
        let assignment = Assignment {
            name: name.into_inner(),
            value: val.into_inner(),
        };
        assert_eq!(assignment, Assignment { name: 'x', value: 7 });
    }

    #[test]
    fn test_recognize_and_spanning() {
        let input = chars("HHHJ");
        let out = run(recognize(many0(expect('H'))), &input);
        assert_eq!(out.position(), 3);
        assert_eq!(out.result, Ok(&input[..3]));

        let out = run(spanning(many0(expect('H'))), &input);
        let span = out.result.unwrap();
        assert_eq!(span.start.position(), 0);
        assert_eq!(span.end.position(), 3);
        assert_eq!(span.as_slice(), Some(&input[..3]));

        // recognize yields exactly the slice between start and the inner parser's end
        let c = Cursor::new(&input[..]);
        let ctx = Context::new();
        let (end, _) = many1(expect('H')).parse(&ctx, c).unwrap();
        let (rend, slice) = recognize(many1(expect('H'))).parse(&ctx, c).unwrap();
        assert_eq!(end, rend);
        assert_eq!(Some(slice), c.slice_to(&end));

        let out = run(recognize(expect('J')), &input);
        assert_eq!(out.position(), 0);
        assert!(!out.is_ok());

        // empty match at end of input is an empty slice
        let out = run(recognize(many0(expect('H'))), &[]);
        assert_eq!(out.result, Ok(&[][..]));
    }

    #[test]
    fn test_all_consuming() {
        let (hh, hj) = (chars("HH"), chars("HHJ"));
        assert!(run(all_consuming(many0(expect('H'))), &hh).is_ok());
        let out = run(all_consuming(many0(expect('H'))), &hj);
        assert_eq!(out.position(), 0);
        assert!(!out.is_ok());
    }

    #[test]
    fn test_determinism() {
        let input = chars("HHx");
        let calls = Cell::new(0);
        let counted = from_fn(|ctx, c| {
            calls.set(calls.get() + 1);
            expect('H').parse(ctx, c)
        });
        let p = many0(counted);
        let ctx = Context::new();
        let c = Cursor::new(&input[..]);
        let first = p.parse(&ctx, c);
        let second = p.parse(&ctx, c);
        assert_eq!(first, second);
        assert_eq!(calls.get(), 6);
    }
}
