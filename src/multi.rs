//! Repetition.
//!
//! None of these guard against a parser that succeeds without consuming: such
//! a parser under `many0` loops forever.

use crate::{
    prelude::{Context, Cursor, PResult, ParseError, Parser},
    trace::site,
};

/// Zero or more; never fails.
pub fn many0<'a, C: 'a, T, P>(parser: P) -> impl Parser<'a, C, Vec<T>>
where
    P: Parser<'a, C, T>,
{
    let many0 = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, Vec<T>> {
        let mut values = Vec::new();
        let mut cur = start;
        while let Ok((next, t)) = parser.parse(ctx, cur) {
            values.push(t);
            cur = next;
        }
        Ok((cur, values))
    };
    site("chainparse::many0", many0)
}

/// One or more. The error is that of the first attempt.
pub fn many1<'a, C: 'a, T, P>(parser: P) -> impl Parser<'a, C, Vec<T>>
where
    P: Parser<'a, C, T>,
{
    let many1 = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, Vec<T>> {
        let (mut cur, t) = parser.parse(ctx, start).map_err(|e| e.context("many1"))?;
        let mut values = vec![t];
        while let Ok((next, t)) = parser.parse(ctx, cur) {
            values.push(t);
            cur = next;
        }
        Ok((cur, values))
    };
    site("chainparse::many1", many1)
}

/// At most `max` repetitions, failing (and consuming nothing) when fewer than
/// `min` match.
pub fn many_n<'a, C: 'a, T, P>(min: usize, max: usize, parser: P) -> impl Parser<'a, C, Vec<T>>
where
    P: Parser<'a, C, T>,
{
    let many_n = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, Vec<T>> {
        let mut values = Vec::new();
        let mut cur = start;
        while values.len() < max {
            match parser.parse(ctx, cur) {
                Ok((next, t)) => {
                    values.push(t);
                    cur = next;
                }
                Err(_) => break,
            }
        }
        if values.len() < min {
            return Err(ParseError::new(
                start.position(),
                format!("many_n: got {}, want [{min}, {max}]", values.len()),
            ));
        }
        Ok((cur, values))
    };
    site("chainparse::many_n", many_n)
}

/// Repeats `body` until `terminator` matches; the terminator is tried first at
/// each step. Fails, consuming nothing, if `body` fails before that happens.
pub fn many_till<'a, C: 'a, T, U, P, Q>(body: P, terminator: Q) -> impl Parser<'a, C, (Vec<T>, U)>
where
    P: Parser<'a, C, T>,
    Q: Parser<'a, C, U>,
{
    let many_till = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, (Vec<T>, U)> {
        let mut values = Vec::new();
        let mut cur = start;
        loop {
            if let Ok((end, u)) = terminator.parse(ctx, cur) {
                return Ok((end, (values, u)));
            }
            let (next, t) = body.parse(ctx, cur)?;
            values.push(t);
            cur = next;
        }
    };
    site("chainparse::many_till", many_till)
}

fn separated_tail<'a, C, T, D, P, Q>(
    delim: &Q,
    parser: &P,
    ctx: &Context<C>,
    mut cur: Cursor<'a, C>,
    values: &mut Vec<T>,
) -> Cursor<'a, C>
where
    P: Parser<'a, C, T>,
    Q: Parser<'a, C, D>,
{
    loop {
        let Ok((after_delim, _)) = delim.parse(ctx, cur) else {
            return cur;
        };
        // a trailing delimiter is left for the caller
        let Ok((next, t)) = parser.parse(ctx, after_delim) else {
            return cur;
        };
        values.push(t);
        cur = next;
    }
}

/// Values separated by `delim`; possibly none.
pub fn separated_list0<'a, C: 'a, T, D, P, Q>(delim: Q, parser: P) -> impl Parser<'a, C, Vec<T>>
where
    P: Parser<'a, C, T>,
    Q: Parser<'a, C, D>,
{
    let separated_list0 = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, Vec<T>> {
        let Ok((cur, t)) = parser.parse(ctx, start) else {
            return Ok((start, Vec::new()));
        };
        let mut values = vec![t];
        let end = separated_tail(&delim, &parser, ctx, cur, &mut values);
        Ok((end, values))
    };
    site("chainparse::separated_list0", separated_list0)
}

/// Values separated by `delim`; at least one.
pub fn separated_list1<'a, C: 'a, T, D, P, Q>(delim: Q, parser: P) -> impl Parser<'a, C, Vec<T>>
where
    P: Parser<'a, C, T>,
    Q: Parser<'a, C, D>,
{
    let separated_list1 = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, Vec<T>> {
        let (cur, t) = parser
            .parse(ctx, start)
            .map_err(|e| e.context("separated_list1"))?;
        let mut values = vec![t];
        let end = separated_tail(&delim, &parser, ctx, cur, &mut values);
        Ok((end, values))
    };
    site("chainparse::separated_list1", separated_list1)
}
