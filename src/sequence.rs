use crate::{
    prelude::{Context, Cursor, PResult, Parser},
    trace::site,
};

/// A fixed, ordered collection of parsers sharing one value type.
///
/// Implemented for tuples (up to 12), arrays and `Vec`s of parsers, so `seq`
/// accepts whichever is handy. Use [`boxed`](crate::prelude::boxed) to mix
/// parser types in an array or `Vec`.
pub trait Sequence<'a, C, T> {
    /// Runs each parser in turn, each one after a run of `ignored`.
    fn parse_each_preceded<U, I>(
        &self,
        ignored: &I,
        ctx: &Context<C>,
        start: Cursor<'a, C>,
    ) -> PResult<'a, C, Vec<T>>
    where
        I: Parser<'a, C, U>;
}

fn parse_slice<'a, C, T, U, P, I>(
    parsers: &[P],
    ignored: &I,
    ctx: &Context<C>,
    start: Cursor<'a, C>,
) -> PResult<'a, C, Vec<T>>
where
    P: Parser<'a, C, T>,
    I: Parser<'a, C, U>,
{
    let mut values = Vec::with_capacity(parsers.len());
    let mut cur = start;
    for p in parsers {
        let (next, _) = ignored.parse(ctx, cur)?;
        let (next, t) = p.parse(ctx, next)?;
        values.push(t);
        cur = next;
    }
    Ok((cur, values))
}

impl<'a, C, T, P, const N: usize> Sequence<'a, C, T> for [P; N]
where
    P: Parser<'a, C, T>,
{
    fn parse_each_preceded<U, I>(
        &self,
        ignored: &I,
        ctx: &Context<C>,
        start: Cursor<'a, C>,
    ) -> PResult<'a, C, Vec<T>>
    where
        I: Parser<'a, C, U>,
    {
        parse_slice(self, ignored, ctx, start)
    }
}

impl<'a, C, T, P> Sequence<'a, C, T> for Vec<P>
where
    P: Parser<'a, C, T>,
{
    fn parse_each_preceded<U, I>(
        &self,
        ignored: &I,
        ctx: &Context<C>,
        start: Cursor<'a, C>,
    ) -> PResult<'a, C, Vec<T>>
    where
        I: Parser<'a, C, U>,
    {
        parse_slice(self, ignored, ctx, start)
    }
}

macro_rules! sequence_tuple {
    ($($P:ident $idx:tt),+) => {
        impl<'a, C, T, $($P),+> Sequence<'a, C, T> for ($($P,)+)
        where
            $($P: Parser<'a, C, T>),+
        {
            fn parse_each_preceded<U, I>(
                &self,
                ignored: &I,
                ctx: &Context<C>,
                start: Cursor<'a, C>,
            ) -> PResult<'a, C, Vec<T>>
            where
                I: Parser<'a, C, U>,
            {
                let mut values = Vec::new();
                let cur = start;
                $(
                    let (cur, _) = ignored.parse(ctx, cur)?;
                    let (cur, t) = self.$idx.parse(ctx, cur)?;
                    values.push(t);
                )+
                Ok((cur, values))
            }
        }
    };
}

sequence_tuple!(P0 0);
sequence_tuple!(P0 0, P1 1);
sequence_tuple!(P0 0, P1 1, P2 2);
sequence_tuple!(P0 0, P1 1, P2 2, P3 3);
sequence_tuple!(P0 0, P1 1, P2 2, P3 3, P4 4);
sequence_tuple!(P0 0, P1 1, P2 2, P3 3, P4 4, P5 5);
sequence_tuple!(P0 0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6);
sequence_tuple!(P0 0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6, P7 7);
sequence_tuple!(P0 0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6, P7 7, P8 8);
sequence_tuple!(P0 0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6, P7 7, P8 8, P9 9);
sequence_tuple!(P0 0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6, P7 7, P8 8, P9 9, P10 10);
sequence_tuple!(P0 0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6, P7 7, P8 8, P9 9, P10 10, P11 11);

/// Runs every parser in order, collecting their values. Fails, consuming
/// nothing, as soon as one of them fails.
pub fn seq<'a, C: 'a, T, S>(parsers: S) -> impl Parser<'a, C, Vec<T>>
where
    S: Sequence<'a, C, T>,
{
    let nothing = |_: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, ()> { Ok((start, ())) };
    let seq = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, Vec<T>> {
        parsers.parse_each_preceded(&nothing, ctx, start)
    };
    site("chainparse::seq", seq)
}

/// `head`'s values followed by one value from each of `tail`.
pub fn append<'a, C: 'a, T, P, S>(head: P, tail: S) -> impl Parser<'a, C, Vec<T>>
where
    P: Parser<'a, C, Vec<T>>,
    S: Sequence<'a, C, T>,
{
    let seq_tail = seq(tail);
    let append = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, Vec<T>> {
        let (cur, mut values) = head.parse(ctx, start)?;
        let (end, more) = seq_tail.parse(ctx, cur)?;
        values.extend(more);
        Ok((end, values))
    };
    site("chainparse::append", append)
}

pub fn pair<'a, C: 'a, A, B, P, Q>(first: P, second: Q) -> impl Parser<'a, C, (A, B)>
where
    P: Parser<'a, C, A>,
    Q: Parser<'a, C, B>,
{
    let pair = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, (A, B)> {
        let (cur, a) = first.parse(ctx, start)?;
        let (end, b) = second.parse(ctx, cur)?;
        Ok((end, (a, b)))
    };
    site("chainparse::pair", pair)
}

/// Projects the left value of a pair parser.
pub fn first<'a, C: 'a, A, B, P>(parser: P) -> impl Parser<'a, C, A>
where
    P: Parser<'a, C, (A, B)>,
{
    let first = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, A> {
        let (end, (a, _)) = parser.parse(ctx, start)?;
        Ok((end, a))
    };
    site("chainparse::first", first)
}

/// Projects the right value of a pair parser.
pub fn second<'a, C: 'a, A, B, P>(parser: P) -> impl Parser<'a, C, B>
where
    P: Parser<'a, C, (A, B)>,
{
    let second = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, B> {
        let (end, (_, b)) = parser.parse(ctx, start)?;
        Ok((end, b))
    };
    site("chainparse::second", second)
}

pub fn preceded<'a, C: 'a, A, B, P, Q>(ignored: P, kept: Q) -> impl Parser<'a, C, B>
where
    P: Parser<'a, C, A>,
    Q: Parser<'a, C, B>,
{
    let preceded = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, B> {
        let (cur, _) = ignored.parse(ctx, start)?;
        kept.parse(ctx, cur)
    };
    site("chainparse::preceded", preceded)
}

pub fn terminated<'a, C: 'a, A, B, P, Q>(kept: P, ignored: Q) -> impl Parser<'a, C, A>
where
    P: Parser<'a, C, A>,
    Q: Parser<'a, C, B>,
{
    let terminated = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, A> {
        let (cur, a) = kept.parse(ctx, start)?;
        let (end, _) = ignored.parse(ctx, cur)?;
        Ok((end, a))
    };
    site("chainparse::terminated", terminated)
}

/// `middle`'s value, between `open` and `close`.
pub fn surrounded<'a, C: 'a, O, E, M, P, Q, R>(
    open: P,
    close: Q,
    middle: R,
) -> impl Parser<'a, C, M>
where
    P: Parser<'a, C, O>,
    Q: Parser<'a, C, E>,
    R: Parser<'a, C, M>,
{
    let surrounded = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, M> {
        let (cur, _) = open.parse(ctx, start)?;
        let (cur, m) = middle.parse(ctx, cur)?;
        let (end, _) = close.parse(ctx, cur)?;
        Ok((end, m))
    };
    site("chainparse::surrounded", surrounded)
}
