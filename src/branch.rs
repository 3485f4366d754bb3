use crate::{
    prelude::{Context, Cursor, PResult, ParseError, Parser},
    trace::site,
};

/// Ordered choices sharing one value type: tuples (up to 12), arrays and `Vec`s
/// of parsers.
pub trait Alternatives<'a, C, T> {
    /// The first alternative that matches at `start`, if any.
    fn choose(&self, ctx: &Context<C>, start: Cursor<'a, C>) -> Option<(Cursor<'a, C>, T)>;
}

fn choose_slice<'a, C, T, P>(
    alts: &[P],
    ctx: &Context<C>,
    start: Cursor<'a, C>,
) -> Option<(Cursor<'a, C>, T)>
where
    P: Parser<'a, C, T>,
{
    alts.iter().find_map(|p| p.parse(ctx, start).ok())
}

impl<'a, C, T, P, const N: usize> Alternatives<'a, C, T> for [P; N]
where
    P: Parser<'a, C, T>,
{
    fn choose(&self, ctx: &Context<C>, start: Cursor<'a, C>) -> Option<(Cursor<'a, C>, T)> {
        choose_slice(self, ctx, start)
    }
}

impl<'a, C, T, P> Alternatives<'a, C, T> for Vec<P>
where
    P: Parser<'a, C, T>,
{
    fn choose(&self, ctx: &Context<C>, start: Cursor<'a, C>) -> Option<(Cursor<'a, C>, T)> {
        choose_slice(self, ctx, start)
    }
}

macro_rules! alternatives_tuple {
    ($($P:ident $idx:tt),+) => {
        impl<'a, C, T, $($P),+> Alternatives<'a, C, T> for ($($P,)+)
        where
            $($P: Parser<'a, C, T>),+
        {
            fn choose(&self, ctx: &Context<C>, start: Cursor<'a, C>) -> Option<(Cursor<'a, C>, T)> {
                $(
                    if let Ok(res) = self.$idx.parse(ctx, start) {
                        return Some(res);
                    }
                )+
                None
            }
        }
    };
}

alternatives_tuple!(P0 0);
alternatives_tuple!(P0 0, P1 1);
alternatives_tuple!(P0 0, P1 1, P2 2);
alternatives_tuple!(P0 0, P1 1, P2 2, P3 3);
alternatives_tuple!(P0 0, P1 1, P2 2, P3 3, P4 4);
alternatives_tuple!(P0 0, P1 1, P2 2, P3 3, P4 4, P5 5);
alternatives_tuple!(P0 0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6);
alternatives_tuple!(P0 0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6, P7 7);
alternatives_tuple!(P0 0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6, P7 7, P8 8);
alternatives_tuple!(P0 0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6, P7 7, P8 8, P9 9);
alternatives_tuple!(P0 0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6, P7 7, P8 8, P9 9, P10 10);
alternatives_tuple!(P0 0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6, P7 7, P8 8, P9 9, P10 10, P11 11);

/// Ordered choice: each alternative is tried at the same start and the first
/// success wins.
///
/// When none match, the individual failures are dropped and the error is
/// `no alternatives matched` at the start position.
pub fn alt<'a, C: 'a, T, A>(alternatives: A) -> impl Parser<'a, C, T>
where
    A: Alternatives<'a, C, T>,
{
    let alt = move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, T> {
        alternatives
            .choose(ctx, start)
            .ok_or_else(|| ParseError::new(start.position(), "no alternatives matched"))
    };
    site("chainparse::alt", alt)
}
