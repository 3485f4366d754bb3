use chainparse::contrib::expression::{Expr, Grammar};
use chainparse::prelude::*;

pub fn memoized_parser(s: &str) -> Expr {
    expression(s, true)
}

pub fn plain_parser(s: &str) -> Expr {
    expression(s, false)
}

fn expression(s: &str, memoized: bool) -> Expr {
    let input = chars::input(s);
    let grammar = if memoized {
        Grammar::new()
    } else {
        Grammar::plain()
    };
    let expression = from_fn(|ctx, c| grammar.expression(ctx, c));
    let whole = all_consuming(terminated(expression, chars::multispace0));
    let parsed = whole.parse(&Context::new(), Cursor::new(&input));
    parsed.map(|(_, expr)| expr).unwrap_or_default()
}
