//! Integer arithmetic: `+ - * /`, parentheses, spaces and tabs between tokens.
//!
//! ```text
//! expression := parens | sum
//! sum        := product ('+' | '-') sum | product
//! product    := term ('*' | '/') product | term
//! term       := number | parens
//! parens     := '(' expression ')'
//! ```
//!
//! The rules are right-recursive, so operators of equal precedence group to the
//! right: `8 - 2 - 1` is `8 - (2 - 1)`. Alternatives re-parse their shared
//! prefix, which is what the per-rule memo tables are for.

use std::{cell::RefCell, fmt};

use crate::{chars, prelude::*};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Number(i64),
    Binary {
        op: char,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: char, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// `None` on overflow or division by zero.
    pub fn evaluate(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Binary { op, lhs, rhs } => {
                let (l, r) = (lhs.evaluate()?, rhs.evaluate()?);
                match op {
                    '+' => l.checked_add(r),
                    '-' => l.checked_sub(r),
                    '*' => l.checked_mul(r),
                    '/' => l.checked_div(r),
                    _ => None,
                }
            }
        }
    }
}

impl Default for Expr {
    fn default() -> Self {
        Self::Number(0)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Binary { op, lhs, rhs } => write!(f, "({lhs} {op} {rhs})"),
        }
    }
}

/// One memo table per rule, so a grammar value serves one input buffer at a
/// time: build a fresh one per parse.
pub struct Grammar<'a> {
    memoized: bool,
    expression: Memo<'a, char, Expr>,
    parens: Memo<'a, char, Expr>,
    sum: Memo<'a, char, Expr>,
    sum_operator: Memo<'a, char, char>,
    product: Memo<'a, char, Expr>,
    product_operator: Memo<'a, char, char>,
    term: Memo<'a, char, Expr>,
    number: Memo<'a, char, Expr>,
}

impl<'a> Grammar<'a> {
    pub fn new() -> Self {
        Self {
            memoized: true,
            expression: Memo::new("expression::expression"),
            parens: Memo::new("expression::parens"),
            sum: Memo::new("expression::sum"),
            sum_operator: Memo::new("expression::sum_operator"),
            product: Memo::new("expression::product"),
            product_operator: Memo::new("expression::product_operator"),
            term: Memo::new("expression::term"),
            number: Memo::new("expression::number"),
        }
    }

    /// The same grammar without memo tables.
    pub fn plain() -> Self {
        Self {
            memoized: false,
            ..Self::new()
        }
    }

    /// Hit and miss counts per rule.
    pub fn memo_stats(&self) -> Vec<(&'static str, MemoStats)> {
        [
            &self.expression,
            &self.parens,
            &self.sum,
            &self.product,
            &self.term,
            &self.number,
        ]
        .iter()
        .map(|m| (m.tag(), m.stats()))
        .chain(
            [&self.sum_operator, &self.product_operator]
                .iter()
                .map(|m| (m.tag(), m.stats())),
        )
        .collect()
    }

    /// A traced, optionally memoized rule.
    fn rule<T, P>(&self, memo: &Memo<'a, char, T>, parser: P) -> impl Parser<'a, char, T>
    where
        T: Clone + fmt::Debug,
        P: Parser<'a, char, T>,
    {
        let name = memo.tag();
        let memo = self.memoized.then(|| memo.clone());
        let inner = move |ctx: &Context<char>, start: Cursor<'a, char>| -> PResult<'a, char, T> {
            match &memo {
                Some(m) => m.apply(&parser, ctx, start),
                None => parser.parse(ctx, start),
            }
        };
        traced(name, inner)
    }

    pub fn expression(
        &self,
        ctx: &Context<char>,
        start: Cursor<'a, char>,
    ) -> PResult<'a, char, Expr> {
        let parens = from_fn(|ctx, c| self.parens(ctx, c));
        let sum = from_fn(|ctx, c| self.sum(ctx, c));
        self.rule(&self.expression, alt((parens, sum))).parse(ctx, start)
    }

    pub fn parens(&self, ctx: &Context<char>, start: Cursor<'a, char>) -> PResult<'a, char, Expr> {
        let expression = from_fn(|ctx, c| self.expression(ctx, c));
        self.rule(&self.parens, chars::surrounded_by('(', ')', expression))
            .parse(ctx, start)
    }

    pub fn sum(&self, ctx: &Context<char>, start: Cursor<'a, char>) -> PResult<'a, char, Expr> {
        let product = from_fn(|ctx, c| self.product(ctx, c));
        let operator = from_fn(|ctx, c| self.sum_operator(ctx, c));
        let sum = from_fn(|ctx, c| self.sum(ctx, c));
        let binary = binary_rule(product, operator, sum);
        let product = from_fn(|ctx, c| self.product(ctx, c));
        self.rule(&self.sum, alt((binary, product))).parse(ctx, start)
    }

    pub fn sum_operator(
        &self,
        ctx: &Context<char>,
        start: Cursor<'a, char>,
    ) -> PResult<'a, char, char> {
        self.rule(&self.sum_operator, chars::one_of("+-")).parse(ctx, start)
    }

    pub fn product(&self, ctx: &Context<char>, start: Cursor<'a, char>) -> PResult<'a, char, Expr> {
        let term = from_fn(|ctx, c| self.term(ctx, c));
        let operator = from_fn(|ctx, c| self.product_operator(ctx, c));
        let product = from_fn(|ctx, c| self.product(ctx, c));
        let binary = binary_rule(term, operator, product);
        let term = from_fn(|ctx, c| self.term(ctx, c));
        self.rule(&self.product, alt((binary, term))).parse(ctx, start)
    }

    pub fn product_operator(
        &self,
        ctx: &Context<char>,
        start: Cursor<'a, char>,
    ) -> PResult<'a, char, char> {
        self.rule(&self.product_operator, chars::one_of("*/")).parse(ctx, start)
    }

    pub fn term(&self, ctx: &Context<char>, start: Cursor<'a, char>) -> PResult<'a, char, Expr> {
        let number = from_fn(|ctx, c| self.number(ctx, c));
        let parens = from_fn(|ctx, c| self.parens(ctx, c));
        self.rule(&self.term, alt((number, parens))).parse(ctx, start)
    }

    pub fn number(&self, ctx: &Context<char>, start: Cursor<'a, char>) -> PResult<'a, char, Expr> {
        let number = map_res(chars::digit1, |digits: String| digits.parse().map(Expr::Number));
        self.rule(&self.number, number).parse(ctx, start)
    }
}

impl<'a> Default for Grammar<'a> {
    fn default() -> Self {
        Self::new()
    }
}

/// `lhs op rhs`, spaces allowed before each part.
fn binary_rule<'a, L, O, R>(lhs: L, op: O, rhs: R) -> impl Parser<'a, char, Expr>
where
    L: Parser<'a, char, Expr>,
    O: Parser<'a, char, char>,
    R: Parser<'a, char, Expr>,
{
    move |ctx: &Context<char>, start: Cursor<'a, char>| -> PResult<'a, char, Expr> {
        let (l, o, r) = (RefCell::default(), RefCell::new(' '), RefCell::default());
        let (end, _) = chars::phrase((
            bind(&l, by_ref(&lhs)),
            bind(&o, by_ref(&op)),
            bind(&r, by_ref(&rhs)),
        ))
        .parse(ctx, start)?;
        Ok((end, Expr::binary(o.into_inner(), l.into_inner(), r.into_inner())))
    }
}

/// Parses all of `text`, which may have leading and trailing whitespace.
pub fn parse(text: &str) -> Result<Expr, ParseError> {
    let input = chars::input(text);
    let grammar = Grammar::new();
    let expression = from_fn(|ctx, c| grammar.expression(ctx, c));
    let whole = all_consuming(terminated(expression, chars::multispace0));
    let (_, expr) = whole.parse(&Context::new(), Cursor::new(&input))?;
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, rc::Rc};

    use super::{parse, Expr, Grammar};
    use crate::{chars, prelude::*};
    use test_log::test;

    const NESTED: &str = "    (1*7 + 1 + (2*3+\t4/2))  ";

    #[test]
    fn test_nested_expression() {
        let input = chars::input(NESTED);
        let grammar = Grammar::new();
        let (end, expr) = grammar.expression(&Context::new(), Cursor::new(&input)).unwrap();
        assert_eq!(end.position(), 26);
        assert_eq!(expr.to_string(), "((1 * 7) + (1 + ((2 * 3) + (4 / 2))))");
        assert_eq!(expr.evaluate(), Some(16));
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse(NESTED).unwrap().evaluate(), Some(16));
        assert_eq!(parse("42").unwrap(), Expr::Number(42));
        assert_eq!(parse(" 8 - 2 - 1").unwrap().evaluate(), Some(7));
        assert_eq!(parse("2 * 3 + 4").unwrap().evaluate(), Some(10));
        assert_eq!(parse("7 / (3 - 3)").unwrap().evaluate(), None);

        assert!(parse("1 +").is_err());
        assert!(parse("(1").is_err());
        assert!(parse("").is_err());
        assert!(parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_memo_and_plain_agree() {
        let input = chars::input(NESTED);
        let ctx = Context::new();
        let memoized = Grammar::new();
        let plain = Grammar::plain();
        let c = Cursor::new(&input);
        assert_eq!(memoized.expression(&ctx, c), plain.expression(&ctx, c));

        let stats: HashMap<_, _> = memoized.memo_stats().into_iter().collect();
        assert!(stats["expression::term"].hits > 0);
        assert!(stats["expression::product"].hits > 0);
        assert!(plain.memo_stats().iter().all(|(_, s)| *s == MemoStats::default()));
    }

    #[test]
    fn test_rules_are_traced() {
        let input = chars::input("1+2");
        let filter = TraceFilter::new().include_module("expression").unwrap();
        let tracer = Rc::new(RecordingTracer::with_filter(filter));
        let ctx: Context<char> = Context::new().with_tracer(tracer.clone()).with_tracing();
        Grammar::new().expression(&ctx, Cursor::new(&input)).unwrap();

        let events = tracer.events();
        assert!(events.iter().all(|e| e.name().starts_with("expression::")));
        assert_eq!(tracer.enter_count("expression::expression"), 1);
        assert_eq!(
            tracer.enter_count("expression::number"),
            tracer.exit_count("expression::number")
        );

        // cached rules answer identically on every visit to a position
        let mut seen: HashMap<(String, usize), &Result<String, String>> = HashMap::new();
        for e in &events {
            if let TraceEvent::Exit {
                name, start, result, ..
            } = e
            {
                let first = seen.entry((name.clone(), *start)).or_insert(result);
                assert_eq!(*first, result);
            }
        }
    }
}
