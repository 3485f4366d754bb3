use chainparse::contrib::expression::Expr;
use nom::{
    branch::alt,
    character::complete::{char, digit1, multispace0, one_of, space0},
    combinator::{all_consuming, map, map_res},
    sequence::{delimited, preceded, terminated, tuple},
    IResult,
};

pub fn nom_parser(s: &str) -> Expr {
    match all_consuming(terminated(expression, multispace0))(s) {
        Ok((_, expr)) => expr,
        Err(_) => Expr::default(),
    }
}

fn expression(s: &str) -> IResult<&str, Expr> {
    alt((parens, sum))(s)
}

fn parens(s: &str) -> IResult<&str, Expr> {
    delimited(
        preceded(space0, char('(')),
        preceded(space0, expression),
        preceded(space0, char(')')),
    )(s)
}

fn sum(s: &str) -> IResult<&str, Expr> {
    let binary = map(
        tuple((
            preceded(space0, product),
            preceded(space0, one_of("+-")),
            preceded(space0, sum),
        )),
        |(lhs, op, rhs)| Expr::binary(op, lhs, rhs),
    );
    alt((binary, product))(s)
}

fn product(s: &str) -> IResult<&str, Expr> {
    let binary = map(
        tuple((
            preceded(space0, term),
            preceded(space0, one_of("*/")),
            preceded(space0, product),
        )),
        |(lhs, op, rhs)| Expr::binary(op, lhs, rhs),
    );
    alt((binary, term))(s)
}

fn term(s: &str) -> IResult<&str, Expr> {
    alt((number, parens))(s)
}

fn number(s: &str) -> IResult<&str, Expr> {
    map_res(digit1, |digits: &str| digits.parse().map(Expr::Number))(s)
}
