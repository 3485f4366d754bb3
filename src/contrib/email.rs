// \b[A-Z0-9._%+-]+@[A-Z0-9-]+(\.[A-Z0-9-]+)*\.[A-Z]{2,4}\b

use once_cell::sync::Lazy;

use crate::{chars, prelude::*};

static NAME: Lazy<Vec<char>> = Lazy::new(|| {
    ('A'..='Z')
        .chain('0'..='9')
        .chain(['.', '_', '%', '+', '-'])
        .collect()
});
static LABEL: Lazy<Vec<char>> = Lazy::new(|| ('A'..='Z').chain('0'..='9').chain(['-']).collect());

fn is_name_char(c: &char) -> bool {
    NAME.contains(&c.to_ascii_uppercase())
}

fn is_label_char(c: &char) -> bool {
    LABEL.contains(&c.to_ascii_uppercase())
}

/// A dotted domain whose last label is a 2 to 4 letter top-level domain.
fn is_domain(labels: &[Vec<char>]) -> bool {
    match labels.split_last() {
        Some((tld, rest)) => {
            !rest.is_empty() && (2..=4).contains(&tld.len()) && tld.iter().all(chars::is_alpha)
        }
        None => false,
    }
}

/// An email address, as written.
pub fn email<'a>(ctx: &Context<char>, start: Cursor<'a, char>) -> PResult<'a, char, String> {
    let name = many1(satisfy(is_name_char));
    let domain = verify(
        separated_list1(expect('.'), many1(satisfy(is_label_char))),
        |labels: &Vec<Vec<char>>| is_domain(labels),
    );
    let address = seq((discard(name), discard(expect('@')), discard(domain)));
    traced("email::address", chars::recognize(address)).parse(ctx, start)
}
