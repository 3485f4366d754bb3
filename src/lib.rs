#![warn(clippy::all)]
#![warn(clippy::correctness)]
#![warn(clippy::style)]
#![warn(clippy::complexity)]
#![warn(clippy::perf)]
/*!
# chainparse

Parser combinators over any in-memory sequence of comparable tokens: `char`s,
bytes, or your own lexer's tokens.

A parser is anything implementing [`Parser`](prelude::Parser), which every
`Fn(&Context<C>, Cursor<'a, C>) -> PResult<'a, C, T>` does. Parsers are built by
composing plain functions; there is no grammar compilation step.

```
use chainparse::prelude::*;

let input = chars::input("HHHJ");
let hs = many0(chars::char('H'));
let out = hs.run(&Context::new(), Cursor::new(&input));
assert_eq!(out.position(), 3);
assert_eq!(out.result, Ok(vec!['H', 'H', 'H']));
```

Failures carry a message and the position where they were noticed, never a
cursor: a failed parser has consumed nothing, and the caller carries on from
the cursor it already holds.

Two decorators are available for any parser:
- [`Memo`](prelude::Memo) caches results per input position, for grammars whose
  alternatives re-parse a shared prefix.
- [`traced`](prelude::traced) names a site and reports entry and exit to the
  [`Tracer`](prelude::Tracer) carried by the [`Context`](prelude::Context).
  [`LogTracer`](prelude::LogTracer) writes them through the `log` crate under
  the `chainparse` target.
*/

mod branch;
mod combinator;
mod context;
mod cursor;
mod error;
mod logging;
mod memo;
mod multi;
mod parser;
mod sequence;
mod token;
mod trace;
mod util;

pub mod bytes;
pub mod chars;
pub mod contrib;
pub mod prelude;

pub const LOG_TARGET: &str = "chainparse";
