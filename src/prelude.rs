pub use crate::{
    branch::{alt, Alternatives},
    bytes, chars,
    combinator::{
        all_consuming, bind, cond, discard, map, map_res, not, opt, peek, recognize, spanning,
        value, verify,
    },
    context::Context,
    cursor::{Cursor, CursorKey, Span},
    error::ParseError,
    logging::LogTracer,
    memo::{memoize, Memo, MemoStats},
    multi::{many0, many1, many_n, many_till, separated_list0, separated_list1},
    parser::{boxed, by_ref, from_fn, BoxedParser, Outcome, PResult, Parser},
    sequence::{append, first, pair, preceded, second, seq, surrounded, terminated, Sequence},
    token::{any, eof, expect, expects, failure, none_of, one_of, rest, rest_len, satisfy, success},
    trace::{hidden, traced, visible, RecordingTracer, TraceEvent, TraceFilter, Tracer},
    util::Preview,
};
