//! Execution tracing for named parser sites.
//!
//! A site is named once, where the grammar is built, with [`traced`]. At run time
//! the site reports `enter` and `exit` to whatever [`Tracer`] the [`Context`]
//! carries, provided tracing is switched on there. [`hidden`] and [`visible`]
//! force tracing off or on for one subtree of the parse.
//!
//! The built-in combinators are sites too, named `chainparse::<combinator>`
//! (`chainparse::alt`, `chainparse::many0`, ...). They report the span they
//! consumed in place of their value. `TraceFilter::exclude_module("chainparse")`
//! leaves only the sites a grammar names itself.

use std::{cell::RefCell, fmt::Debug};

use regex::Regex;

use crate::prelude::{Context, Cursor, PResult, ParseError, Parser, Span};

/// Observer of parser entry and exit.
///
/// Methods take `&self`; implementations keep their own state in cells.
pub trait Tracer<C> {
    fn enter(&self, name: &str, start: Cursor<'_, C>);

    /// `end` equals `start` when the site failed.
    fn exit(
        &self,
        name: &str,
        start: Cursor<'_, C>,
        end: Cursor<'_, C>,
        outcome: Result<&dyn Debug, &ParseError>,
    );
}

/// Names a parser site for tracing. The value type must be `Debug` so tracers
/// can show what was produced.
pub fn traced<'a, C: 'a, T, P>(name: &'static str, parser: P) -> impl Parser<'a, C, T>
where
    P: Parser<'a, C, T>,
    T: Debug,
{
    move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, T> {
        let Some(tracer) = ctx.active_tracer() else {
            return parser.parse(ctx, start);
        };
        tracer.enter(name, start);
        let res = parser.parse(ctx, start);
        match &res {
            Ok((end, value)) => tracer.exit(name, start, *end, Ok(value as &dyn Debug)),
            Err(e) => tracer.exit(name, start, start, Err(e)),
        }
        res
    }
}

/// A built-in combinator site. The exit event carries the consumed [`Span`],
/// so the value type needs no `Debug`.
pub(crate) fn site<'a, C: 'a, T, P>(name: &'static str, parser: P) -> impl Parser<'a, C, T>
where
    P: Parser<'a, C, T>,
{
    move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, T> {
        parse_site(name, &parser, ctx, start)
    }
}

/// One run of `parser` as the built-in site `name`.
pub(crate) fn parse_site<'a, C: 'a, T, P>(
    name: &'static str,
    parser: &P,
    ctx: &Context<C>,
    start: Cursor<'a, C>,
) -> PResult<'a, C, T>
where
    P: Parser<'a, C, T>,
{
    let Some(tracer) = ctx.active_tracer() else {
        return parser.parse(ctx, start);
    };
    tracer.enter(name, start);
    let res = parser.parse(ctx, start);
    match &res {
        Ok((end, _)) => {
            let span = Span::new(start, *end);
            tracer.exit(name, start, *end, Ok(&span as &dyn Debug))
        }
        Err(e) => tracer.exit(name, start, start, Err(e)),
    }
    res
}

/// Runs `parser` with tracing switched off for its whole subtree.
pub fn hidden<'a, C: 'a, T, P>(parser: P) -> impl Parser<'a, C, T>
where
    P: Parser<'a, C, T>,
{
    move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, T> {
        parser.parse(&ctx.scoped(false), start)
    }
}

/// Runs `parser` with tracing switched on for its whole subtree, even when the
/// surrounding context has it off.
pub fn visible<'a, C: 'a, T, P>(parser: P) -> impl Parser<'a, C, T>
where
    P: Parser<'a, C, T>,
{
    move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, T> {
        parser.parse(&ctx.scoped(true), start)
    }
}

/// Include/exclude lists of site-name patterns.
///
/// Exclusion wins over inclusion; an empty include list includes every name not
/// excluded.
#[derive(Debug, Clone, Default)]
pub struct TraceFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl TraceFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.include.push(Regex::new(pattern)?);
        Ok(self)
    }

    pub fn exclude(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.exclude.push(Regex::new(pattern)?);
        Ok(self)
    }

    /// Includes every site whose name starts with `prefix::`.
    pub fn include_module(self, prefix: &str) -> Result<Self, regex::Error> {
        self.include(&format!("^{}::", regex::escape(prefix)))
    }

    pub fn exclude_module(self, prefix: &str) -> Result<Self, regex::Error> {
        self.exclude(&format!("^{}::", regex::escape(prefix)))
    }

    pub fn allows(&self, name: &str) -> bool {
        if self.exclude.iter().any(|re| re.is_match(name)) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|re| re.is_match(name))
    }
}

/// One recorded trace notification. Positions are cursor offsets; values and
/// errors are kept in their `Debug`/`Display` renderings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    Enter {
        name: String,
        start: usize,
    },
    Exit {
        name: String,
        start: usize,
        end: usize,
        result: Result<String, String>,
    },
}

impl TraceEvent {
    pub fn name(&self) -> &str {
        match self {
            Self::Enter { name, .. } | Self::Exit { name, .. } => name,
        }
    }

    pub fn is_enter(&self) -> bool {
        matches!(self, Self::Enter { .. })
    }
}

/// A tracer that keeps every (filtered) event for later inspection.
#[derive(Debug, Default)]
pub struct RecordingTracer {
    filter: TraceFilter,
    events: RefCell<Vec<TraceEvent>>,
}

impl RecordingTracer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(filter: TraceFilter) -> Self {
        Self {
            filter,
            events: RefCell::default(),
        }
    }

    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.borrow().clone()
    }

    pub fn enter_count(&self, name: &str) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.is_enter() && e.name() == name)
            .count()
    }

    pub fn exit_count(&self, name: &str) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| !e.is_enter() && e.name() == name)
            .count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl<C> Tracer<C> for RecordingTracer {
    fn enter(&self, name: &str, start: Cursor<'_, C>) {
        if !self.filter.allows(name) {
            return;
        }
        self.events.borrow_mut().push(TraceEvent::Enter {
            name: name.to_string(),
            start: start.position(),
        });
    }

    fn exit(
        &self,
        name: &str,
        start: Cursor<'_, C>,
        end: Cursor<'_, C>,
        outcome: Result<&dyn Debug, &ParseError>,
    ) {
        if !self.filter.allows(name) {
            return;
        }
        self.events.borrow_mut().push(TraceEvent::Exit {
            name: name.to_string(),
            start: start.position(),
            end: end.position(),
            result: outcome
                .map(|v| format!("{v:?}"))
                .map_err(|e| e.message().to_string()),
        });
    }
}
