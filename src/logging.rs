use std::{cell::Cell, fmt::Debug};

use log::{log, log_enabled, Level};

use crate::{
    prelude::{Cursor, ParseError, TraceFilter, Tracer},
    util::{self, Preview},
    LOG_TARGET,
};

/// A [`Tracer`] that writes one line per enter/exit through the `log` facade.
///
/// Each line starts with a preview of the upcoming input, then the site name
/// indented by nesting depth. Exits show the value or error and, on success,
/// the consumed input.
#[derive(Debug)]
pub struct LogTracer {
    filter: TraceFilter,
    level: Level,
    depth: Cell<usize>,
}

impl LogTracer {
    const LABEL_WIDTH: usize = 15;
    const INPUT_WIDTH: usize = 35;

    pub fn new() -> Self {
        Self::with_filter(TraceFilter::default())
    }

    pub fn with_filter(filter: TraceFilter) -> Self {
        Self {
            filter,
            level: Level::Debug,
            depth: Cell::new(0),
        }
    }

    /// Defaults to `Debug`, which release builds keep.
    pub fn with_level(self, level: Level) -> Self {
        Self { level, ..self }
    }

    /// Current nesting depth; zero between parses.
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    fn upcoming<C: Preview>(cursor: Cursor<'_, C>) -> String {
        let rest = cursor.remaining();
        let rest = &rest[..rest.len().min(Self::INPUT_WIDTH)];
        util::formatter_str(&C::preview(rest))
    }

    fn indent(&self) -> String {
        "  ".repeat(self.depth.get())
    }
}

impl Default for LogTracer {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Preview> Tracer<C> for LogTracer {
    fn enter(&self, name: &str, start: Cursor<'_, C>) {
        if !self.filter.allows(name) {
            return;
        }
        if log_enabled!(target: LOG_TARGET, self.level) {
            log!(
                target: LOG_TARGET,
                self.level,
                "{inp:<iw$} {indent}{name:<lw$} @{pos}",
                iw = Self::INPUT_WIDTH,
                lw = Self::LABEL_WIDTH,
                inp = Self::upcoming(start),
                indent = self.indent(),
                pos = start.position(),
            );
        }
        self.depth.set(self.depth.get() + 1);
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
        self.depth.set(self.depth.get().saturating_sub(1));
        if !log_enabled!(target: LOG_TARGET, self.level) {
            return;
        }
        let result = match outcome {
            Ok(value) => {
                let span = C::preview(start.slice_to(&end).unwrap_or_default());
                format!("< {value:?} [from {:?}]", util::abbreviate(&span))
            }
            Err(e) => format!("! {e}"),
        };
        log!(
            target: LOG_TARGET,
            self.level,
            "{inp:<iw$} {indent}{name:<lw$} : {result}",
            iw = Self::INPUT_WIDTH,
            lw = Self::LABEL_WIDTH,
            inp = Self::upcoming(start),
            indent = self.indent(),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::prelude::*;
    use log::Level;
    use test_log::test;

    fn digits<'a>(ctx: &Context<char>, c: Cursor<'a, char>) -> PResult<'a, char, Vec<char>> {
        let digit = traced("test::digit", satisfy(|c: &char| c.is_ascii_digit()));
        traced("test::digits", many1(digit)).parse(ctx, c)
    }

    #[test]
    fn test_depth_is_balanced() {
        let input: Vec<char> = "123x".chars().collect();
        let tracer = Rc::new(LogTracer::new().with_level(Level::Info));
        let ctx: Context<char> = Context::new().with_tracer(tracer.clone()).with_tracing();

        let (end, ds) = digits(&ctx, Cursor::new(&input)).unwrap();
        assert_eq!((end.position(), ds.len()), (3, 3));
        assert_eq!(tracer.depth(), 0);

        assert!(digits(&ctx, Cursor::new(&input).jump_to_end()).is_err());
        assert_eq!(tracer.depth(), 0);
    }

    #[test]
    fn test_filtered_sites_do_not_nest() {
        let input: Vec<char> = "12".chars().collect();
        let filter = TraceFilter::new()
            .exclude("digit$")
            .unwrap()
            .exclude_module("chainparse")
            .unwrap();
        let tracer = Rc::new(LogTracer::with_filter(filter));
        let watcher = Rc::clone(&tracer);
        let ctx: Context<char> = Context::new().with_tracer(tracer).with_tracing();

        let inner = from_fn(move |ctx, c| {
            // only the outer site counts towards depth
            assert_eq!(watcher.depth(), 1);
            satisfy(|c: &char| c.is_ascii_digit()).parse(ctx, c)
        });
        let p = traced("test::digits", many1(traced("test::digit", inner)));
        p.parse(&ctx, Cursor::new(&input)).unwrap();
    }

    #[test]
    fn test_byte_input() {
        let input = b"abc";
        let tracer = Rc::new(LogTracer::new());
        let ctx: Context<u8> = Context::new().with_tracer(tracer.clone()).with_tracing();
        let p = traced("test::bytes", many0(any()));
        let (end, bytes) = p.parse(&ctx, Cursor::new(&input[..])).unwrap();
        assert_eq!((end.position(), bytes), (3, b"abc".to_vec()));
        assert_eq!(tracer.depth(), 0);
    }
}
