//! Per-site memoization.
//!
//! A [`Memo`] is one call site's cache table, owned by the caller. Wrapping a
//! parser with it guarantees the parser runs at most once per input position
//! (for the lifetime of the table) and that every call returns exactly what
//! the first one did, success or failure. Entries are never evicted.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    fmt,
    rc::Rc,
};

use log::{debug, trace};
use once_cell::unsync::OnceCell;

use crate::{
    prelude::{Context, Cursor, CursorKey, PResult, Parser},
    LOG_TARGET,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    pub hits: usize,
    pub misses: usize,
}

struct Table<'a, C, T> {
    tag: &'static str,
    entries: OnceCell<RefCell<HashMap<CursorKey, PResult<'a, C, T>>>>,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

/// A cheaply clonable handle to one memo table.
///
/// Clones share the table. Two `Memo::new` calls always give two tables, even
/// with the same tag; the tag only labels log output.
pub struct Memo<'a, C, T> {
    table: Rc<Table<'a, C, T>>,
}

impl<'a, C, T> Memo<'a, C, T> {
    pub fn new(tag: &'static str) -> Self {
        Self {
            table: Rc::new(Table {
                tag,
                entries: OnceCell::new(),
                hits: Cell::new(0),
                misses: Cell::new(0),
            }),
        }
    }

    pub fn tag(&self) -> &'static str {
        self.table.tag
    }

    /// Number of cached positions.
    pub fn len(&self) -> usize {
        self.table.entries.get().map_or(0, |e| e.borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> MemoStats {
        MemoStats {
            hits: self.table.hits.get(),
            misses: self.table.misses.get(),
        }
    }

    fn entries(&self) -> &RefCell<HashMap<CursorKey, PResult<'a, C, T>>> {
        self.table.entries.get_or_init(|| {
            debug!(target: LOG_TARGET, "memo {tag}: table created", tag = self.table.tag);
            RefCell::default()
        })
    }
}

impl<'a, C: 'a, T: Clone> Memo<'a, C, T> {
    /// `parser`, answering from this table where it can.
    pub fn wrap<P>(&self, parser: P) -> impl Parser<'a, C, T>
    where
        P: Parser<'a, C, T>,
    {
        let memo = self.clone();
        move |ctx: &Context<C>, start: Cursor<'a, C>| -> PResult<'a, C, T> {
            memo.apply(&parser, ctx, start)
        }
    }

    /// Runs `parser` through this table. For a site that is sometimes
    /// memoized and sometimes not; otherwise use [`Memo::wrap`].
    pub fn apply<P>(&self, parser: &P, ctx: &Context<C>, start: Cursor<'a, C>) -> PResult<'a, C, T>
    where
        P: Parser<'a, C, T>,
    {
        // end of input has no identity, so it is never cached
        let Some(key) = start.identity_key() else {
            return parser.parse(ctx, start);
        };

        let cached = self.entries().borrow().get(&key).cloned();
        if let Some(res) = cached {
            self.table.hits.set(self.table.hits.get() + 1);
            trace!(target: LOG_TARGET, "memo {tag}: hit at {start}", tag = self.table.tag);
            return res;
        }

        // the table must not be borrowed here: the parser may re-enter this site
        let res = parser.parse(ctx, start);
        self.table.misses.set(self.table.misses.get() + 1);
        trace!(target: LOG_TARGET, "memo {tag}: miss at {start}", tag = self.table.tag);
        self.entries().borrow_mut().insert(key, res.clone());
        res
    }
}

impl<'a, C, T> Clone for Memo<'a, C, T> {
    fn clone(&self) -> Self {
        Self {
            table: Rc::clone(&self.table),
        }
    }
}

impl<'a, C, T> fmt::Debug for Memo<'a, C, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Memo")
            .field("tag", &self.table.tag)
            .field("len", &self.len())
            .field("stats", &self.stats())
            .finish()
    }
}

/// Same as [`Memo::wrap`].
pub fn memoize<'a, C: 'a, T, P>(memo: &Memo<'a, C, T>, parser: P) -> impl Parser<'a, C, T>
where
    P: Parser<'a, C, T>,
    T: Clone,
{
    memo.wrap(parser)
}
