use std::{cmp::Ordering, fmt, ptr};

/// An immutable read position into a shared, borrowed input buffer.
///
/// Cursors are `Copy` regardless of the token type: moving forward produces a
/// new cursor, the buffer is never copied or mutated. Two cursors compare equal
/// (and are ordered) only when they point into the *same* buffer, identity not
/// contents.
pub struct Cursor<'a, C> {
    buffer: &'a [C],
    offset: usize,
}

/// Cache key for a cursor: unique per (buffer identity, offset).
///
/// A buffer is identified by its address and length together, matching
/// [`Cursor::same_buffer`]: a prefix slice of a buffer is a different buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CursorKey {
    buffer: (usize, usize),
    offset: usize,
}

impl<'a, C> Cursor<'a, C> {
    #[inline]
    pub fn new(buffer: &'a [C]) -> Self {
        Self { buffer, offset: 0 }
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.offset >= self.buffer.len()
    }

    /// The token under the cursor, `None` at end of input.
    #[inline]
    pub fn read(&self) -> Option<&'a C> {
        self.buffer.get(self.offset)
    }

    /// Advancing past the end is a no-op.
    #[inline]
    pub fn advance(self) -> Self {
        if self.at_end() {
            return self;
        }
        Self {
            buffer: self.buffer,
            offset: self.offset + 1,
        }
    }

    #[inline]
    pub fn jump_to_end(self) -> Self {
        Self {
            buffer: self.buffer,
            offset: self.buffer.len(),
        }
    }

    /// Tokens from this cursor up to (excluding) `other`.
    ///
    /// `None` when this cursor is at end of input, when the two cursors do not
    /// share a buffer, or when `other` lies before `self`.
    pub fn slice_to(&self, other: &Self) -> Option<&'a [C]> {
        if self.at_end() || !self.same_buffer(other) || other.offset < self.offset {
            return None;
        }
        Some(&self.buffer[self.offset..other.offset])
    }

    /// Undefined (`None`) at end of input.
    pub fn identity_key(&self) -> Option<CursorKey> {
        if self.at_end() {
            return None;
        }
        Some(CursorKey {
            buffer: (self.buffer.as_ptr() as usize, self.buffer.len()),
            offset: self.offset,
        })
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn remaining(&self) -> &'a [C] {
        &self.buffer[self.offset..]
    }

    #[inline]
    pub fn remaining_len(&self) -> usize {
        self.buffer.len() - self.offset
    }

    pub fn buffer(&self) -> &'a [C] {
        self.buffer
    }

    #[inline]
    pub fn same_buffer(&self, other: &Self) -> bool {
        ptr::eq(self.buffer, other.buffer)
    }
}

impl<'a, C> Clone for Cursor<'a, C> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, C> Copy for Cursor<'a, C> {}

impl<'a, C> PartialEq for Cursor<'a, C> {
    fn eq(&self, other: &Self) -> bool {
        self.same_buffer(other) && self.offset == other.offset
    }
}

impl<'a, C> PartialOrd for Cursor<'a, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.same_buffer(other)
            .then(|| self.offset.cmp(&other.offset))
    }
}

impl<'a, C> From<&'a [C]> for Cursor<'a, C> {
    fn from(buffer: &'a [C]) -> Self {
        Self::new(buffer)
    }
}

impl<'a, C> fmt::Debug for Cursor<'a, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "cursor({}/{})", self.offset, self.buffer.len())
    }
}

impl<'a, C> fmt::Display for Cursor<'a, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "cursor({})", self.offset)
    }
}

/// A half-open range `[start, end)` of one buffer.
///
/// Nothing stops a caller building a backward span; such a span is degenerate,
/// with no slice and zero length.
pub struct Span<'a, C> {
    pub start: Cursor<'a, C>,
    pub end: Cursor<'a, C>,
}

impl<'a, C> Span<'a, C> {
    pub fn new(start: Cursor<'a, C>, end: Cursor<'a, C>) -> Self {
        Self { start, end }
    }

    pub fn as_slice(&self) -> Option<&'a [C]> {
        self.start.slice_to(&self.end)
    }

    pub fn len(&self) -> usize {
        self.end.position().saturating_sub(self.start.position())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a, C> Clone for Span<'a, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, C> Copy for Span<'a, C> {}

impl<'a, C> PartialEq for Span<'a, C> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl<'a, C> fmt::Debug for Span<'a, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "span({}..{})", self.start.position(), self.end.position())
    }
}

#[cfg(test)]
mod tests {
    use super::{Cursor, Span};
    use test_log::test;

    #[test]
    fn test_cursor() {
        let input: Vec<char> = "Hello".chars().collect();
        let c = Cursor::new(&input);
        assert_eq!(c.position(), 0);
        assert_eq!(c.read(), Some(&'H'));
        assert!(!c.at_end());

        let c2 = c.advance().advance();
        assert_eq!(c2.read(), Some(&'l'));
        assert_eq!(c.read(), Some(&'H'), "advancing must not touch the original");
        assert_eq!(c.slice_to(&c2), Some(&input[..2]));
        assert_eq!(c2.remaining_len(), 3);

        let end = c.jump_to_end();
        assert!(end.at_end());
        assert_eq!(end.read(), None);
        assert_eq!(end.advance(), end);
        assert_eq!(end.identity_key(), None);
        assert_eq!(end.slice_to(&end), None);
        assert_eq!(end.to_string(), "cursor(5)");
    }

    #[test]
    fn test_identity() {
        let a: Vec<u8> = b"abc".to_vec();
        let b: Vec<u8> = b"abc".to_vec();
        let ca = Cursor::new(&a);
        let cb = Cursor::new(&b);

        // equal contents, different buffers
        assert_ne!(ca, cb);
        assert_eq!(ca.partial_cmp(&cb), None);
        assert_eq!(ca.slice_to(&cb.advance()), None);
        assert_ne!(ca.identity_key(), cb.identity_key());

        assert_eq!(ca, Cursor::new(&a));
        assert!(ca < ca.advance());
        assert_eq!(ca.identity_key(), Cursor::new(&a).identity_key());
        assert_ne!(ca.identity_key(), ca.advance().identity_key());

        // same start address, shorter slice
        let head = Cursor::new(&a[..2]);
        assert_ne!(ca, head);
        assert_ne!(ca.identity_key(), head.identity_key());
        assert_eq!(head.identity_key(), Cursor::new(&a[..2]).identity_key());
    }

    #[test]
    fn test_span() {
        let input = b"key=value";
        let start = Cursor::new(&input[..]);
        let end = start.advance().advance().advance();
        let span = Span::new(start, end);
        assert_eq!(span.as_slice(), Some(&b"key"[..]));
        assert_eq!(span.len(), 3);

        let backward = Span::new(end, start);
        assert_eq!(backward.as_slice(), None);
        assert!(backward.is_empty());
    }
}
