//! Mapping from tree-sitter points to protocol positions.
//!
//! tree-sitter reports columns as byte offsets within a row, where rows are
//! separated by `\n` only. Clients usually count UTF-16 code units instead,
//! so every point is re-measured against the source it came from.

use crate::types::{Position, PositionEncoding};
use tree_sitter::Point;

/// Line start offsets for one source buffer.
#[derive(Debug)]
pub struct LineIndex<'a> {
    source: &'a [u8],
    /// Byte offset of the first byte of each line. Always starts with `0`.
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(memchr::memchr_iter(b'\n', source).map(|nl| nl + 1));
        Self {
            source,
            line_starts,
        }
    }

    /// Convert a tree-sitter point into a position in `encoding`.
    ///
    /// Points that do not belong to this source (row past the end) keep
    /// their byte column unchanged.
    pub fn position(&self, point: Point, encoding: PositionEncoding) -> Position {
        let character = match encoding {
            PositionEncoding::Utf8 => point.column,
            PositionEncoding::Utf16 => self.utf16_column(point),
        };
        Position::new(point.row as u32, character as u32)
    }

    fn utf16_column(&self, point: Point) -> usize {
        let Some(&line_start) = self.line_starts.get(point.row) else {
            return point.column;
        };
        let end = line_start.saturating_add(point.column).min(self.source.len());
        let prefix = &self.source[line_start.min(end)..end];
        if prefix.is_ascii() {
            return prefix.len();
        }
        // Invalid sequences count as one U+FFFD each.
        String::from_utf8_lossy(prefix).encode_utf16().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(row: usize, column: usize) -> Point {
        Point { row, column }
    }

    #[test]
    fn line_starts_follow_newlines() {
        let index = LineIndex::new("ab\nd\u{e9}\n".as_bytes());
        assert_eq!(
            index.position(point(1, 3), PositionEncoding::Utf16),
            Position::new(1, 2)
        );
        assert_eq!(
            index.position(point(2, 0), PositionEncoding::Utf16),
            Position::new(2, 0)
        );
    }

    #[test]
    fn ascii_columns_are_identical_in_both_encodings() {
        let index = LineIndex::new(b"int x;\nint y;");
        for encoding in [PositionEncoding::Utf8, PositionEncoding::Utf16] {
            assert_eq!(index.position(point(1, 4), encoding), Position::new(1, 4));
        }
    }

    #[test]
    fn utf16_counts_code_units() {
        // "é" is 2 bytes / 1 unit, "😀" is 4 bytes / 2 units.
        let source = "/* é😀 */ int".as_bytes();
        let index = LineIndex::new(source);
        let byte_col = "/* é😀 */ ".len();

        assert_eq!(
            index.position(point(0, byte_col), PositionEncoding::Utf8),
            Position::new(0, byte_col as u32)
        );
        assert_eq!(
            index.position(point(0, byte_col), PositionEncoding::Utf16),
            Position::new(0, 10)
        );
    }

    #[test]
    fn carriage_returns_are_columns() {
        let index = LineIndex::new(b"a\r\nb");
        assert_eq!(
            index.position(point(0, 2), PositionEncoding::Utf16),
            Position::new(0, 2)
        );
        assert_eq!(
            index.position(point(1, 0), PositionEncoding::Utf16),
            Position::new(1, 0)
        );
    }

    #[test]
    fn invalid_utf8_does_not_panic() {
        let index = LineIndex::new(&[0xff, 0xfe, b'a', b'\n', 0xc3]);
        assert_eq!(
            index.position(point(0, 3), PositionEncoding::Utf16),
            Position::new(0, 3)
        );
        // Column past the end of the buffer is clamped.
        assert_eq!(
            index.position(point(1, 5), PositionEncoding::Utf16),
            Position::new(1, 1)
        );
    }

    #[test]
    fn rows_outside_the_source_keep_byte_columns() {
        let index = LineIndex::new(b"x");
        assert_eq!(
            index.position(point(7, 3), PositionEncoding::Utf16),
            Position::new(7, 3)
        );
    }
}
