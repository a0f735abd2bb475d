//! Line and column lookup for spans.

/// Pre-computed line start offsets for O(log L) line/column lookup.
///
/// ```
/// use speed_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "fn main() {\n  return;\n}";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
/// assert_eq!(table.offset_to_line_col(source, 14), (2, 3));
/// assert_eq!(table.line_text(source, 2), Some("  return;"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// offsets[i] is the byte offset where line i + 1 starts.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// 1-based (line, column); the column counts characters, not bytes.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self.line_start_offset(line).unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len());

        let col_chars = source
            .get(line_start..end)
            .map_or(0, |prefix| prefix.chars().count());
        let col = u32::try_from(col_chars).unwrap_or(u32::MAX - 1) + 1;

        (line, col)
    }

    /// Byte offset where a 1-based line starts.
    pub fn line_start_offset(&self, line: u32) -> Option<u32> {
        if line == 0 {
            return None;
        }
        self.offsets.get((line - 1) as usize).copied()
    }

    /// Text of a 1-based line, without its trailing newline.
    pub fn line_text<'a>(&self, source: &'a str, line: u32) -> Option<&'a str> {
        let start = self.line_start_offset(line)? as usize;
        let end = self
            .line_start_offset(line + 1)
            .map_or(source.len(), |next| next as usize);
        source
            .get(start..end)
            .map(|text| text.trim_end_matches(['\n', '\r']))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        let source = "let x = 1;";
        let table = LineOffsetTable::build(source);
        assert_eq!(table.offset_to_line_col(source, 4), (1, 5));
    }

    #[test]
    fn test_offset_on_newline_belongs_to_previous_line() {
        let source = "ab\ncd";
        let table = LineOffsetTable::build(source);
        assert_eq!(table.line_from_offset(2), 1);
        assert_eq!(table.line_from_offset(3), 2);
    }

    #[test]
    fn test_offset_past_end_is_clamped() {
        let source = "ab\ncd";
        let table = LineOffsetTable::build(source);
        assert_eq!(table.offset_to_line_col(source, 100), (2, 3));
    }

    #[test]
    fn test_multibyte_columns_count_chars() {
        let source = "\"héllo\" x";
        let table = LineOffsetTable::build(source);
        // 'x' is at byte 9 but character 8.
        assert_eq!(table.offset_to_line_col(source, 9), (1, 9));
    }

    #[test]
    fn test_line_text() {
        let source = "one\r\ntwo\nthree";
        let table = LineOffsetTable::build(source);
        assert_eq!(table.line_text(source, 1), Some("one"));
        assert_eq!(table.line_text(source, 3), Some("three"));
        assert_eq!(table.line_text(source, 4), None);
        assert_eq!(table.line_text(source, 0), None);
    }
}
