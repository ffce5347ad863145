//! Line/offset index over artifact text, rebuilt per match call.

/// Precomputed line-start table over a borrowed artifact.
///
/// Offsets are byte positions into the original text; lookups translate a
/// match start into a 1-based line number via binary search, so line
/// accounting stays correct for non-ASCII artifacts.
#[derive(Debug)]
pub struct MatchContext<'t> {
    text: &'t str,
    /// Byte offset of the start of each line. Always non-empty: an empty
    /// artifact is a single empty line.
    line_starts: Vec<usize>,
}

impl<'t> MatchContext<'t> {
    /// Build the index. Lines split on `\n`.
    pub fn new(text: &'t str) -> Self {
        let mut line_starts = Vec::with_capacity(64);
        line_starts.push(0);
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { text, line_starts }
    }

    pub fn text(&self) -> &'t str {
        self.text
    }

    /// Number of lines. At least 1, even for empty text.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// 1-based line number containing the given byte offset.
    pub fn line_number(&self, offset: usize) -> u32 {
        let idx = self.line_starts.partition_point(|&start| start <= offset);
        idx as u32
    }

    /// 1-based codepoint column of the given byte offset within its line.
    pub fn column_number(&self, offset: usize) -> u32 {
        let line = self.line_number(offset) as usize;
        let start = self.line_starts[line - 1];
        let end = offset.min(self.text.len());
        self.text[start..end].chars().count() as u32 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_one_line() {
        let ctx = MatchContext::new("");
        assert_eq!(ctx.line_count(), 1);
        assert_eq!(ctx.line_number(0), 1);
    }

    #[test]
    fn offsets_map_to_lines() {
        let ctx = MatchContext::new("line 1\nline 2 has X\nline 3");
        assert_eq!(ctx.line_count(), 3);
        assert_eq!(ctx.line_number(0), 1);
        assert_eq!(ctx.line_number(6), 1);
        assert_eq!(ctx.line_number(7), 2);
        assert_eq!(ctx.line_number(18), 2);
        assert_eq!(ctx.line_number(20), 3);
    }

    #[test]
    fn multibyte_columns_count_codepoints() {
        // "héllo\nwörld": byte offsets shift past the two-byte vowels.
        let text = "h\u{e9}llo\nw\u{f6}rld";
        let ctx = MatchContext::new(text);
        let offset = text.find('r').unwrap();
        assert_eq!(ctx.line_number(offset), 2);
        assert_eq!(ctx.column_number(offset), 3);
    }
}
