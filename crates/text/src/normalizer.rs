use xref_model::Point;

/// Maps byte offsets of one file to (line, column) points and 1-based
/// line numbers back to byte offsets.
///
/// All arithmetic is in bytes; lines are delimited by `\n`. Offsets
/// outside `[0, len]` are clamped, so every lookup is total.
#[derive(Debug, Clone)]
pub struct Normalizer {
    /// Byte offset of the start of each line; `line_starts[0] == 0`.
    line_starts: Vec<usize>,
    len: usize,
}

impl Normalizer {
    pub fn new(text: &[u8]) -> Self {
        let mut line_starts = Vec::with_capacity(16);
        line_starts.push(0);
        for (i, &b) in text.iter().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            line_starts,
            len: text.len(),
        }
    }

    /// The point at the given byte offset, clamped to `[0, len]`.
    #[must_use]
    pub fn point_for_offset(&self, offset: i32) -> Point {
        let offset = (offset.max(0) as usize).min(self.len);
        let line_index = self.line_starts.partition_point(|&start| start <= offset) - 1;
        Point {
            byte_offset: offset as i32,
            line_number: (line_index + 1) as i32,
            column_offset: (offset - self.line_starts[line_index]) as i32,
        }
    }

    /// The point at the start of the given 1-based line.
    ///
    /// Lines past the end of the file clamp to the end-of-file point;
    /// line numbers below 1 clamp to the start of the file.
    #[must_use]
    pub fn point_for_line(&self, line_number: i32) -> Point {
        if line_number <= 1 {
            return Point {
                byte_offset: 0,
                line_number: 1,
                column_offset: 0,
            };
        }
        match self.line_starts.get(line_number as usize - 1) {
            Some(&start) => Point {
                byte_offset: start as i32,
                line_number,
                column_offset: 0,
            },
            None => self.point_for_offset(self.len as i32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TEXT: &[u8] = b"foo\nbar\nbaz";

    #[test]
    fn maps_offsets_to_lines_and_columns() {
        let norm = Normalizer::new(TEXT);
        assert_eq!(norm.point_for_offset(0), point(0, 1, 0));
        assert_eq!(norm.point_for_offset(3), point(3, 1, 3));
        assert_eq!(norm.point_for_offset(4), point(4, 2, 0));
        assert_eq!(norm.point_for_offset(6), point(6, 2, 2));
        assert_eq!(norm.point_for_offset(11), point(11, 3, 3));
    }

    #[test]
    fn clamps_out_of_range_offsets() {
        let norm = Normalizer::new(TEXT);
        assert_eq!(norm.point_for_offset(-7), point(0, 1, 0));
        assert_eq!(norm.point_for_offset(100), point(11, 3, 3));
    }

    #[test]
    fn maps_lines_to_start_offsets() {
        let norm = Normalizer::new(TEXT);
        assert_eq!(norm.point_for_line(1), point(0, 1, 0));
        assert_eq!(norm.point_for_line(2), point(4, 2, 0));
        assert_eq!(norm.point_for_line(3), point(8, 3, 0));
        // Past EOF clamps to the end-of-file point.
        assert_eq!(norm.point_for_line(4), point(11, 3, 3));
        assert_eq!(norm.point_for_line(0), point(0, 1, 0));
    }

    #[test]
    fn trailing_newline_opens_a_final_empty_line() {
        let norm = Normalizer::new(b"foo\n");
        assert_eq!(norm.point_for_line(2), point(4, 2, 0));
        assert_eq!(norm.point_for_offset(4), point(4, 2, 0));
    }

    #[test]
    fn multibyte_text_keeps_byte_columns() {
        // "héllo\nwörld" with two-byte 'é' and 'ö'.
        let text = "héllo\nwörld".as_bytes();
        let norm = Normalizer::new(text);
        assert_eq!(norm.point_for_offset(6), point(6, 1, 6));
        assert_eq!(norm.point_for_offset(7), point(7, 2, 0));
        assert_eq!(norm.point_for_line(2), point(7, 2, 0));
        assert_eq!(norm.point_for_offset(10), point(10, 2, 3));
    }

    #[test]
    fn empty_file_maps_everything_to_origin() {
        let norm = Normalizer::new(b"");
        assert_eq!(norm.point_for_offset(0), point(0, 1, 0));
        assert_eq!(norm.point_for_offset(5), point(0, 1, 0));
        assert_eq!(norm.point_for_line(3), point(0, 1, 0));
    }

    fn point(byte_offset: i32, line_number: i32, column_offset: i32) -> Point {
        Point {
            byte_offset,
            line_number,
            column_offset,
        }
    }

    proptest! {
        #[test]
        fn proptest_offset_round_trips_through_line_starts(
            text in proptest::collection::vec(prop_oneof![Just(b'\n'), 32u8..127], 0..200),
            offset in 0i32..220,
        ) {
            let norm = Normalizer::new(&text);
            let p = norm.point_for_offset(offset);
            // The line's start plus the column is the clamped offset.
            let line_start = norm.point_for_line(p.line_number);
            prop_assert_eq!(line_start.byte_offset + p.column_offset, p.byte_offset);
            prop_assert!(p.byte_offset <= text.len() as i32);
        }
    }
}
