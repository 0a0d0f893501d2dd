/// Line tracking for declarations
///
/// Stores the source lines (1-based, inclusive) a declaration covers so
/// callers can map symbols back to the text they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
pub struct Span {
    pub start_line: u32,
    pub end_line: u32,
}

impl Span {
    pub fn new(start_line: u32, end_line: u32) -> Self {
        debug_assert!(start_line <= end_line, "span ends before it starts");
        Self {
            start_line,
            end_line,
        }
    }

    /// A span covering a single line
    pub fn line(line: u32) -> Self {
        Self::new(line, line)
    }

    /// Check if a line falls within this span
    pub fn contains(&self, line: u32) -> bool {
        (self.start_line..=self.end_line).contains(&line)
    }

    /// Number of lines covered
    pub fn line_count(&self) -> u32 {
        self.end_line - self.start_line + 1
    }
}
