//! # Output Buffer
//!
//! Line history behind the output pane, plus the scroll offset of the window
//! rendered from it.
//!
//! The buffer holds at most `capacity` lines. Once full, every new line evicts
//! the oldest one and the scroll offset moves up with the content, so the
//! lines on screen stay put until the user scrolls.

use std::collections::VecDeque;

/// History limit used when none is given on the command line.
pub const DEFAULT_HISTORY_LIMIT: usize = 10_000;

/// Appended after every command's output.
pub const SEPARATOR: &str = "---";

#[derive(Debug, Clone)]
pub struct OutputBuffer {
    lines: VecDeque<String>,
    capacity: usize,
    scroll: usize,
}

impl OutputBuffer {
    /// Create an empty buffer. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_LIMIT)),
            capacity,
            scroll: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// The last `n` lines, oldest first.
    pub fn tail(&self, n: usize) -> Vec<&str> {
        let skip = self.lines.len().saturating_sub(n);
        self.lines.iter().skip(skip).map(String::as_str).collect()
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
            self.scroll = self.scroll.saturating_sub(1);
        }
        self.lines.push_back(line.into());
    }

    /// Append captured process text one line at a time. A trailing newline
    /// does not produce an empty line; empty text appends nothing.
    pub fn push_text(&mut self, text: &str) {
        for line in text.lines() {
            self.push_line(line);
        }
    }

    pub fn push_separator(&mut self) {
        self.push_line(SEPARATOR);
    }

    /// Index of the top visible line.
    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    /// Last valid top line for a window of `page` rows.
    pub fn max_scroll(&self, page: usize) -> usize {
        self.lines.len().saturating_sub(page)
    }

    pub fn page_up(&mut self, page: usize) {
        self.scroll = self.scroll.saturating_sub(page);
    }

    pub fn page_down(&mut self, page: usize) {
        self.scroll = self.scroll.saturating_add(page).min(self.max_scroll(page));
    }

    /// Pull the offset back to the last valid top line for `page` rows, e.g.
    /// after the pane grew.
    pub fn clamp(&mut self, page: usize) {
        self.scroll = self.scroll.min(self.max_scroll(page));
    }

    pub fn scroll_to_bottom(&mut self, page: usize) {
        self.scroll = self.max_scroll(page);
    }

    /// Lines visible in a window of `page` rows at the current offset.
    pub fn visible(&self, page: usize) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .skip(self.scroll)
            .take(page)
            .map(String::as_str)
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(n: usize) -> OutputBuffer {
        let mut buffer = OutputBuffer::default();
        for i in 0..n {
            buffer.push_line(format!("line {}", i));
        }
        buffer
    }

    #[test]
    fn test_push_text_splits_lines() {
        let mut buffer = OutputBuffer::default();
        buffer.push_text("hi\n");
        buffer.push_text("");
        buffer.push_text("a\n\nb");
        assert_eq!(buffer.lines().collect::<Vec<_>>(), vec!["hi", "a", "", "b"]);
    }

    #[test]
    fn test_push_text_strips_crlf() {
        let mut buffer = OutputBuffer::default();
        buffer.push_text("one\r\ntwo\r\n");
        assert_eq!(buffer.lines().collect::<Vec<_>>(), vec!["one", "two"]);
    }

    #[test]
    fn test_page_up_clamps_at_top() {
        let mut buffer = filled(50);
        buffer.page_down(10);
        assert_eq!(buffer.scroll_offset(), 10);
        buffer.page_up(10);
        buffer.page_up(10);
        buffer.page_up(10);
        assert_eq!(buffer.scroll_offset(), 0);
    }

    #[test]
    fn test_page_down_clamps_at_last_page() {
        let mut buffer = filled(25);
        for _ in 0..10 {
            buffer.page_down(10);
        }
        assert_eq!(buffer.scroll_offset(), 15);
        assert_eq!(buffer.visible(10).count(), 10);
        assert_eq!(buffer.visible(10).last(), Some("line 24"));
    }

    #[test]
    fn test_page_down_when_content_fits() {
        let mut buffer = filled(3);
        buffer.page_down(10);
        assert_eq!(buffer.scroll_offset(), 0);

        let mut empty = OutputBuffer::default();
        empty.page_down(10);
        assert_eq!(empty.scroll_offset(), 0);
    }

    #[test]
    fn test_scroll_to_bottom() {
        let mut buffer = filled(42);
        buffer.scroll_to_bottom(20);
        assert_eq!(buffer.scroll_offset(), 22);
        assert_eq!(buffer.visible(20).next(), Some("line 22"));
    }

    #[test]
    fn test_clamp_after_page_grows() {
        let mut buffer = filled(101);
        buffer.scroll_to_bottom(21);
        assert_eq!(buffer.scroll_offset(), 80);

        buffer.clamp(57);
        assert_eq!(buffer.scroll_offset(), 44);
        assert_eq!(buffer.visible(57).count(), 57);

        // Shrinking never moves the view
        buffer.clamp(10);
        assert_eq!(buffer.scroll_offset(), 44);
    }

    #[test]
    fn test_eviction_drops_oldest() {
        let mut buffer = OutputBuffer::new(3);
        for line in ["a", "b", "c", "d", "e"] {
            buffer.push_line(line);
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.lines().collect::<Vec<_>>(), vec!["c", "d", "e"]);
    }

    #[test]
    fn test_eviction_keeps_view_anchored() {
        let mut buffer = OutputBuffer::new(10);
        for i in 0..10 {
            buffer.push_line(i.to_string());
        }
        buffer.page_down(4);
        assert_eq!(buffer.visible(4).next(), Some("4"));

        buffer.push_line("10");
        buffer.push_line("11");
        assert_eq!(buffer.scroll_offset(), 2);
        assert_eq!(buffer.visible(4).next(), Some("4"));
    }

    #[test]
    fn test_zero_capacity_holds_one_line() {
        let mut buffer = OutputBuffer::new(0);
        buffer.push_line("first");
        buffer.push_line("second");
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.lines().collect::<Vec<_>>(), vec!["second"]);
    }

    #[test]
    fn test_tail() {
        let buffer = filled(5);
        assert_eq!(buffer.tail(2), vec!["line 3", "line 4"]);
        assert_eq!(buffer.tail(10).len(), 5);
    }
}
