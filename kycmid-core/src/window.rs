//! Sliding-window history buffer for LZ77-style back-references.
//!
//! The window doubles as the sink for every decoded byte: literals and
//! replayed match bytes both pass through it, and the accumulated output is
//! collected alongside. Copied bytes re-enter the window as fresh history,
//! which is what makes self-overlapping copies (distance < length)
//! well-defined.

/// Window size in bytes.
pub const WINDOW_SIZE: usize = 4096;

/// Mask for modulo-window arithmetic.
pub const WINDOW_MASK: usize = WINDOW_SIZE - 1;

/// Byte the window history is preloaded with.
pub const FILL_BYTE: u8 = 0x20;

/// Initial write cursor. The last 60 slots stay unwritten so the longest
/// possible match fits before the cursor at start of stream.
pub const INITIAL_POSITION: usize = 4036;

/// A circular history buffer that also accumulates the decoded output.
#[derive(Debug, Clone)]
pub struct HistoryWindow {
    /// The circular buffer. Slots `[0, INITIAL_POSITION)` start as
    /// `FILL_BYTE`; back-references may land anywhere, so the reserved
    /// tail is zeroed rather than left uninitialized.
    buffer: [u8; WINDOW_SIZE],
    /// Current write cursor.
    position: usize,
    /// Accumulated decoded output.
    output: Vec<u8>,
}

impl HistoryWindow {
    /// Create a freshly initialized window.
    ///
    /// `output_capacity` is the declared decoded length, used as a capacity
    /// hint for the output buffer.
    pub fn new(output_capacity: usize) -> Self {
        let mut buffer = [0u8; WINDOW_SIZE];
        buffer[..INITIAL_POSITION].fill(FILL_BYTE);
        Self {
            buffer,
            position: INITIAL_POSITION,
            output: Vec::with_capacity(output_capacity),
        }
    }

    /// Get the current write cursor.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Append a decoded byte: push it to the output and record it as
    /// history at the cursor.
    pub fn write_literal(&mut self, byte: u8) {
        self.output.push(byte);
        self.buffer[self.position] = byte;
        self.position = (self.position + 1) & WINDOW_MASK;
    }

    /// Replay `length` history bytes starting at the absolute window slot
    /// `start`, feeding each through [`write_literal`](Self::write_literal).
    ///
    /// Each copied byte becomes visible to the very next read within the
    /// same copy, so `start` may overlap the write cursor.
    pub fn copy_match(&mut self, start: usize, length: usize) {
        self.output.reserve(length);
        for k in 0..length {
            let byte = self.buffer[(start + k) & WINDOW_MASK];
            self.write_literal(byte);
        }
    }

    /// Get the decoded output so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Get the decoded output length so far.
    pub fn output_len(&self) -> usize {
        self.output.len()
    }

    /// Consume the window and return the decoded output.
    pub fn into_output(self) -> Vec<u8> {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_window_state() {
        let window = HistoryWindow::new(0);
        assert_eq!(window.position(), INITIAL_POSITION);
        assert_eq!(window.buffer[0], FILL_BYTE);
        assert_eq!(window.buffer[INITIAL_POSITION - 1], FILL_BYTE);
        // Reserved tail is not part of the preloaded history
        assert_eq!(window.buffer[INITIAL_POSITION], 0);
    }

    #[test]
    fn test_write_literal_advances_cursor() {
        let mut window = HistoryWindow::new(4);
        window.write_literal(b'H');
        window.write_literal(b'i');

        assert_eq!(window.output(), b"Hi");
        assert_eq!(window.position(), INITIAL_POSITION + 2);
        assert_eq!(window.buffer[INITIAL_POSITION], b'H');
    }

    #[test]
    fn test_cursor_wraps() {
        let mut window = HistoryWindow::new(WINDOW_SIZE);
        for _ in 0..WINDOW_SIZE - INITIAL_POSITION {
            window.write_literal(b'x');
        }
        assert_eq!(window.position(), 0);
        window.write_literal(b'y');
        assert_eq!(window.position(), 1);
        assert_eq!(window.buffer[0], b'y');
    }

    #[test]
    fn test_copy_match() {
        let mut window = HistoryWindow::new(16);
        window.write_literal(b'A');
        window.write_literal(b'B');
        window.write_literal(b'C');

        window.copy_match(INITIAL_POSITION, 3);
        assert_eq!(window.output(), b"ABCABC");
    }

    #[test]
    fn test_copy_match_self_overlap() {
        // length > distance: the copy reads bytes it wrote itself
        let mut window = HistoryWindow::new(16);
        window.write_literal(b'A');
        window.write_literal(b'B');

        window.copy_match(INITIAL_POSITION, 6);
        assert_eq!(window.output(), b"ABABABAB");
    }

    #[test]
    fn test_copy_from_preloaded_history() {
        // A match may reference history that was never written; it reads
        // the fill byte.
        let mut window = HistoryWindow::new(4);
        window.copy_match(100, 3);
        assert_eq!(window.output(), &[FILL_BYTE; 3]);
    }
}
