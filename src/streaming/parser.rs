//! Incremental line parser for streaming responses
//!
//! Splits a chunked body into complete lines with a carry-over buffer:
//! - Only newline-terminated lines are decoded
//! - A trailing partial line waits for the next chunk
//! - Bytes are buffered, so UTF-8 sequences may straddle chunks
//! - Buffer: 1MB maximum per pending line

use crate::errors::{ClientError, Result};
use crate::types::StreamEvent;

/// Maximum buffer size (1MB)
pub const MAX_BUFFER_SIZE: usize = 1_048_576;

/// Incremental server-sent-event line parser
#[derive(Debug)]
pub struct SseLineParser {
    /// Bytes of the line still waiting for its newline
    buffer: Vec<u8>,

    /// Maximum buffer size
    max_buffer_size: usize,
}

impl SseLineParser {
    /// Create new parser with default settings
    pub fn new() -> Self {
        Self::with_capacity(MAX_BUFFER_SIZE)
    }

    /// Create parser with custom buffer capacity
    pub fn with_capacity(max_buffer_size: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(4096),
            max_buffer_size,
        }
    }

    /// Add a chunk and decode every line it completes, in order.
    pub fn add_bytes(&mut self, bytes: &[u8]) -> Result<Vec<StreamEvent>> {
        self.buffer.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            if let Some(event) = decode_line(&line[..newline]) {
                events.push(event);
            }
        }

        if self.buffer.len() > self.max_buffer_size {
            let pending = self.buffer.len();
            self.buffer.clear();
            return Err(ClientError::StreamingError(format!(
                "Buffer overflow: {} bytes exceeds maximum {}",
                pending, self.max_buffer_size
            )));
        }

        Ok(events)
    }

    /// Decode whatever is left once the body has ended.
    pub fn finish(&mut self) -> Vec<StreamEvent> {
        if self.buffer.is_empty() {
            return Vec::new();
        }

        let line = std::mem::take(&mut self.buffer);
        decode_line(&line).into_iter().collect()
    }

    /// Get current buffer size
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for SseLineParser {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_line(line: &[u8]) -> Option<StreamEvent> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    StreamEvent::from_line(&String::from_utf8_lossy(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HE: &str = "data: {\"choices\":[{\"delta\":{\"content\":\"He\"}}]}\n";
    const LLO: &str = "data: {\"choices\":[{\"delta\":{\"content\":\"llo\"}}]}\n";

    fn deltas(events: &[StreamEvent]) -> String {
        events
            .iter()
            .filter_map(|e| match e {
                StreamEvent::Delta(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_two_chunks_concatenate() {
        let mut parser = SseLineParser::new();

        let mut events = parser.add_bytes(HE.as_bytes()).unwrap();
        events.extend(parser.add_bytes(LLO.as_bytes()).unwrap());

        assert_eq!(deltas(&events), "Hello");
        assert!(parser.is_empty());
    }

    #[test]
    fn test_line_split_across_chunks() {
        let mut parser = SseLineParser::new();
        let (first, second) = HE.split_at(20);

        assert!(parser.add_bytes(first.as_bytes()).unwrap().is_empty());
        assert_eq!(parser.buffer_size(), 20);

        let events = parser.add_bytes(second.as_bytes()).unwrap();
        assert_eq!(events, vec![StreamEvent::Delta("He".to_string())]);
    }

    #[test]
    fn test_multiple_lines_in_one_chunk() {
        let mut parser = SseLineParser::new();
        let body = format!("{}\n{}data: [DONE]\n\n", HE, LLO);

        let events = parser.add_bytes(body.as_bytes()).unwrap();
        assert_eq!(deltas(&events), "Hello");
        assert_eq!(events.last(), Some(&StreamEvent::Done));
    }

    #[test]
    fn test_crlf_lines() {
        let mut parser = SseLineParser::new();
        let body = HE.replace('\n', "\r\n");

        let events = parser.add_bytes(body.as_bytes()).unwrap();
        assert_eq!(deltas(&events), "He");
    }

    #[test]
    fn test_utf8_split_across_chunks() {
        let mut parser = SseLineParser::new();
        let line = "data: {\"choices\":[{\"delta\":{\"content\":\"caf\u{e9}\"}}]}\n";
        let bytes = line.as_bytes();
        let cut = line.find('\u{e9}').unwrap() + 1;

        assert!(parser.add_bytes(&bytes[..cut]).unwrap().is_empty());
        let events = parser.add_bytes(&bytes[cut..]).unwrap();
        assert_eq!(deltas(&events), "caf\u{e9}");
    }

    #[test]
    fn test_finish_flushes_unterminated_line() {
        let mut parser = SseLineParser::new();
        let body = HE.trim_end();

        assert!(parser.add_bytes(body.as_bytes()).unwrap().is_empty());
        assert_eq!(deltas(&parser.finish()), "He");
        assert!(parser.is_empty());
        assert!(parser.finish().is_empty());
    }

    #[test]
    fn test_malformed_line_is_skipped() {
        let mut parser = SseLineParser::new();
        let body = format!("data: {{\"choices\":[{{\n{}", LLO);

        let events = parser.add_bytes(body.as_bytes()).unwrap();
        assert_eq!(events, vec![StreamEvent::Delta("llo".to_string())]);
    }

    #[test]
    fn test_buffer_overflow() {
        let mut parser = SseLineParser::with_capacity(100);

        let large_data = vec![b'a'; 150];
        let result = parser.add_bytes(&large_data);

        assert!(matches!(result, Err(ClientError::StreamingError(_))));
        assert!(parser.is_empty());
    }

    #[test]
    fn test_long_complete_lines_do_not_overflow() {
        let mut parser = SseLineParser::with_capacity(100);
        let mut data = vec![b'a'; 150];
        data.push(b'\n');

        assert!(parser.add_bytes(&data).unwrap().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut parser = SseLineParser::new();

        parser.add_bytes(b"data: partial").unwrap();
        assert!(!parser.is_empty());

        parser.clear();
        assert!(parser.is_empty());
        assert_eq!(parser.buffer_size(), 0);
    }
}
