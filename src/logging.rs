//! Tracing setup with optional in-memory capture.
//!
//! Embedders call `init` once for stderr logging honoring `RUST_LOG`, or
//! `init_with_capture` to additionally keep recent log lines in a ring
//! buffer they can inspect (useful in tests, where warnings about
//! unsupported comparisons are part of the observable behavior).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Maximum number of log lines kept in memory.
const MAX_LOG_ENTRIES: usize = 1000;

/// Thread-safe ring buffer of formatted log lines.
#[derive(Clone, Default)]
pub struct LogRingBuffer {
    entries: Arc<Mutex<VecDeque<String>>>,
}

impl LogRingBuffer {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(MAX_LOG_ENTRIES))),
        }
    }

    pub fn push(&self, line: String) {
        let mut entries = self.entries.lock().unwrap();
        if entries.len() >= MAX_LOG_ENTRIES {
            entries.pop_front();
        }
        entries.push_back(line);
    }

    pub fn recent(&self, count: usize) -> Vec<String> {
        let entries = self.entries.lock().unwrap();
        entries.iter().rev().take(count).rev().cloned().collect()
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

/// Writer that feeds formatted log lines into a ring buffer.
pub struct RingBufferWriter {
    buffer: LogRingBuffer,
}

impl std::io::Write for RingBufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(line) = std::str::from_utf8(buf) {
            let line = line.trim_end();
            if !line.is_empty() {
                self.buffer.push(line.to_string());
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogRingBuffer {
    type Writer = RingBufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        RingBufferWriter {
            buffer: self.clone(),
        }
    }
}

/// Initialize stderr logging honoring `RUST_LOG` (default `info`).
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

/// Initialize logging into an in-memory ring buffer and return it.
/// Returns the buffer even when another subscriber won the race; in that
/// case the buffer simply stays empty.
pub fn init_with_capture() -> LogRingBuffer {
    let buffer = LogRingBuffer::new();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(buffer.clone())
        .with_ansi(false)
        .compact()
        .try_init();
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_buffer_caps_entries() {
        let buffer = LogRingBuffer::new();
        for i in 0..(MAX_LOG_ENTRIES + 10) {
            buffer.push(format!("line {}", i));
        }
        assert_eq!(buffer.len(), MAX_LOG_ENTRIES);
        let recent = buffer.recent(1);
        assert_eq!(recent[0], format!("line {}", MAX_LOG_ENTRIES + 9));
    }

    #[test]
    fn test_writer_strips_trailing_newline() {
        use std::io::Write;
        let buffer = LogRingBuffer::new();
        let mut writer = buffer.make_writer();
        writer.write_all(b"WARN tablekit: something\n").unwrap();
        assert_eq!(buffer.recent(1), vec!["WARN tablekit: something"]);
    }
}
