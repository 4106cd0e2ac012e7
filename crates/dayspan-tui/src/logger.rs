/// Log capture into a memory buffer so output never corrupts the raw
/// terminal.
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use log::{Level, Metadata, Record, SetLoggerError};

const MAX_LOG_LINES: usize = 1_000;

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub message: String,
}

impl LogEntry {
    pub fn format(&self) -> String {
        format!("[{}] {} {}", self.timestamp, self.level, self.message)
    }
}

/// Shared ring of recent log lines.
#[derive(Clone)]
pub struct LogBuffer {
    entries: Arc<RwLock<VecDeque<LogEntry>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(MAX_LOG_LINES))),
        }
    }

    pub fn push(&self, entry: LogEntry) {
        let mut entries = self.entries.write().unwrap();
        if entries.len() >= MAX_LOG_LINES {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// The most recent `count` lines, oldest first.
    pub fn recent(&self, count: usize) -> Vec<String> {
        let entries = self.entries.read().unwrap();
        let start = entries.len().saturating_sub(count);
        entries.iter().skip(start).map(|e| e.format()).collect()
    }
}

struct BufferedLogger {
    buffer: LogBuffer,
}

impl log::Log for BufferedLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.buffer.push(LogEntry {
                timestamp: chrono::Local::now().format("%H:%M:%S%.3f").to_string(),
                level: record.level().to_string(),
                message: format!("{}", record.args()),
            });
        }
    }

    fn flush(&self) {}
}

/// Install the buffered logger and hand back the buffer for display.
/// Installing twice (tests) leaves the first logger in place; the buffer
/// still works either way.
pub fn init_memory_logger() -> Result<LogBuffer, SetLoggerError> {
    let buffer = LogBuffer::new();
    let _ = log::set_boxed_logger(Box::new(BufferedLogger {
        buffer: buffer.clone(),
    }));
    log::set_max_level(log::LevelFilter::Debug);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_keeps_most_recent_lines() {
        let buffer = LogBuffer::new();
        for i in 0..10 {
            buffer.push(LogEntry {
                timestamp: "00:00:00.000".to_string(),
                level: "INFO".to_string(),
                message: format!("line {}", i),
            });
        }
        let tail = buffer.recent(3);
        assert_eq!(tail.len(), 3);
        assert!(tail[2].ends_with("line 9"));
    }
}
