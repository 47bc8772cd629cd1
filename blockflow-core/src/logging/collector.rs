//! Log collector for capturing and storing log events.
//!
//! Provides a thread-safe collector that accumulates log events
//! with automatic ID assignment and optional filtering.

use super::event::{LogCategory, LogEvent, LogLevel};
use super::filter::LogFilter;
use crate::types::BlockId;
use parking_lot::RwLock;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Maximum number of events to keep in the default buffer.
pub const DEFAULT_BUFFER_CAPACITY: usize = 10_000;

/// Trait for log event collectors.
pub trait LogCollector: Send + Sync {
    /// Collect a log event.
    fn collect(&self, event: LogEvent);

    /// Get the number of collected events.
    fn len(&self) -> usize;

    /// Check if the collector is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Type alias for log event subscriber callbacks.
type LogSubscribers = RwLock<Vec<Arc<dyn Fn(&LogEvent) + Send + Sync>>>;

/// Thread-safe log collector with a bounded ring buffer.
pub struct BufferedCollector {
    /// Ring buffer of events.
    buffer: RwLock<VecDeque<LogEvent>>,
    /// Maximum buffer capacity.
    capacity: usize,
    /// Next event ID counter.
    next_id: AtomicU64,
    /// Optional filter for incoming events.
    filter: Option<LogFilter>,
    /// Subscribers for real-time event notifications.
    subscribers: LogSubscribers,
}

impl BufferedCollector {
    /// Create a new collector with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
            next_id: AtomicU64::new(1),
            filter: None,
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Create a collector with default capacity.
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_BUFFER_CAPACITY)
    }

    /// Set a filter for incoming events.
    pub fn with_filter(mut self, filter: LogFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Add a subscriber for real-time event notifications.
    pub fn subscribe(&self, callback: Arc<dyn Fn(&LogEvent) + Send + Sync>) {
        let mut subscribers = self.subscribers.write();
        subscribers.push(callback);
    }

    /// Get events matching a filter.
    pub fn query(&self, filter: &LogFilter) -> Vec<LogEvent> {
        let buffer = self.buffer.read();
        buffer
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect()
    }

    /// Get the most recent N events.
    pub fn recent(&self, limit: usize) -> Vec<LogEvent> {
        let buffer = self.buffer.read();
        buffer.iter().rev().take(limit).cloned().collect()
    }

    /// Get events for a specific tick.
    pub fn by_tick(&self, tick: u64) -> Vec<LogEvent> {
        let buffer = self.buffer.read();
        buffer
            .iter()
            .filter(|e| e.tick == Some(tick))
            .cloned()
            .collect()
    }

    /// Get events for a specific block.
    pub fn by_block(&self, block: BlockId) -> Vec<LogEvent> {
        let buffer = self.buffer.read();
        buffer
            .iter()
            .filter(|e| e.block == Some(block))
            .cloned()
            .collect()
    }

    /// Get events for a specific process.
    pub fn by_process(&self, process: &str) -> Vec<LogEvent> {
        let buffer = self.buffer.read();
        buffer
            .iter()
            .filter(|e| e.process.as_deref() == Some(process))
            .cloned()
            .collect()
    }

    /// Get events at or above a certain level.
    pub fn by_level(&self, min_level: LogLevel) -> Vec<LogEvent> {
        let buffer = self.buffer.read();
        buffer
            .iter()
            .filter(|e| e.level >= min_level)
            .cloned()
            .collect()
    }

    /// Get all events (up to capacity).
    pub fn all(&self) -> Vec<LogEvent> {
        let buffer = self.buffer.read();
        buffer.iter().cloned().collect()
    }

    /// Clear all events.
    pub fn clear(&self) {
        let mut buffer = self.buffer.write();
        buffer.clear();
    }

    /// Get buffer capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get events since a given event ID.
    pub fn since(&self, after_id: u64) -> Vec<LogEvent> {
        let buffer = self.buffer.read();
        buffer.iter().filter(|e| e.id > after_id).cloned().collect()
    }
}

impl LogCollector for BufferedCollector {
    fn collect(&self, mut event: LogEvent) {
        // Apply filter if configured
        if let Some(ref filter) = self.filter {
            if !filter.matches(&event) {
                return;
            }
        }

        // Assign event ID
        event.id = self.next_id.fetch_add(1, Ordering::SeqCst);

        // Notify subscribers
        {
            let subscribers = self.subscribers.read();
            for subscriber in subscribers.iter() {
                subscriber(&event);
            }
        }

        // Add to buffer
        let mut buffer = self.buffer.write();
        if buffer.len() >= self.capacity {
            buffer.pop_front();
        }
        buffer.push_back(event);
    }

    fn len(&self) -> usize {
        self.buffer.read().len()
    }
}

impl Default for BufferedCollector {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

/// A no-op collector that discards all events.
pub struct NullCollector;

impl LogCollector for NullCollector {
    fn collect(&self, _event: LogEvent) {
        // Discard
    }

    fn len(&self) -> usize {
        0
    }
}

/// Context for logging within a specific process/block/tick.
pub struct LogContext {
    collector: Arc<dyn LogCollector>,
    process: Option<String>,
    block: Option<BlockId>,
    tick: Option<u64>,
}

impl LogContext {
    /// Create a new log context.
    pub fn new(collector: Arc<dyn LogCollector>) -> Self {
        Self {
            collector,
            process: None,
            block: None,
            tick: None,
        }
    }

    /// Set the process name.
    pub fn with_process(mut self, process: impl Into<String>) -> Self {
        self.process = Some(process.into());
        self
    }

    /// Set the block ID.
    pub fn with_block(mut self, block: BlockId) -> Self {
        self.block = Some(block);
        self
    }

    /// Set the tick number.
    pub fn with_tick(mut self, tick: u64) -> Self {
        self.tick = Some(tick);
        self
    }

    /// Create a child context for a specific block.
    pub fn for_block(&self, block: BlockId) -> Self {
        Self {
            collector: Arc::clone(&self.collector),
            process: self.process.clone(),
            block: Some(block),
            tick: self.tick,
        }
    }

    /// Create a child context for a specific tick.
    pub fn at_tick(&self, tick: u64) -> Self {
        Self {
            collector: Arc::clone(&self.collector),
            process: self.process.clone(),
            block: self.block,
            tick: Some(tick),
        }
    }

    /// Log an event with context fields automatically applied.
    pub fn log(&self, mut event: LogEvent) {
        if event.process.is_none() {
            event.process = self.process.clone();
        }
        if event.block.is_none() {
            event.block = self.block;
        }
        if event.tick.is_none() {
            event.tick = self.tick;
        }
        self.collector.collect(event);
    }

    /// Log a trace-level message.
    pub fn trace(&self, category: LogCategory, message: impl Into<String>) {
        self.log(LogEvent::trace(category, message));
    }

    /// Log a debug-level message.
    pub fn debug(&self, category: LogCategory, message: impl Into<String>) {
        self.log(LogEvent::debug(category, message));
    }

    /// Log an info-level message.
    pub fn info(&self, category: LogCategory, message: impl Into<String>) {
        self.log(LogEvent::info(category, message));
    }

    /// Log a warn-level message.
    pub fn warn(&self, category: LogCategory, message: impl Into<String>) {
        self.log(LogEvent::warn(category, message));
    }

    /// Log an error-level message.
    pub fn error(&self, category: LogCategory, message: impl Into<String>) {
        self.log(LogEvent::error(category, message));
    }
}

impl Clone for LogContext {
    fn clone(&self) -> Self {
        Self {
            collector: Arc::clone(&self.collector),
            process: self.process.clone(),
            block: self.block,
            tick: self.tick,
        }
    }
}
