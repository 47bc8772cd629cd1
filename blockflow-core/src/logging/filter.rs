//! Log filtering for querying and streaming events.
//!
//! Provides composable filters for log events based on level, category,
//! process name, block ID, tick number, time range, and message content.

use super::event::{LogCategory, LogEvent, LogLevel};
use crate::types::BlockId;
use serde::{Deserialize, Serialize};

/// A filter for log events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogFilter {
    /// Minimum log level (inclusive).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_level: Option<LogLevel>,
    /// Maximum log level (inclusive).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_level: Option<LogLevel>,
    /// Allowed categories (empty = all).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<LogCategory>,
    /// Filter by process name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process: Option<String>,
    /// Filter by block ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<BlockId>,
    /// Filter by tick number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick: Option<u64>,
    /// Filter by message content (case-insensitive contains).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_contains: Option<String>,
    /// Start timestamp (nanoseconds since epoch, inclusive).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time_ns: Option<u64>,
    /// End timestamp (nanoseconds since epoch, inclusive).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time_ns: Option<u64>,
    /// Maximum number of events to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    /// Offset for pagination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl LogFilter {
    /// Create a new empty filter (matches all events).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum log level.
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = Some(level);
        self
    }

    /// Set maximum log level.
    pub fn max_level(mut self, level: LogLevel) -> Self {
        self.max_level = Some(level);
        self
    }

    /// Set exact log level.
    pub fn level(mut self, level: LogLevel) -> Self {
        self.min_level = Some(level);
        self.max_level = Some(level);
        self
    }

    /// Set allowed categories.
    pub fn categories(mut self, categories: Vec<LogCategory>) -> Self {
        self.categories = categories;
        self
    }

    /// Add an allowed category.
    pub fn category(mut self, category: LogCategory) -> Self {
        self.categories.push(category);
        self
    }

    /// Set process name filter.
    pub fn process(mut self, process: impl Into<String>) -> Self {
        self.process = Some(process.into());
        self
    }

    /// Set block ID filter.
    pub fn block(mut self, block: BlockId) -> Self {
        self.block = Some(block);
        self
    }

    /// Set tick number filter.
    pub fn tick(mut self, tick: u64) -> Self {
        self.tick = Some(tick);
        self
    }

    /// Set message content filter.
    pub fn message_contains(mut self, pattern: impl Into<String>) -> Self {
        self.message_contains = Some(pattern.into());
        self
    }

    /// Set time range filter.
    pub fn time_range(mut self, start_ns: u64, end_ns: u64) -> Self {
        self.start_time_ns = Some(start_ns);
        self.end_time_ns = Some(end_ns);
        self
    }

    /// Set result limit.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set pagination offset.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Check if an event matches this filter.
    pub fn matches(&self, event: &LogEvent) -> bool {
        // Check level range
        if let Some(min) = self.min_level {
            if event.level < min {
                return false;
            }
        }
        if let Some(max) = self.max_level {
            if event.level > max {
                return false;
            }
        }

        // Check categories
        if !self.categories.is_empty() && !self.categories.contains(&event.category) {
            return false;
        }

        // Check process name
        if let Some(ref process) = self.process {
            if event.process.as_ref() != Some(process) {
                return false;
            }
        }

        // Check block ID
        if let Some(block) = self.block {
            if event.block != Some(block) {
                return false;
            }
        }

        // Check tick number
        if let Some(tick) = self.tick {
            if event.tick != Some(tick) {
                return false;
            }
        }

        // Check message content
        if let Some(ref pattern) = self.message_contains {
            if !event
                .message
                .to_lowercase()
                .contains(&pattern.to_lowercase())
            {
                return false;
            }
        }

        // Check time range
        if let Some(start) = self.start_time_ns {
            if event.timestamp_ns < start {
                return false;
            }
        }
        if let Some(end) = self.end_time_ns {
            if event.timestamp_ns > end {
                return false;
            }
        }

        true
    }

    /// Apply pagination to a list of events.
    pub fn paginate<'a>(&self, events: impl Iterator<Item = &'a LogEvent>) -> Vec<&'a LogEvent> {
        let offset = self.offset.unwrap_or(0);
        let limit = self.limit.unwrap_or(usize::MAX);

        events.skip(offset).take(limit).collect()
    }

    /// Check if this filter has any constraints.
    pub fn is_empty(&self) -> bool {
        self.min_level.is_none()
            && self.max_level.is_none()
            && self.categories.is_empty()
            && self.process.is_none()
            && self.block.is_none()
            && self.tick.is_none()
            && self.message_contains.is_none()
            && self.start_time_ns.is_none()
            && self.end_time_ns.is_none()
    }

    /// Create a human-readable description of the filter.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();

        if let Some(min) = self.min_level {
            if let Some(max) = self.max_level {
                if min == max {
                    parts.push(format!("level={}", min));
                } else {
                    parts.push(format!("level={}-{}", min, max));
                }
            } else {
                parts.push(format!("level>={}", min));
            }
        } else if let Some(max) = self.max_level {
            parts.push(format!("level<={}", max));
        }

        if !self.categories.is_empty() {
            let cats: Vec<&str> = self.categories.iter().map(|c| c.as_str()).collect();
            parts.push(format!("category={}", cats.join(",")));
        }

        if let Some(ref process) = self.process {
            parts.push(format!("process={}", process));
        }

        if let Some(block) = self.block {
            parts.push(format!("block={}", block.as_u64()));
        }

        if let Some(tick) = self.tick {
            parts.push(format!("tick={}", tick));
        }

        if let Some(ref pattern) = self.message_contains {
            parts.push(format!("contains=\"{}\"", pattern));
        }

        if parts.is_empty() {
            "all events".to_string()
        } else {
            parts.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_event() -> LogEvent {
        LogEvent::info(LogCategory::Block, "Test message")
            .with_process("pump_control")
            .with_block(BlockId::new(42))
            .with_tick(7)
    }

    #[test]
    fn filter_empty_matches_all() {
        let filter = LogFilter::new();
        let event = test_event();

        assert!(filter.matches(&event));
    }

    #[test]
    fn filter_by_level() {
        let event = LogEvent::warn(LogCategory::System, "Warning");

        assert!(LogFilter::new().min_level(LogLevel::Info).matches(&event));
        assert!(LogFilter::new().min_level(LogLevel::Warn).matches(&event));
        assert!(!LogFilter::new().min_level(LogLevel::Error).matches(&event));

        assert!(LogFilter::new().max_level(LogLevel::Warn).matches(&event));
        assert!(LogFilter::new().max_level(LogLevel::Error).matches(&event));
        assert!(!LogFilter::new().max_level(LogLevel::Info).matches(&event));

        assert!(LogFilter::new().level(LogLevel::Warn).matches(&event));
        assert!(!LogFilter::new().level(LogLevel::Info).matches(&event));
    }

    #[test]
    fn filter_by_category() {
        let event = LogEvent::info(LogCategory::Block, "Block event");

        assert!(LogFilter::new().category(LogCategory::Block).matches(&event));
        assert!(!LogFilter::new().category(LogCategory::Tick).matches(&event));
        assert!(
            LogFilter::new()
                .categories(vec![LogCategory::Block, LogCategory::Tick])
                .matches(&event)
        );
    }

    #[test]
    fn filter_by_block() {
        let event = LogEvent::info(LogCategory::Block, "Event").with_block(BlockId::new(42));

        assert!(LogFilter::new().block(BlockId::new(42)).matches(&event));
        assert!(!LogFilter::new().block(BlockId::new(99)).matches(&event));
    }

    #[test]
    fn filter_by_tick() {
        let event = LogEvent::info(LogCategory::Tick, "Event").with_tick(3);

        assert!(LogFilter::new().tick(3).matches(&event));
        assert!(!LogFilter::new().tick(4).matches(&event));
    }

    #[test]
    fn filter_by_message() {
        let event = LogEvent::info(LogCategory::System, "Replacing block valve_1");

        assert!(LogFilter::new().message_contains("valve").matches(&event));
        assert!(LogFilter::new().message_contains("VALVE").matches(&event)); // Case-insensitive
        assert!(!LogFilter::new().message_contains("pump").matches(&event));
    }

    #[test]
    fn filter_combined() {
        let event = LogEvent::warn(LogCategory::Block, "Input unresolved")
            .with_process("pump_control")
            .with_block(BlockId::new(5))
            .with_tick(2);

        let filter = LogFilter::new()
            .min_level(LogLevel::Warn)
            .category(LogCategory::Block)
            .process("pump_control")
            .tick(2);

        assert!(filter.matches(&event));

        // Change one condition to fail
        let filter_wrong_process = LogFilter::new()
            .min_level(LogLevel::Warn)
            .category(LogCategory::Block)
            .process("other_process")
            .tick(2);

        assert!(!filter_wrong_process.matches(&event));
    }

    #[test]
    fn filter_pagination() {
        let events: Vec<LogEvent> = (0..10)
            .map(|i| LogEvent::info(LogCategory::System, format!("Event {}", i)))
            .collect();

        let filter = LogFilter::new().offset(3).limit(4);
        let paginated: Vec<&LogEvent> = filter.paginate(events.iter()).into_iter().collect();

        assert_eq!(paginated.len(), 4);
        assert_eq!(paginated[0].message, "Event 3");
        assert_eq!(paginated[3].message, "Event 6");
    }

    #[test]
    fn filter_describe() {
        let filter = LogFilter::new()
            .min_level(LogLevel::Warn)
            .category(LogCategory::Block)
            .process("pump_control");

        let desc = filter.describe();
        assert!(desc.contains("level>=warn"));
        assert!(desc.contains("category=block"));
        assert!(desc.contains("process=pump_control"));
    }
}
