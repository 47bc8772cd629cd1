//! Structured logging for process evaluation.
//!
//! This module provides the evaluation logging system with:
//!
//! - **Correlation fields**: Every log event can be associated with a process name, block id, and tick number
//! - **Structured Events**: Events contain typed fields for filtering and aggregation
//! - **Buffered Collection**: Thread-safe ring buffer for in-memory log storage
//! - **Flexible Filtering**: Query logs by level, category, process, block, tick, time range, and message content
//! - **Real-time Subscribers**: Register callbacks for immediate event notifications
//!
//! # Example
//!
//! ```
//! use blockflow_core::logging::{LogCategory, LogFilter, LogLevel, BufferedCollector, LogContext};
//! use blockflow_core::types::BlockId;
//! use std::sync::Arc;
//!
//! // Create a collector
//! let collector = Arc::new(BufferedCollector::with_default_capacity());
//!
//! // Create a context for a specific process
//! let ctx = LogContext::new(collector.clone()).with_process("pump_control");
//!
//! // Log events with automatic correlation
//! ctx.info(LogCategory::Tick, "Tick started");
//!
//! // Create a block-specific context
//! let block_ctx = ctx.for_block(BlockId::new(1));
//! block_ctx.debug(LogCategory::Block, "Gathering inputs");
//!
//! // Query logs
//! let errors = collector.by_level(LogLevel::Error);
//! let block_logs = collector.by_block(BlockId::new(1));
//! ```

mod collector;
mod event;
mod filter;

pub use collector::{
    BufferedCollector, DEFAULT_BUFFER_CAPACITY, LogCollector, LogContext, NullCollector,
};
pub use event::{LogCategory, LogEvent, LogLevel};
pub use filter::LogFilter;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BlockId;
    use std::sync::Arc;

    #[test]
    fn integration_test_logging_workflow() {
        // Create a collector
        let collector = Arc::new(BufferedCollector::with_default_capacity());

        // Simulate one evaluation pass
        let ctx = LogContext::new(collector.clone())
            .with_process("order_flow")
            .at_tick(1);

        // Log tick start
        ctx.info(LogCategory::Tick, "Tick started");

        // Simulate block evaluation
        for block_id in [1, 2, 3] {
            let block_ctx = ctx.for_block(BlockId::new(block_id));
            block_ctx.debug(LogCategory::Block, format!("Block {} started", block_id));
            block_ctx.info(LogCategory::Block, format!("Block {} computed", block_id));
        }

        // Log tick completion
        ctx.info(LogCategory::Tick, "Tick completed");

        // Verify collection
        assert_eq!(collector.len(), 8); // 1 start + 3*2 blocks + 1 complete

        // Query by tick
        let tick_logs = collector.by_tick(1);
        assert_eq!(tick_logs.len(), 8);

        // Query by level
        let debug_logs = collector.query(&LogFilter::new().level(LogLevel::Debug));
        assert_eq!(debug_logs.len(), 3); // 3 block starts

        // Query by category
        let block_logs = collector.query(&LogFilter::new().category(LogCategory::Block));
        assert_eq!(block_logs.len(), 6); // 3 starts + 3 completes

        // Query with multiple filters
        let filter = LogFilter::new()
            .tick(1)
            .min_level(LogLevel::Info)
            .category(LogCategory::Tick);
        let filtered = collector.query(&filter);
        assert_eq!(filtered.len(), 2); // start + complete
    }

    #[test]
    fn integration_test_subscriber() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let collector = BufferedCollector::with_default_capacity();
        let error_count = Arc::new(AtomicUsize::new(0));

        // Subscribe to errors
        let count = Arc::clone(&error_count);
        collector.subscribe(Arc::new(move |event| {
            if event.level >= LogLevel::Error {
                count.fetch_add(1, Ordering::SeqCst);
            }
        }));

        // Log some events
        collector.collect(LogEvent::info(LogCategory::System, "Info message"));
        collector.collect(LogEvent::warn(LogCategory::System, "Warning message"));
        collector.collect(LogEvent::error(LogCategory::System, "Error message"));
        collector.collect(LogEvent::error(LogCategory::Block, "Another error"));

        // Verify subscriber was called
        assert_eq!(error_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn integration_test_event_formatting() {
        let event = LogEvent::warn(LogCategory::Block, "Compute failed")
            .with_process("my_process")
            .with_block(BlockId::new(42))
            .with_tick(9)
            .with_field("cause", "division by zero")
            .with_field_i64("declared_outputs", 2);

        let line = event.format_line();

        // Verify all parts are present
        assert!(line.contains("[WARN]"));
        assert!(line.contains("[block]"));
        assert!(line.contains("process=my_process"));
        assert!(line.contains("block=42"));
        assert!(line.contains("tick=9"));
        assert!(line.contains("Compute failed"));
        assert!(line.contains("cause"));
        assert!(line.contains("declared_outputs"));
    }

    #[test]
    fn integration_test_filter_serialization() {
        let filter = LogFilter::new()
            .min_level(LogLevel::Warn)
            .block(BlockId::new(3))
            .category(LogCategory::Block)
            .limit(100);

        // Serialize to JSON
        let json = serde_json::to_string(&filter).unwrap();

        // Deserialize back
        let parsed: LogFilter = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.min_level, Some(LogLevel::Warn));
        assert_eq!(parsed.block, Some(BlockId::new(3)));
        assert_eq!(parsed.categories, vec![LogCategory::Block]);
        assert_eq!(parsed.limit, Some(100));
    }
}
