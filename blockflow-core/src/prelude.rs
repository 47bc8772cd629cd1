//! Prelude for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! # Example
//!
//! ```
//! use blockflow_core::prelude::*;
//! ```

// Core types
pub use crate::types::{BlockId, PortId};

// Error handling
pub use crate::error::{BlockflowError, Result, ResultExt};

// Values
pub use crate::value::Value;

// Ports
pub use crate::port::{InputPort, OutputPort, Port, PortDirection};

// Blocks
pub use crate::block::{Compute, ComputeOutput, FunctionBlock, InputValues};

// Logging
pub use crate::logging::{
    BufferedCollector, LogCategory, LogCollector, LogContext, LogEvent, LogFilter, LogLevel,
    NullCollector,
};
