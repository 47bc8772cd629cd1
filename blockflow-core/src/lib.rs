//! Blockflow Core Library
//!
//! This crate provides the foundational types and traits for the Blockflow
//! dataflow engine.
//!
//! # Overview
//!
//! Blockflow is a function-block dataflow engine in the style of graphical
//! automation tools: named blocks with declared input and output ports are
//! wired together by links, and a process evaluates every block once per
//! tick in registration order.
//!
//! # Key Components
//!
//! - **Types**: Strongly-typed block and port identifiers
//! - **Value**: Dynamic payloads carried across links
//! - **Port**: Declared input/output connection points
//! - **Block**: Named computation units with a [`Compute`] implementation
//! - **Logging**: Structured, correlated evaluation logging
//!
//! # Example
//!
//! ```
//! use blockflow_core::prelude::*;
//!
//! let block = FunctionBlock::new("not", |inputs: &InputValues| -> Result<Option<ComputeOutput>> {
//!     let v = inputs.get("in").and_then(|v| v.as_bool()).unwrap_or(false);
//!     Ok(Some(ComputeOutput::scalar(!v)))
//! })
//! .with_input(InputPort::new("in").with_type("BOOL"))
//! .with_output(OutputPort::new("out").with_type("BOOL"));
//!
//! assert_eq!(block.name(), "not");
//! ```
//!
//! [`Compute`]: block::Compute

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod block;
pub mod error;
pub mod logging;
pub mod port;
pub mod prelude;
pub mod types;
pub mod value;

// Re-export key types at crate root for convenience
pub use block::{Compute, ComputeOutput, FunctionBlock, InputValues};
pub use error::{BlockflowError, Result};
pub use port::{InputPort, OutputPort, Port, PortDirection};
pub use types::{BlockId, PortId};
pub use value::Value;
