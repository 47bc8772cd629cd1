//! Blockflow Engine
//!
//! The `Process` scheduler for the Blockflow dataflow engine: block
//! registration, link management, and the per-tick evaluation pass.
//!
//! # Evaluation model
//!
//! A process evaluates every block exactly once per tick, in registration
//! order, with no dependency analysis and no reordering. Values move
//! through links by reading the upstream output's cache, so a consumer
//! registered before its producer reads the value from the previous tick.
//! Feedback loops are legal for the same reason.
//!
//! # Example
//!
//! ```
//! use blockflow_core::prelude::*;
//! use blockflow_engine::Process;
//!
//! let mut process = Process::new("demo");
//!
//! let constant = process.add_function_block(
//!     FunctionBlock::new("source", |_: &InputValues| -> Result<Option<ComputeOutput>> {
//!         Ok(Some(ComputeOutput::scalar(true)))
//!     })
//!     .with_output(OutputPort::new("out").with_type("BOOL")),
//! );
//! let gate = process.add_function_block(
//!     FunctionBlock::new("not", |inputs: &InputValues| -> Result<Option<ComputeOutput>> {
//!         let v = inputs.get("in").and_then(|v| v.as_bool()).unwrap_or(false);
//!         Ok(Some(ComputeOutput::scalar(!v)))
//!     })
//!     .with_input(InputPort::new("in").with_type("BOOL"))
//!     .with_output(OutputPort::new("out").with_type("BOOL")),
//! );
//!
//! process
//!     .link(&PortId::new(constant, "out"), &PortId::new(gate, "in"))
//!     .unwrap();
//!
//! let report = process.evaluate();
//! assert!(report.is_clean());
//! assert_eq!(
//!     process.output_value(&PortId::new(gate, "out")).unwrap(),
//!     Some(Value::bool(false))
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod process;
pub mod report;
pub mod validation;

pub use process::{Link, Process};
pub use report::{BlockSkip, SkipReason, TickReport};
pub use validation::{ProcessValidator, ValidationError, ValidationErrorKind, ValidationResult};
