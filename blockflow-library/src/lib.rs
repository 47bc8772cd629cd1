//! Standard function blocks for Blockflow.
//!
//! This crate provides the built-in blocks that form the editor's toolbox:
//!
//! ## Logic (`logic::*`)
//! - [`logic::Constant`] - Fixed value source
//! - [`logic::NotGate`] / [`logic::AndGate`] / [`logic::OrGate`] / [`logic::XorGate`] - Boolean gates
//!
//! ## Signals (`signal::*`)
//! - [`signal::RisingEdge`] - One-tick pulse on a false→true transition
//! - [`signal::Pulse`] - Tick-counted square wave
//!
//! ## Text (`text::*`)
//! - [`text::SwapCase`] - Case inversion
//! - [`text::Concat`] - Two-input string join
//!
//! ## Sinks (`io::*`)
//! - [`io::Print`] - Logs its input, produces nothing
//!
//! Every block comes in two forms: the bare `Compute` implementation, and
//! a factory function (`and_gate("name")`) returning a fully-ported
//! `FunctionBlock` ready for `Process::add_function_block`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod io;
pub mod logic;
pub mod signal;
pub mod text;

pub use io::{Print, print};
pub use logic::{
    AndGate, Constant, NotGate, OrGate, XorGate, and_gate, constant, not_gate, or_gate, xor_gate,
};
pub use signal::{Pulse, RisingEdge, pulse, rising_edge};
pub use text::{Concat, SwapCase, concat, swap_case};

/// Prelude for commonly used blocks.
pub mod prelude {
    pub use crate::io::print;
    pub use crate::logic::{and_gate, constant, not_gate, or_gate, xor_gate};
    pub use crate::signal::{pulse, rising_edge};
    pub use crate::text::{concat, swap_case};
}
