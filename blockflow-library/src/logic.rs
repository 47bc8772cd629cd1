//! Boolean logic blocks.
//!
//! Constants and gates. Inputs coerce through [`Value::as_bool`], so
//! numbers, strings, and null behave the way the editor's inspector shows
//! them; anything that fails to coerce reads as `false`.
//!
//! [`Value::as_bool`]: blockflow_core::Value::as_bool

use blockflow_core::prelude::*;

/// Read an input as a boolean, treating absent or non-coercible values as
/// `false`.
pub(crate) fn bool_input(inputs: &InputValues, name: &str) -> bool {
    inputs
        .get(name)
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

/// Constant block - emits a fixed value every tick.
#[derive(Debug, Clone)]
pub struct Constant {
    value: Value,
}

impl Constant {
    /// Create a constant with the given value.
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl Compute for Constant {
    fn compute(&mut self, _inputs: &InputValues) -> Result<Option<ComputeOutput>> {
        Ok(Some(ComputeOutput::Scalar(self.value.clone())))
    }
}

/// NOT gate.
#[derive(Debug, Clone, Default)]
pub struct NotGate;

impl Compute for NotGate {
    fn compute(&mut self, inputs: &InputValues) -> Result<Option<ComputeOutput>> {
        Ok(Some(ComputeOutput::scalar(!bool_input(inputs, "in"))))
    }
}

/// AND gate.
#[derive(Debug, Clone, Default)]
pub struct AndGate;

impl Compute for AndGate {
    fn compute(&mut self, inputs: &InputValues) -> Result<Option<ComputeOutput>> {
        Ok(Some(ComputeOutput::scalar(
            bool_input(inputs, "a") && bool_input(inputs, "b"),
        )))
    }
}

/// OR gate.
#[derive(Debug, Clone, Default)]
pub struct OrGate;

impl Compute for OrGate {
    fn compute(&mut self, inputs: &InputValues) -> Result<Option<ComputeOutput>> {
        Ok(Some(ComputeOutput::scalar(
            bool_input(inputs, "a") || bool_input(inputs, "b"),
        )))
    }
}

/// XOR gate.
#[derive(Debug, Clone, Default)]
pub struct XorGate;

impl Compute for XorGate {
    fn compute(&mut self, inputs: &InputValues) -> Result<Option<ComputeOutput>> {
        Ok(Some(ComputeOutput::scalar(
            bool_input(inputs, "a") != bool_input(inputs, "b"),
        )))
    }
}

/// A ported constant block: no inputs, one output "out".
pub fn constant(name: impl Into<String>, value: impl Into<Value>) -> FunctionBlock {
    FunctionBlock::new(name, Constant::new(value))
        .with_output(OutputPort::new("out").with_type("ANY"))
}

/// A ported NOT gate: input "in", output "out".
pub fn not_gate(name: impl Into<String>) -> FunctionBlock {
    FunctionBlock::new(name, NotGate)
        .with_input(InputPort::new("in").with_type("BOOL"))
        .with_output(OutputPort::new("out").with_type("BOOL"))
}

fn binary_gate(name: impl Into<String>, gate: impl Compute + 'static) -> FunctionBlock {
    FunctionBlock::new(name, gate)
        .with_input(InputPort::new("a").with_type("BOOL"))
        .with_input(InputPort::new("b").with_type("BOOL"))
        .with_output(OutputPort::new("out").with_type("BOOL"))
}

/// A ported AND gate: inputs "a" and "b", output "out".
pub fn and_gate(name: impl Into<String>) -> FunctionBlock {
    binary_gate(name, AndGate)
}

/// A ported OR gate: inputs "a" and "b", output "out".
pub fn or_gate(name: impl Into<String>) -> FunctionBlock {
    binary_gate(name, OrGate)
}

/// A ported XOR gate: inputs "a" and "b", output "out".
pub fn xor_gate(name: impl Into<String>) -> FunctionBlock {
    binary_gate(name, XorGate)
}
