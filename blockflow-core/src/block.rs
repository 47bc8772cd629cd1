//! Function blocks: named computation units with declared ports.
//!
//! A block owns its input and output port declarations and a computation.
//! The engine gathers input values, invokes the computation, and writes
//! the result back into the block's output caches.

use crate::error::Result;
use crate::port::{InputPort, OutputPort, Port};
use crate::value::Value;
use std::collections::HashMap;
use std::fmt;

/// Input snapshot handed to a block's computation, keyed by port name.
///
/// Every declared input is present: linked ports carry their upstream
/// cache, unlinked ports their default or null.
pub type InputValues = HashMap<String, Value>;

/// Result of one block computation.
#[derive(Debug, Clone, PartialEq)]
pub enum ComputeOutput {
    /// A single value, broadcast to every declared output.
    Scalar(Value),
    /// One value per output, matched positionally to the declaration order.
    /// May be shorter than the output list; uncovered outputs keep their
    /// cached value.
    Values(Vec<Value>),
}

impl ComputeOutput {
    /// Broadcast a single value to all outputs.
    pub fn scalar(value: impl Into<Value>) -> Self {
        Self::Scalar(value.into())
    }

    /// Map values positionally onto the declared outputs.
    pub fn values(values: impl IntoIterator<Item = Value>) -> Self {
        Self::Values(values.into_iter().collect())
    }
}

impl From<Value> for ComputeOutput {
    fn from(v: Value) -> Self {
        Self::Scalar(v)
    }
}

impl From<Vec<Value>> for ComputeOutput {
    fn from(v: Vec<Value>) -> Self {
        Self::Values(v)
    }
}

/// Computation carried by a function block.
///
/// `&mut self` lets implementations keep state across ticks (edge
/// detectors, counters). Returning `Ok(None)` leaves every output cache
/// untouched.
pub trait Compute: Send {
    /// Produce this tick's outputs from the gathered input snapshot.
    fn compute(&mut self, inputs: &InputValues) -> Result<Option<ComputeOutput>>;
}

impl<F> Compute for F
where
    F: FnMut(&InputValues) -> Result<Option<ComputeOutput>> + Send,
{
    fn compute(&mut self, inputs: &InputValues) -> Result<Option<ComputeOutput>> {
        self(inputs)
    }
}

/// A named computation unit with declared ports.
///
/// Ports are declared up front via the builder methods or [`add_port`];
/// the engine never discovers them by inspection. Port names are unique
/// per block across both directions.
///
/// [`add_port`]: FunctionBlock::add_port
pub struct FunctionBlock {
    name: String,
    /// Declared inputs, in declaration order.
    pub inputs: Vec<InputPort>,
    /// Declared outputs, in declaration order. Positional results map
    /// onto this order.
    pub outputs: Vec<OutputPort>,
    /// Zero-based position in the evaluation order, refreshed each tick.
    /// Display metadata only; the engine never reads it back.
    pub display_priority: u32,
    /// Disabled blocks are skipped by evaluation but keep their caches.
    pub enabled: bool,
    description: Option<String>,
    compute: Box<dyn Compute>,
}

impl FunctionBlock {
    /// Create a block with no ports and the given computation.
    pub fn new(name: impl Into<String>, compute: impl Compute + 'static) -> Self {
        Self {
            name: name.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            display_priority: 0,
            enabled: true,
            description: None,
            compute: Box::new(compute),
        }
    }

    /// Block name, unique within a process.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional human-readable description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declare an input port.
    pub fn with_input(mut self, port: InputPort) -> Self {
        self.add_port(Port::Input(port));
        self
    }

    /// Declare an output port.
    pub fn with_output(mut self, port: OutputPort) -> Self {
        self.add_port(Port::Output(port));
        self
    }

    /// Start the block disabled.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Declare a port. A port with the same name is replaced in place,
    /// keeping its declaration position; across directions the old port
    /// is removed first.
    pub fn add_port(&mut self, port: Port) {
        match port {
            Port::Input(p) => {
                if let Some(existing) = self.inputs.iter_mut().find(|i| i.name == p.name) {
                    *existing = p;
                } else {
                    self.outputs.retain(|o| o.name != p.name);
                    self.inputs.push(p);
                }
            }
            Port::Output(p) => {
                if let Some(existing) = self.outputs.iter_mut().find(|o| o.name == p.name) {
                    *existing = p;
                } else {
                    self.inputs.retain(|i| i.name != p.name);
                    self.outputs.push(p);
                }
            }
        }
    }

    /// Remove a port by name. Returns the removed port, if any.
    pub fn remove_port(&mut self, name: &str) -> Option<Port> {
        if let Some(pos) = self.inputs.iter().position(|p| p.name == name) {
            return Some(Port::Input(self.inputs.remove(pos)));
        }
        if let Some(pos) = self.outputs.iter().position(|p| p.name == name) {
            return Some(Port::Output(self.outputs.remove(pos)));
        }
        None
    }

    /// Look up an input port by name.
    pub fn get_input(&self, name: &str) -> Option<&InputPort> {
        self.inputs.iter().find(|p| p.name == name)
    }

    /// Look up an input port by name, mutably.
    pub fn get_input_mut(&mut self, name: &str) -> Option<&mut InputPort> {
        self.inputs.iter_mut().find(|p| p.name == name)
    }

    /// Look up an output port by name.
    pub fn get_output(&self, name: &str) -> Option<&OutputPort> {
        self.outputs.iter().find(|p| p.name == name)
    }

    /// Look up an output port by name, mutably.
    pub fn get_output_mut(&mut self, name: &str) -> Option<&mut OutputPort> {
        self.outputs.iter_mut().find(|p| p.name == name)
    }

    /// Run the block's computation over a gathered input snapshot.
    pub fn compute(&mut self, inputs: &InputValues) -> Result<Option<ComputeOutput>> {
        self.compute.compute(inputs)
    }
}

impl fmt::Debug for FunctionBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionBlock")
            .field("name", &self.name)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("display_priority", &self.display_priority)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}
