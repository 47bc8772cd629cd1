//! Port definitions for function blocks.
//!
//! Every block exposes its connection points as declared ports. An input
//! port resolves its value at evaluation time from a linked source, a
//! configured default, or null. An output port caches the last value its
//! block produced and records where that value fans out to.

use crate::types::PortId;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Direction of a port relative to its owning block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/bindings/")]
#[serde(rename_all = "snake_case")]
pub enum PortDirection {
    /// The port consumes a value.
    Input,
    /// The port produces a value.
    Output,
}

/// An input port on a function block.
///
/// Holds no runtime value of its own. At evaluation time the engine reads
/// through `source` to the upstream output cache, falling back to
/// `default`, then to null.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/bindings/")]
pub struct InputPort {
    /// Port name, unique among the owning block's ports.
    pub name: String,
    /// Advisory payload type ("BOOL", "STRING", ...). Never enforced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    /// Fallback value used when the port is unlinked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Upstream output this port reads from, if linked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PortId>,
}

impl InputPort {
    /// Create an unlinked input port with no default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: None,
            default: None,
            source: None,
        }
    }

    /// Set the advisory value type.
    pub fn with_type(mut self, value_type: impl Into<String>) -> Self {
        self.value_type = Some(value_type.into());
        self
    }

    /// Set the default value used while unlinked.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Whether a default value is configured.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Whether this port currently reads from an upstream output.
    pub fn is_linked(&self) -> bool {
        self.source.is_some()
    }
}

/// An output port on a function block.
///
/// Caches the most recent value written by the block's computation. The
/// cache survives unlink and is never cleared by the engine; downstream
/// consumers read whatever was last written.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/bindings/")]
pub struct OutputPort {
    /// Port name, unique among the owning block's ports.
    pub name: String,
    /// Advisory payload type. Never enforced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    /// Last computed value. None until the block first writes this port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Downstream inputs fed by this port, in link-creation order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub destinations: Vec<PortId>,
}

impl OutputPort {
    /// Create an output port with an empty cache.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: None,
            value: None,
            destinations: Vec::new(),
        }
    }

    /// Set the advisory value type.
    pub fn with_type(mut self, value_type: impl Into<String>) -> Self {
        self.value_type = Some(value_type.into());
        self
    }

    /// Read the cached value, or null if the block has never written it.
    pub fn get_value(&self) -> Value {
        self.value.clone().unwrap_or_default()
    }

    /// Overwrite the cached value.
    pub fn set_value(&mut self, value: Value) {
        self.value = Some(value);
    }

    /// Whether any downstream input reads from this port.
    pub fn is_linked(&self) -> bool {
        !self.destinations.is_empty()
    }

    /// Record a destination, keeping the list duplicate-free and ordered
    /// by first registration.
    pub fn add_destination(&mut self, dest: PortId) {
        if !self.destinations.contains(&dest) {
            self.destinations.push(dest);
        }
    }

    /// Remove a destination if present.
    pub fn remove_destination(&mut self, dest: &PortId) {
        self.destinations.retain(|d| d != dest);
    }
}

/// A declared port, either input or output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "direction", rename_all = "snake_case")]
pub enum Port {
    /// An input port.
    Input(InputPort),
    /// An output port.
    Output(OutputPort),
}

impl Port {
    /// Shorthand for a plain input port.
    pub fn input(name: impl Into<String>) -> Self {
        Self::Input(InputPort::new(name))
    }

    /// Shorthand for a plain output port.
    pub fn output(name: impl Into<String>) -> Self {
        Self::Output(OutputPort::new(name))
    }

    /// The port's name.
    pub fn name(&self) -> &str {
        match self {
            Self::Input(p) => &p.name,
            Self::Output(p) => &p.name,
        }
    }

    /// The port's direction.
    pub fn direction(&self) -> PortDirection {
        match self {
            Self::Input(_) => PortDirection::Input,
            Self::Output(_) => PortDirection::Output,
        }
    }
}

impl From<InputPort> for Port {
    fn from(p: InputPort) -> Self {
        Self::Input(p)
    }
}

impl From<OutputPort> for Port {
    fn from(p: OutputPort) -> Self {
        Self::Output(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BlockId;

    #[test]
    fn input_port_defaults() {
        let port = InputPort::new("enable").with_type("BOOL").with_default(false);
        assert!(port.has_default());
        assert!(!port.is_linked());
        assert_eq!(port.value_type.as_deref(), Some("BOOL"));
        assert_eq!(port.default, Some(Value::bool(false)));
    }

    #[test]
    fn output_cache_starts_empty() {
        let port = OutputPort::new("result");
        assert!(port.get_value().is_null());
        assert!(!port.is_linked());
    }

    #[test]
    fn output_cache_persists() {
        let mut port = OutputPort::new("result");
        port.set_value(Value::int(5));
        assert_eq!(port.get_value(), Value::int(5));

        // Removing all destinations must not drop the cached value.
        port.add_destination(PortId::new(BlockId::new(1), "a"));
        port.remove_destination(&PortId::new(BlockId::new(1), "a"));
        assert_eq!(port.get_value(), Value::int(5));
    }

    #[test]
    fn destinations_are_an_ordered_set() {
        let mut port = OutputPort::new("out");
        let a = PortId::new(BlockId::new(1), "x");
        let b = PortId::new(BlockId::new(2), "y");

        port.add_destination(a.clone());
        port.add_destination(b.clone());
        port.add_destination(a.clone());

        assert_eq!(port.destinations, vec![a, b]);
    }

    #[test]
    fn port_direction() {
        assert_eq!(Port::input("in").direction(), PortDirection::Input);
        assert_eq!(Port::output("out").direction(), PortDirection::Output);
        assert_eq!(Port::input("in").name(), "in");
    }
}
