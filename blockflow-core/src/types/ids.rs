//! Strongly-typed identifiers for blockflow entities.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Handle to a function block registered with a `Process`.
///
/// Handles are assigned at registration time, increase monotonically, and
/// are never reused. A handle held after its block was removed or replaced
/// simply stops resolving; it can never point at the wrong block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/bindings/")]
pub struct BlockId(u64);

impl BlockId {
    /// Create a block ID from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block_{}", self.0)
    }
}

impl From<u64> for BlockId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Handle to a port on a registered function block.
///
/// Link endpoints (`InputPort::source`, `OutputPort::destinations`) are
/// stored as `PortId`s rather than references, so tearing down a block
/// invalidates its ports instead of leaving dangling links.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/bindings/")]
pub struct PortId {
    /// The block this port belongs to.
    pub block: BlockId,
    /// The port name (e.g. "IN", "OUT", "EN").
    pub name: String,
}

impl PortId {
    /// Create a new port ID.
    #[must_use]
    pub fn new(block: BlockId, name: impl Into<String>) -> Self {
        Self {
            block,
            name: name.into(),
        }
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.block, self.name)
    }
}

/// Parse a port reference string like "block_5.OUT".
///
/// The string must be in the format `block_<id>.<port_name>` where `<id>`
/// is numeric and `<port_name>` is the port name (may contain dots).
impl std::str::FromStr for PortId {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (block_str, port_name) = s
            .split_once('.')
            .ok_or("Port ID must be in format 'block_<id>.<port_name>'")?;

        if port_name.is_empty() {
            return Err("Port name cannot be empty");
        }

        let id_str = block_str
            .strip_prefix("block_")
            .ok_or("Block ID must start with 'block_'")?;
        if id_str.is_empty() {
            return Err("Block ID number is missing");
        }

        let id = id_str.parse::<u64>().map_err(|_| "Invalid block ID number")?;

        Ok(PortId::new(BlockId::new(id), port_name))
    }
}
