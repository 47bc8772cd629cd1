//! Strongly-typed identifiers.

mod ids;

pub use ids::{BlockId, PortId};
