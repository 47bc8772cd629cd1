//! Per-tick evaluation reports.
//!
//! [`Process::evaluate`] returns a [`TickReport`] describing what ran and
//! what was skipped, so an editor frontend can annotate the diagram
//! without parsing logs.
//!
//! [`Process::evaluate`]: crate::Process::evaluate

use blockflow_core::types::BlockId;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Why a block did not compute during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/bindings/")]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The block is disabled.
    Disabled,
    /// An input had no source and no default.
    MissingInput {
        /// Name of the unresolved input port.
        input: String,
    },
    /// An input's source handle no longer resolves to a live output.
    DanglingSource {
        /// Name of the input whose source went stale.
        input: String,
    },
    /// The block's computation returned an error.
    ComputeFailed {
        /// The error message.
        message: String,
    },
    /// The computation produced more values than the block declares outputs.
    /// No outputs were written.
    OutputMismatch {
        /// Number of declared outputs.
        declared: usize,
        /// Number of values produced.
        produced: usize,
    },
}

/// One skipped block within a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/bindings/")]
pub struct BlockSkip {
    /// Handle of the skipped block.
    pub block: BlockId,
    /// Name of the skipped block.
    pub name: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Summary of one evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/bindings/")]
pub struct TickReport {
    /// Tick number, starting at 1 for the first pass.
    pub tick: u64,
    /// Blocks that computed, in evaluation order.
    pub executed: Vec<BlockId>,
    /// Blocks that were skipped, in evaluation order.
    pub skipped: Vec<BlockSkip>,
}

impl TickReport {
    /// Whether every enabled block computed without incident.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Look up the skip entry for a block, if it was skipped.
    pub fn skip_for(&self, block: BlockId) -> Option<&BlockSkip> {
        self.skipped.iter().find(|s| s.block == block)
    }

    /// Whether the given block computed this tick.
    pub fn executed(&self, block: BlockId) -> bool {
        self.executed.contains(&block)
    }
}
