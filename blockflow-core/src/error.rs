//! Error types for blockflow.
//!
//! Strongly-typed errors with actionable context. All errors carry the
//! identifiers (port, block) needed to locate the problem in the diagram.

use crate::types::{BlockId, PortId};
use thiserror::Error;

/// The main error type for blockflow operations.
#[derive(Error, Debug)]
pub enum BlockflowError {
    // =========================================================================
    // Port/Link Errors (E100-E199)
    // =========================================================================
    /// A port handle resolved to a live block but no port of that name.
    #[error("E101: Port '{port}' not found")]
    PortNotFound {
        /// The handle that failed to resolve.
        port: PortId,
    },

    /// No block with the given name is registered.
    #[error("E102: Block '{name}' not found in process")]
    BlockNotFound {
        /// The name that was looked up.
        name: String,
    },

    /// A block handle refers to a block that was removed or replaced.
    #[error("E103: Stale handle {block}: block was removed or replaced")]
    StaleHandle {
        /// The retired handle.
        block: BlockId,
    },

    /// The source end of a link is not an output port.
    #[error("E104: Invalid link source '{port}': not an output port")]
    InvalidLinkSource {
        /// The offending endpoint.
        port: PortId,
    },

    /// The destination end of a link is not an input port.
    #[error("E105: Invalid link target '{port}': not an input port")]
    InvalidLinkTarget {
        /// The offending endpoint.
        port: PortId,
    },

    // =========================================================================
    // Block Execution Errors (E200-E299)
    // =========================================================================
    /// A compute produced more values than the block declares outputs.
    #[error(
        "E201: Output mismatch in block '{block}': {declared} outputs declared, {produced} values produced"
    )]
    OutputMismatch {
        /// The offending block.
        block: String,
        /// Number of declared outputs.
        declared: usize,
        /// Number of values the compute returned.
        produced: usize,
    },

    /// A block's compute operation failed.
    #[error("E202: Compute failed in block '{block}': {cause}")]
    ComputeFailed {
        /// The offending block.
        block: String,
        /// Reason for the failure.
        cause: String,
    },

    // =========================================================================
    // Serialization Errors (E800-E899)
    // =========================================================================
    /// Serialization/deserialization error.
    #[error("E801: Serialization error: {0}")]
    Serialization(
        /// The serialization error message.
        String,
    ),
}

impl BlockflowError {
    /// Get the error code (e.g., "E101").
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::PortNotFound { .. } => "E101",
            Self::BlockNotFound { .. } => "E102",
            Self::StaleHandle { .. } => "E103",
            Self::InvalidLinkSource { .. } => "E104",
            Self::InvalidLinkTarget { .. } => "E105",
            Self::OutputMismatch { .. } => "E201",
            Self::ComputeFailed { .. } => "E202",
            Self::Serialization(_) => "E801",
        }
    }

    /// Check if this error concerns link creation or resolution.
    #[must_use]
    pub fn is_link_error(&self) -> bool {
        matches!(
            self,
            Self::PortNotFound { .. }
                | Self::StaleHandle { .. }
                | Self::InvalidLinkSource { .. }
                | Self::InvalidLinkTarget { .. }
        )
    }

    /// Check if this error arose from a block's compute contract.
    #[must_use]
    pub fn is_compute_error(&self) -> bool {
        matches!(
            self,
            Self::OutputMismatch { .. } | Self::ComputeFailed { .. }
        )
    }
}

/// Result type alias using `BlockflowError`.
pub type Result<T> = std::result::Result<T, BlockflowError>;

/// Extension trait for adding block context to foreign errors.
pub trait ResultExt<T> {
    /// Wrap an error as a compute failure of the named block.
    fn with_block(self, block: impl Into<String>) -> Result<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for std::result::Result<T, E> {
    fn with_block(self, block: impl Into<String>) -> Result<T> {
        self.map_err(|e| BlockflowError::ComputeFailed {
            block: block.into(),
            cause: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_correct() {
        let err = BlockflowError::PortNotFound {
            port: PortId::new(BlockId::new(3), "OUT"),
        };
        assert_eq!(err.code(), "E101");

        let err = BlockflowError::OutputMismatch {
            block: "adder".to_string(),
            declared: 1,
            produced: 3,
        };
        assert_eq!(err.code(), "E201");
    }

    #[test]
    fn error_display() {
        let err = BlockflowError::InvalidLinkTarget {
            port: PortId::new(BlockId::new(5), "OUT"),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("E105"));
        assert!(msg.contains("block_5.OUT"));
    }

    #[test]
    fn link_error_classification() {
        let err = BlockflowError::StaleHandle {
            block: BlockId::new(9),
        };
        assert!(err.is_link_error());
        assert!(!err.is_compute_error());

        let err = BlockflowError::ComputeFailed {
            block: "gate".to_string(),
            cause: "bad input".to_string(),
        };
        assert!(err.is_compute_error());
        assert!(!err.is_link_error());
    }

    #[test]
    fn result_ext_wraps_foreign_errors() {
        let parse: std::result::Result<i32, _> = "nope".parse::<i32>();
        let wrapped = parse.with_block("counter");
        match wrapped {
            Err(BlockflowError::ComputeFailed { block, .. }) => assert_eq!(block, "counter"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
