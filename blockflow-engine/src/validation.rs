//! Process validation.
//!
//! Static diagnostics over a process graph, for editor frontends to render
//! before (or without) ticking. Evaluation itself never validates; all of
//! these conditions degrade to soft skips or stale reads at runtime.

use crate::process::Process;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Result of process validation.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation diagnostic.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/bindings/")]
pub struct ValidationError {
    /// The type of diagnostic.
    pub kind: ValidationErrorKind,
    /// The location in the process (e.g., "block_3.enable").
    pub location: String,
    /// Human-readable message.
    pub message: String,
}

/// Types of validation diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/bindings/")]
pub enum ValidationErrorKind {
    /// A link endpoint no longer resolves to a live port.
    DanglingLink,
    /// An input has neither a source nor a default; its block will be
    /// skipped every tick.
    UnsatisfiedInput,
    /// A consumer is registered before its producer; it reads the
    /// producer's previous-tick value. Advisory.
    ForwardReference,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.location, self.message)
    }
}

impl std::fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::DanglingLink => "DANGLING_LINK",
            Self::UnsatisfiedInput => "UNSATISFIED_INPUT",
            Self::ForwardReference => "FORWARD_REFERENCE",
        };
        write!(f, "{}", s)
    }
}

impl ValidationError {
    /// Create a new validation diagnostic.
    pub fn new(
        kind: ValidationErrorKind,
        location: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            location: location.into(),
            message: message.into(),
        }
    }
}

/// Validates a process graph.
pub struct ProcessValidator;

impl ProcessValidator {
    /// Run every check over the process.
    ///
    /// Cycles are not checked: feedback loops are legal and resolve
    /// through the one-tick lag.
    pub fn validate(process: &Process) -> ValidationResult {
        let mut errors = Vec::new();

        for (position, (id, block)) in process.iter().enumerate() {
            for input in &block.inputs {
                let location = format!("{}.{}", id, input.name);

                let Some(source) = &input.source else {
                    if input.default.is_none() {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::UnsatisfiedInput,
                            location,
                            format!(
                                "input '{}' of block '{}' has no source and no default",
                                input.name,
                                block.name()
                            ),
                        ));
                    }
                    continue;
                };

                let Some(source_position) = process.position(source.block) else {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::DanglingLink,
                        location,
                        format!("source {} refers to a removed block", source),
                    ));
                    continue;
                };

                let port_live = process
                    .block(source.block)
                    .is_ok_and(|b| b.get_output(&source.name).is_some());
                if !port_live {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::DanglingLink,
                        location,
                        format!("source {} refers to a removed port", source),
                    ));
                    continue;
                }

                if source_position > position {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::ForwardReference,
                        location,
                        format!(
                            "block '{}' reads from later block '{}' and sees its previous-tick value",
                            block.name(),
                            source
                        ),
                    ));
                }
            }

            // Dangling forward references: destinations pointing at
            // removed blocks or ports.
            for output in &block.outputs {
                for dest in &output.destinations {
                    let live = process
                        .block(dest.block)
                        .is_ok_and(|b| b.get_input(&dest.name).is_some());
                    if !live {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::DanglingLink,
                            format!("{}.{}", id, output.name),
                            format!("destination {} refers to a removed port", dest),
                        ));
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
