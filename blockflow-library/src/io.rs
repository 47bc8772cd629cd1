//! Sink blocks.

use blockflow_core::prelude::*;
use tracing::info;

/// Print block - logs its input and produces nothing.
///
/// Diagrams typically end in one of these; it is the only standard block
/// that returns `Ok(None)`.
#[derive(Debug, Clone, Default)]
pub struct Print {
    label: Option<String>,
}

impl Print {
    /// Create an unlabeled print block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix logged values with a label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Compute for Print {
    fn compute(&mut self, inputs: &InputValues) -> Result<Option<ComputeOutput>> {
        let value = inputs.get("in").cloned().unwrap_or_default();
        match &self.label {
            Some(label) => info!(label = %label, value = %value.inner(), "print"),
            None => info!(value = %value.inner(), "print"),
        }
        Ok(None)
    }
}

/// A ported print block: input "in", no outputs.
pub fn print(name: impl Into<String>) -> FunctionBlock {
    FunctionBlock::new(name, Print::new()).with_input(InputPort::new("in").with_type("ANY"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_produces_nothing() {
        let mut p = Print::new().with_label("valve");
        let inputs: InputValues = [("in".to_string(), Value::bool(true))]
            .into_iter()
            .collect();

        assert_eq!(p.compute(&inputs).unwrap(), None);
    }

    #[test]
    fn print_block_has_no_outputs() {
        let block = print("sink");
        assert_eq!(block.inputs.len(), 1);
        assert!(block.outputs.is_empty());
    }
}
