//! String blocks.
//!
//! Inputs coerce through [`Value::as_string`]; an absent or null input
//! reads as the empty string.
//!
//! [`Value::as_string`]: blockflow_core::Value::as_string

use blockflow_core::prelude::*;

fn string_input(inputs: &InputValues, name: &str) -> String {
    inputs
        .get(name)
        .and_then(|v| v.as_string())
        .unwrap_or_default()
}

/// Swap case block - flips the case of every letter in the input.
#[derive(Debug, Clone, Default)]
pub struct SwapCase;

impl Compute for SwapCase {
    fn compute(&mut self, inputs: &InputValues) -> Result<Option<ComputeOutput>> {
        let swapped: String = string_input(inputs, "in")
            .chars()
            .flat_map(|c| {
                if c.is_uppercase() {
                    c.to_lowercase().collect::<Vec<_>>()
                } else {
                    c.to_uppercase().collect::<Vec<_>>()
                }
            })
            .collect();
        Ok(Some(ComputeOutput::scalar(swapped)))
    }
}

/// Concat block - joins two string inputs with an optional separator.
#[derive(Debug, Clone, Default)]
pub struct Concat {
    separator: String,
}

impl Concat {
    /// Create a concat with no separator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the separator between the two parts.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl Compute for Concat {
    fn compute(&mut self, inputs: &InputValues) -> Result<Option<ComputeOutput>> {
        let a = string_input(inputs, "a");
        let b = string_input(inputs, "b");
        Ok(Some(ComputeOutput::scalar(format!(
            "{}{}{}",
            a, self.separator, b
        ))))
    }
}

/// A ported swap case block: input "in", output "out".
pub fn swap_case(name: impl Into<String>) -> FunctionBlock {
    FunctionBlock::new(name, SwapCase)
        .with_input(InputPort::new("in").with_type("STRING"))
        .with_output(OutputPort::new("out").with_type("STRING"))
}

/// A ported concat block: inputs "a" and "b", output "out".
pub fn concat(name: impl Into<String>, separator: impl Into<String>) -> FunctionBlock {
    FunctionBlock::new(name, Concat::new().with_separator(separator))
        .with_input(InputPort::new("a").with_type("STRING"))
        .with_input(InputPort::new("b").with_type("STRING"))
        .with_output(OutputPort::new("out").with_type("STRING"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(pairs: &[(&str, &str)]) -> InputValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::string(*v)))
            .collect()
    }

    #[test]
    fn swap_case_flips_letters() {
        let out = SwapCase.compute(&inputs(&[("in", "Hello World")])).unwrap();
        assert_eq!(out, Some(ComputeOutput::scalar("hELLO wORLD")));
    }

    #[test]
    fn swap_case_leaves_non_letters() {
        let out = SwapCase.compute(&inputs(&[("in", "a1-B2")])).unwrap();
        assert_eq!(out, Some(ComputeOutput::scalar("A1-b2")));
    }

    #[test]
    fn swap_case_empty_input() {
        let out = SwapCase.compute(&InputValues::new()).unwrap();
        assert_eq!(out, Some(ComputeOutput::scalar("")));
    }

    #[test]
    fn concat_joins_with_separator() {
        let mut c = Concat::new().with_separator(", ");
        let out = c.compute(&inputs(&[("a", "hello"), ("b", "world")])).unwrap();
        assert_eq!(out, Some(ComputeOutput::scalar("hello, world")));
    }

    #[test]
    fn concat_coerces_numbers() {
        let mut c = Concat::new();
        let i: InputValues = [
            ("a".to_string(), Value::string("tick ")),
            ("b".to_string(), Value::int(7)),
        ]
        .into_iter()
        .collect();
        let out = c.compute(&i).unwrap();
        assert_eq!(out, Some(ComputeOutput::scalar("tick 7")));
    }
}
